//! 命中收集与聚合（内部使用）
use std::collections::HashMap;

use crate::label::label;
use crate::rules::{is_suspicious, NEWLINE_EXCEPTION};
use crate::types::{LabelCount, Match, Report};

/// 单遍聚合器：按码位逐个喂入，最后生成 Report
/// - 位置按码位计数，换行例外也会推进位置
/// - 标签计数保持首次出现顺序（Vec + 索引表）
#[derive(Debug, Default)]
pub(crate) struct ReportBuilder {
    position: usize,
    matches: Vec<Match>,
    counts: Vec<LabelCount>,
    index: HashMap<String, usize>,
}

impl ReportBuilder {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, cp: u32) {
        let position = self.position;
        self.position += 1;

        if cp == NEWLINE_EXCEPTION || !is_suspicious(cp) {
            return;
        }

        let label = label(cp);
        match self.index.get(&label) {
            Some(&slot) => self.counts[slot].count += 1,
            None => {
                self.index.insert(label.clone(), self.counts.len());
                self.counts.push(LabelCount { label: label.clone(), count: 1 });
            }
        }
        self.matches.push(Match { codepoint: cp, label, position });
    }

    pub(crate) fn extend<I: IntoIterator<Item = u32>>(mut self, cps: I) -> Self {
        for cp in cps {
            self.push(cp);
        }
        self
    }

    pub(crate) fn finish(self) -> Report {
        Report::new(self.counts, self.matches)
    }
}
