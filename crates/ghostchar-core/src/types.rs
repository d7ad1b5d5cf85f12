//! 公共类型（对外暴露）：命中项、按标签计数、扫描报告、高亮片段
use serde::Serialize;

/// 单次命中：可疑码位、展示标签、在文本中的位置（按码位计数，从 0 开始）
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Match {
    pub codepoint: u32,
    pub label: String,
    pub position: usize,
}

/// 按标签聚合的计数（顺序 = 该标签首次出现的顺序）
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LabelCount {
    pub label: String,
    pub count: usize,
}

/// 扫描报告（值对象，构造后不可变）
///
/// 不变量：`total == matches.len() == counts 之和`。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    total: usize,
    counts: Vec<LabelCount>,
    matches: Vec<Match>,
}

/// 高亮视图中的一个片段
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment<'a> {
    /// 原样输出的普通文本
    Text(&'a str),
    /// 换行例外（U+000A）
    LineBreak,
    /// 命中的可疑码位
    Mark(&'a Match),
}

impl Report {
    pub(crate) fn new(counts: Vec<LabelCount>, matches: Vec<Match>) -> Self {
        let total = matches.len();
        debug_assert_eq!(total, counts.iter().map(|c| c.count).sum::<usize>());
        Self { total, counts, matches }
    }

    /// 空报告，与 `scan("")` 的结果相同
    pub fn empty() -> Self {
        Self { total: 0, counts: Vec::new(), matches: Vec::new() }
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn counts(&self) -> &[LabelCount] {
        &self.counts
    }

    pub fn matches(&self) -> &[Match] {
        &self.matches
    }

    pub fn is_clean(&self) -> bool {
        self.total == 0
    }

    /// 指定标签的出现次数（不存在时为 0）
    pub fn count_of(&self, label: &str) -> usize {
        self.counts
            .iter()
            .find(|c| c.label == label)
            .map(|c| c.count)
            .unwrap_or(0)
    }

    /// 位置是否被标记（matches 按位置升序，二分查找）
    pub fn is_highlighted(&self, position: usize) -> bool {
        self.matches
            .binary_search_by_key(&position, |m| m.position)
            .is_ok()
    }

    /// 基于报告重建高亮视图，无需重新扫描
    /// - 命中位置输出 `Mark`，换行输出 `LineBreak`，其余文本合并为 `Text`
    /// - `text` 应为生成该报告的同一段文本
    pub fn highlight<'a>(&'a self, text: &'a str) -> Vec<Segment<'a>> {
        let mut segments = Vec::new();
        let mut pending = self.matches.iter().peekable();
        let mut run_start = 0;

        for (pos, (idx, ch)) in text.char_indices().enumerate() {
            while pending.next_if(|m| m.position < pos).is_some() {}

            let special = match pending.next_if(|m| m.position == pos) {
                Some(m) => Some(Segment::Mark(m)),
                None if ch == '\n' => Some(Segment::LineBreak),
                None => None,
            };

            if let Some(seg) = special {
                if run_start < idx {
                    segments.push(Segment::Text(&text[run_start..idx]));
                }
                segments.push(seg);
                run_start = idx + ch.len_utf8();
            }
        }
        if run_start < text.len() {
            segments.push(Segment::Text(&text[run_start..]));
        }

        segments
    }
}

impl Default for Report {
    fn default() -> Self {
        Self::empty()
    }
}
