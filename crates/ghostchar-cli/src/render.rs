//! 报告渲染：文本 / JSON / HTML
//!
//! 汇总列表与高亮文本都只从 Report 推导，不再重新扫描。
use anyhow::Result;
use ghostchar_core::{Report, Segment};
use serde::Serialize;
use std::io::Write;

use crate::config::OutputFormat;

pub(crate) const CLEAN_MESSAGE: &str = "✅ No hidden or invisible characters detected.";

/// 单个输入的扫描结果（渲染所需的全部信息）
#[derive(Debug, Clone, Serialize)]
pub(crate) struct ScannedInput {
    pub source: String,
    /// 码位数
    pub chars: usize,
    pub report: Report,
    #[serde(skip)]
    pub text: String,
}

impl ScannedInput {
    pub(crate) fn new(source: String, text: String, report: Report) -> Self {
        let chars = text.chars().count();
        Self { source, chars, report, text }
    }
}

pub(crate) fn badge(report: &Report) -> String {
    format!("{} hidden characters found", report.total())
}

/// 按首次出现顺序输出 "• U+XXXX × N"
pub(crate) fn details_lines(report: &Report) -> Vec<String> {
    if report.is_clean() {
        return vec![CLEAN_MESSAGE.to_string()];
    }
    report
        .counts()
        .iter()
        .map(|c| format!("• {} × {}", c.label, c.count))
        .collect()
}

/// 纯文本高亮：命中码位替换为 [U+XXXX]，换行原样保留
pub(crate) fn highlight_text(input: &ScannedInput) -> String {
    let mut out = String::with_capacity(input.text.len());
    for seg in input.report.highlight(&input.text) {
        match seg {
            Segment::Text(s) => out.push_str(s),
            Segment::LineBreak => out.push('\n'),
            Segment::Mark(m) => {
                out.push('[');
                out.push_str(&m.label);
                out.push(']');
            }
        }
    }
    out
}

pub(crate) fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            _ => out.push(ch),
        }
    }
    out
}

pub(crate) fn highlight_html(input: &ScannedInput) -> String {
    let mut html = String::new();
    for seg in input.report.highlight(&input.text) {
        match seg {
            Segment::Text(s) => html.push_str(&escape_html(s)),
            Segment::LineBreak => html.push_str("<br>"),
            Segment::Mark(m) => {
                html.push_str("<span class=\"mark\">");
                html.push_str(&escape_html(&m.label));
                html.push_str("</span>");
            }
        }
    }
    format!("<div class=\"dim\">{}</div>", html)
}

fn details_html(report: &Report) -> String {
    if report.is_clean() {
        return CLEAN_MESSAGE.to_string();
    }
    report
        .counts()
        .iter()
        .map(|c| format!("• <code>{}</code> × <code>{}</code>", escape_html(&c.label), c.count))
        .collect::<Vec<_>>()
        .join("<br>")
}

/// 流式渲染器：JSON 模式下按数组输出，保持输入顺序
pub(crate) struct Renderer {
    format: OutputFormat,
    first: bool,
}

impl Renderer {
    pub(crate) fn new(format: OutputFormat) -> Self {
        Self { format, first: true }
    }

    pub(crate) fn begin(&mut self, out: &mut dyn Write) -> Result<()> {
        if self.format == OutputFormat::Json {
            write!(out, "[")?;
        }
        Ok(())
    }

    pub(crate) fn item(&mut self, out: &mut dyn Write, input: &ScannedInput) -> Result<()> {
        let first = std::mem::replace(&mut self.first, false);
        match self.format {
            OutputFormat::Text => {
                if !first { writeln!(out)?; }
                writeln!(out, "== {}", input.source)?;
                writeln!(out, "{}", badge(&input.report))?;
                for line in details_lines(&input.report) {
                    writeln!(out, "{}", line)?;
                }
                writeln!(out, "{}", highlight_text(input))?;
                writeln!(out, "Chars: {}", input.chars)?;
            }
            OutputFormat::Json => {
                if !first { write!(out, ",")?; }
                serde_json::to_writer(&mut *out, input)?;
            }
            OutputFormat::Html => {
                let status = if input.report.is_clean() { "ok" } else { "error" };
                writeln!(out, "<section class=\"input\" data-source=\"{}\">", escape_html(&input.source))?;
                writeln!(out, "<div class=\"badge {}\">{}</div>", status, badge(&input.report))?;
                writeln!(out, "<div class=\"details\">{}</div>", details_html(&input.report))?;
                writeln!(out, "{}", highlight_html(input))?;
                writeln!(out, "<div class=\"stats\">Chars: {}</div>", input.chars)?;
                writeln!(out, "</section>")?;
            }
        }
        Ok(())
    }

    pub(crate) fn end(&mut self, out: &mut dyn Write) -> Result<()> {
        if self.format == OutputFormat::Json {
            writeln!(out, "]")?;
        }
        Ok(())
    }
}
