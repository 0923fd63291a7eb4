//! Docblock comments: `/** ... */` blocks directly preceding a node.

use lazy_static::lazy_static;
use oxc_ast::ast::Comment;
use regex::Regex;

use crate::parse::SourceModule;

lazy_static! {
    /// Comment body (between the delimiters) of a docblock starts with `*`
    /// followed by whitespace.
    static ref DOCBLOCK_HEADER: Regex = Regex::new(r"^\*\s").unwrap();
    static ref LINE_PREFIX: Regex = Regex::new(r"^\s*\*\s?").unwrap();
}

fn normalize_line_terminators(text: &str) -> String {
    text.replace("\r\n", "\n")
        .replace(|c: char| matches!(c, '\r' | '\u{2028}' | '\u{2029}'), "\n")
}

/// Docblock text without delimiters, `*` line prefixes and surrounding
/// whitespace.
pub fn parse_docblock(body: &str) -> String {
    let normalized = normalize_line_terminators(body);
    normalized
        .split('\n')
        .map(|line| LINE_PREFIX.replace(line, ""))
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}

/// Body of a `/** */` comment, `None` for line comments and plain blocks.
fn docblock_body(text: &str) -> Option<&str> {
    let body = text.strip_prefix("/*")?.strip_suffix("*/")?;
    DOCBLOCK_HEADER.is_match(body).then_some(body)
}

/// Closest docblock ending before `position` with only whitespace and
/// other comments in between.
pub fn docblock_before(source: &str, comments: &[Comment], position: u32) -> Option<String> {
    let mut cursor = position as usize;
    for comment in comments.iter().rev() {
        let (start, end) = (comment.span.start as usize, comment.span.end as usize);
        if end > cursor {
            continue;
        }
        if !source.get(end..cursor)?.trim().is_empty() {
            return None;
        }
        if let Some(body) = docblock_body(comment.span.source_text(source)) {
            return Some(parse_docblock(body));
        }
        cursor = start;
    }
    None
}

/// Last docblock lying entirely inside `start..end`.
pub fn docblock_within(source: &str, comments: &[Comment], start: u32, end: u32) -> Option<String> {
    comments
        .iter()
        .rev()
        .filter(|comment| comment.span.start >= start && comment.span.end <= end)
        .find_map(|comment| docblock_body(comment.span.source_text(source)))
        .map(parse_docblock)
}

impl<'a> SourceModule<'a> {
    pub fn docblock_before(&self, position: u32) -> Option<String> {
        docblock_before(self.source(), self.comments(), position)
    }

    pub fn docblock_within(&self, start: u32, end: u32) -> Option<String> {
        docblock_within(self.source(), self.comments(), start, end)
    }
}
