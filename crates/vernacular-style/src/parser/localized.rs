//! Line-based parser for the localized dialect.
//!
//! The source is read one line at a time:
//!
//! ```text
//! # 卡片组件
//! 卡片 {
//!     宽度：240像素
//!     边框: 1像素 实线 灰色; 圆角: 8像素
//! }
//! ```
//!
//! A line ending in `{` opens a block for the element alias (or raw selector)
//! before it; `}` closes it. Inside a block every declaration is split on
//! the first `:` or `：` and translated. Declarations may share a line when
//! separated by `;` or `；`. Decoration blocks (`@...{...}`) are skipped here
//! and handled by the decoration engine. Nothing in the source is fatal:
//! problems become [`ParseWarning`]s and parsing continues.

use vernacular_core::logging::targets;

use crate::dictionary::looks_like_selector;
use crate::parser::ParseWarning;
use crate::parser::error::Warnings;
use crate::rules::{PropertyMap, RuleMap};
use crate::translate::ValueTranslator;

const TARGET: &str = targets::PARSER;

/// The result of parsing localized source.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseOutput {
    /// Parsed rules, with empty rules pruned.
    pub rules: RuleMap,
    /// Lines and blocks that were skipped.
    pub warnings: Vec<ParseWarning>,
}

enum State {
    Outside,
    InBlock(OpenBlock),
}

struct OpenBlock {
    /// `None` when the block header could not be resolved; its
    /// declarations are consumed and dropped.
    selector: Option<String>,
    properties: PropertyMap,
    line: u32,
}

/// Parses localized source into a [`RuleMap`].
#[derive(Debug, Clone)]
pub struct LocalizedParser {
    translator: ValueTranslator,
}

impl LocalizedParser {
    /// Create a parser that translates values with `translator`.
    pub fn new(translator: ValueTranslator) -> Self {
        Self { translator }
    }

    /// The translator used for declarations.
    pub fn translator(&self) -> &ValueTranslator {
        &self.translator
    }

    /// Parse localized source.
    pub fn parse(&self, source: &str) -> ParseOutput {
        let mut rules = RuleMap::new();
        let mut warnings = Warnings::default();
        let mut state = State::Outside;
        let mut in_decoration = false;

        for (index, raw) in source.lines().enumerate() {
            let line_no = index as u32 + 1;
            let line = raw.trim();

            if in_decoration {
                if line.contains('}') {
                    in_decoration = false;
                }
                continue;
            }
            if line.is_empty() {
                continue;
            }

            if line.starts_with('@') {
                if !closes_on_same_line(line) {
                    in_decoration = true;
                }
                continue;
            }

            // Block headers first: `#sidebar {` is a selector, not a comment.
            if let Some(header) = line.strip_suffix('{') {
                if let State::InBlock(open) = std::mem::replace(&mut state, State::Outside) {
                    warnings.push(open.line, "block not closed before the next one");
                    self.flush(open, &mut rules);
                }
                state = State::InBlock(self.open_block(header, line_no, &mut warnings));
                continue;
            }

            if is_comment(line) {
                continue;
            }

            match &mut state {
                State::Outside => {
                    if let Some((header, body)) = inline_block(line) {
                        let mut open = self.open_block(header, line_no, &mut warnings);
                        self.parse_into(body, line_no, &mut open.properties, &mut warnings);
                        self.flush(open, &mut rules);
                    } else if line == "}" {
                        warnings.push(line_no, "closing brace without an open block");
                    } else {
                        warnings.push(line_no, format!("text outside any block: {line}"));
                    }
                }
                State::InBlock(open) => {
                    let (body, closes) = match line.strip_suffix('}') {
                        Some(body) => (body, true),
                        None => (line, false),
                    };
                    if open.selector.is_some() {
                        self.parse_into(body, line_no, &mut open.properties, &mut warnings);
                    }
                    if closes {
                        if let State::InBlock(open) = std::mem::replace(&mut state, State::Outside) {
                            self.flush(open, &mut rules);
                        }
                    }
                }
            }
        }

        if let State::InBlock(open) = state {
            warnings.push(open.line, "block not closed at end of input");
            self.flush(open, &mut rules);
        }
        if in_decoration {
            tracing::debug!(target: TARGET, "decoration block not closed at end of input");
        }

        rules.prune();
        ParseOutput {
            rules,
            warnings: warnings.into_vec(),
        }
    }

    /// Parse a declaration body (the text between braces) into a property
    /// map, collecting warnings. Line numbers are counted from `first_line`.
    pub fn parse_body(&self, body: &str, first_line: u32) -> (PropertyMap, Vec<ParseWarning>) {
        let mut properties = PropertyMap::new();
        let mut warnings = Warnings::default();
        for (offset, line) in body.lines().enumerate() {
            let line_no = first_line + offset as u32;
            let line = line.trim();
            if line.is_empty() || is_comment(line) {
                continue;
            }
            self.parse_into(line, line_no, &mut properties, &mut warnings);
        }
        (properties, warnings.into_vec())
    }

    fn open_block(&self, header: &str, line: u32, warnings: &mut Warnings) -> OpenBlock {
        let header = header.trim();
        let dictionary = self.translator.dictionary();
        let selector = if header.is_empty() {
            warnings.push(line, "block without an element name");
            None
        } else if dictionary.elements().contains_alias(header) || looks_like_selector(header) {
            Some(dictionary.resolve_element(header).to_string())
        } else {
            warnings.push(line, format!("unknown element '{header}', block skipped"));
            None
        };
        OpenBlock {
            selector,
            properties: PropertyMap::new(),
            line,
        }
    }

    fn parse_into(&self, text: &str, line: u32, properties: &mut PropertyMap, warnings: &mut Warnings) {
        for declaration in split_declarations(text) {
            let Some((alias, raw_value)) = split_declaration(declaration) else {
                warnings.push(line, format!("no separator in '{declaration}'"));
                continue;
            };

            let dictionary = self.translator.dictionary();
            let property = if dictionary.properties().contains_alias(alias) {
                dictionary.resolve_property(alias)
            } else if is_canonical_property(alias) {
                tracing::debug!(target: TARGET, line, property = alias, "canonical property passed through");
                alias
            } else {
                warnings.push(line, format!("unknown property '{alias}'"));
                continue;
            };

            if raw_value.is_empty() {
                warnings.push(line, format!("empty value for '{alias}'"));
                continue;
            }

            let value = self.translator.translate_value(raw_value, property);
            properties.set(property, value);
        }
    }

    fn flush(&self, open: OpenBlock, rules: &mut RuleMap) {
        let Some(selector) = open.selector else {
            return;
        };
        if open.properties.is_empty() {
            tracing::debug!(target: TARGET, selector = %selector, "empty block dropped");
            return;
        }
        rules.merge(&selector, &open.properties);
    }
}

/// Split text on `;` and `；` outside parentheses and quotes, returning
/// trimmed, non-empty declarations.
pub fn split_declarations(text: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut start = 0;

    for (index, c) in text.char_indices() {
        match quote {
            Some(open) => {
                if c == closing_quote(open) {
                    quote = None;
                }
            }
            None => match c {
                '"' | '\'' | '“' | '「' => quote = Some(c),
                '(' | '（' => depth += 1,
                ')' | '）' => depth = depth.saturating_sub(1),
                ';' | '；' if depth == 0 => {
                    parts.push(&text[start..index]);
                    start = index + c.len_utf8();
                }
                _ => {}
            },
        }
    }
    parts.push(&text[start..]);

    parts
        .into_iter()
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect()
}

/// Split one declaration on its first `:` or `：`.
pub fn split_declaration(declaration: &str) -> Option<(&str, &str)> {
    let index = declaration.find([':', '：'])?;
    let separator = declaration[index..].chars().next()?;
    let property = declaration[..index].trim();
    let value = declaration[index + separator.len_utf8()..].trim();
    if property.is_empty() {
        return None;
    }
    Some((property, value))
}

fn closing_quote(open: char) -> char {
    match open {
        '“' => '”',
        '「' => '」',
        other => other,
    }
}

fn is_comment(line: &str) -> bool {
    line.starts_with('#') || line.starts_with("//") || line.starts_with("/*")
}

fn is_canonical_property(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// `卡片 { 宽度: 1像素 }` on one line.
fn inline_block(line: &str) -> Option<(&str, &str)> {
    let body = line.strip_suffix('}')?;
    let (header, body) = body.split_once('{')?;
    Some((header, body))
}

/// Whether a decoration header line also closes its block.
fn closes_on_same_line(line: &str) -> bool {
    match line.find('{') {
        Some(open) => line[open..].contains('}'),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::dictionary::Dictionary;

    fn parser() -> LocalizedParser {
        LocalizedParser::new(ValueTranslator::new(Arc::new(Dictionary::builtin().unwrap())))
    }

    #[test]
    fn parses_blocks_and_both_colons() {
        let out = parser().parse("卡片 {\n  宽度：240像素\n  背景颜色: 白色\n}\n");

        assert!(out.warnings.is_empty());
        assert_eq!(out.rules.value(".card", "width"), Some("240px"));
        assert_eq!(out.rules.value(".card", "background-color"), Some("white"));
    }

    #[test]
    fn terminators_split_declarations() {
        let out = parser().parse("页面 {\n颜色: 黑色; 字号：14像素；行高: 1.5\n}");

        let body = out.rules.get("body").unwrap();
        assert_eq!(body.get("color"), Some("black"));
        assert_eq!(body.get("font-size"), Some("14px"));
        assert_eq!(body.get("line-height"), Some("1.5"));
    }

    #[test]
    fn headers_and_comments_are_ignored() {
        let source = "# 页面结构\n// note\n页面 {\n# inside\n颜色: 红色\n}\n#sidebar {\n宽度: 10像素\n}";
        let out = parser().parse(source);

        assert!(out.warnings.is_empty());
        assert_eq!(out.rules.value("body", "color"), Some("red"));
        assert_eq!(out.rules.value("#sidebar", "width"), Some("10px"));
    }

    #[test]
    fn malformed_lines_warn_and_continue() {
        let out = parser().parse("页面 {\n没有分隔符\n颜色: 红色\n}\n");

        assert_eq!(out.warnings.len(), 1);
        assert_eq!(out.warnings[0].line, 2);
        assert_eq!(out.rules.value("body", "color"), Some("red"));
    }

    #[test]
    fn empty_rules_are_pruned() {
        let out = parser().parse("页面 {\n}\n卡片 {\n宽度: 1像素\n}");

        assert_eq!(out.rules.len(), 1);
        assert!(!out.rules.contains("body"));
    }

    #[test]
    fn decoration_blocks_are_skipped() {
        let source = "@头像框:光环 {\n宽度: 10像素\n}\n@徽章：星星 { 宽度: 2像素 }\n页面 {\n颜色: 红色\n}";
        let out = parser().parse(source);

        assert!(out.warnings.is_empty());
        assert_eq!(out.rules.len(), 1);
        assert_eq!(out.rules.value("body", "color"), Some("red"));
    }

    #[test]
    fn canonical_syntax_passes_through() {
        let out = parser().parse(".sidebar > .widget {\nmask-image: none\n}\n");

        assert_eq!(out.rules.value(".sidebar > .widget", "mask-image"), Some("none"));
    }

    #[test]
    fn unknown_aliases_warn() {
        let out = parser().parse("未知元素 {\n颜色: 红色\n}\n页面 {\n未知属性: 1\n}");

        assert!(out.rules.is_empty());
        assert_eq!(out.warnings.len(), 2);
    }

    #[test]
    fn close_on_declaration_line_and_inline_blocks() {
        let out = parser().parse("页面 {\n颜色: 红色 }\n卡片 { 宽度: 1像素; 高度: 2像素 }");

        assert_eq!(out.rules.value("body", "color"), Some("red"));
        assert_eq!(out.rules.value(".card", "height"), Some("2px"));
    }

    #[test]
    fn unclosed_block_is_kept_with_warning() {
        let out = parser().parse("页面 {\n颜色: 红色\n");

        assert_eq!(out.rules.value("body", "color"), Some("red"));
        assert_eq!(out.warnings.len(), 1);
    }

    #[test]
    fn declaration_splitting_respects_nesting() {
        assert_eq!(
            split_declarations("背景: 图片(\"a;b.png\"); 颜色: 红色"),
            ["背景: 图片(\"a;b.png\")", "颜色: 红色"]
        );
        assert_eq!(split_declaration("内容：“a:b”"), Some(("内容", "“a:b”")));
        assert_eq!(split_declaration(": x"), None);
    }
}
