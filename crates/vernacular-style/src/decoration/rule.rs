//! Decoration block extraction.
//!
//! A decoration block attaches a styled synthetic node to every element an
//! alias (or raw selector) resolves to:
//!
//! ```text
//! @头像框：光环 {
//!     宽度: 64像素; 高度: 64像素
//!     限制溢出: 是
//! }
//! ```
//!
//! The rule id is `"<name>:<decoration>"`, so editing a block's body keeps
//! its identity while renaming either part makes it a different rule.

use regex::Regex;
use vernacular_core::logging::targets;

use crate::Result;
use crate::compile::fnv1a;
use crate::dictionary::looks_like_selector;
use crate::error::compile_pattern;
use crate::parser::{LocalizedParser, ParseWarning, Warnings};
use crate::rules::PropertyMap;

/// The overflow-containment pseudo-property.
pub const CONTAIN_OVERFLOW: &str = "--contain-overflow";

const BLOCK_PATTERN: &str = r"@([^{}@\n]+?)\s*[:：]\s*([^\s:：{}]+)\s*\{([^{}]*)\}";

/// One parsed decoration block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecorationRule {
    /// `"<name>:<decoration>"`.
    pub id: String,
    /// The selector the decoration attaches to.
    pub selector: String,
    /// Styles of the synthetic node, without the pseudo-property.
    pub styles: PropertyMap,
    /// Class given to the synthetic node, derived from the id.
    pub class_name: String,
    /// Whether the anchor element clips the decoration.
    pub contain_overflow: bool,
}

impl DecorationRule {
    /// Build a rule, splitting the overflow pseudo-property out of `styles`.
    pub fn new(name: &str, decoration: &str, selector: impl Into<String>, mut styles: PropertyMap) -> Self {
        let id = format!("{name}:{decoration}");
        let contain_overflow = styles
            .remove(CONTAIN_OVERFLOW)
            .is_some_and(|v| v.trim() == "true");
        Self {
            class_name: class_name_for(&id),
            id,
            selector: selector.into(),
            styles,
            contain_overflow,
        }
    }

    /// Styles applied to each synthetic node: the rule's styles, made
    /// non-interactive unless the rule says otherwise.
    pub fn node_styles(&self) -> PropertyMap {
        let mut styles = self.styles.clone();
        if !styles.contains("pointer-events") {
            styles.set("pointer-events", "none");
        }
        styles
    }
}

/// Synthetic class name for a rule id: `vd-` and eight hex digits.
pub fn class_name_for(id: &str) -> String {
    let hash = fnv1a(id.as_bytes());
    format!("vd-{:08x}", (hash ^ (hash >> 32)) as u32)
}

/// Result of pulling decoration blocks out of a source text.
#[derive(Debug, Clone, Default)]
pub struct Extraction {
    /// Parsed rules in source order; a repeated id keeps the last block.
    pub rules: Vec<DecorationRule>,
    /// The blocks as written, for redisplay.
    pub blocks: Vec<String>,
    /// The source with every block blanked out, line numbers preserved.
    pub remainder: String,
    /// Problems found inside blocks.
    pub warnings: Vec<ParseWarning>,
}

/// Finds and parses decoration blocks.
#[derive(Debug, Clone)]
pub struct DecorationParser {
    pattern: Regex,
    parser: LocalizedParser,
}

impl DecorationParser {
    /// Create a decoration parser that translates declarations with `parser`.
    pub fn new(parser: LocalizedParser) -> Result<Self> {
        Ok(Self {
            pattern: compile_pattern(BLOCK_PATTERN)?,
            parser,
        })
    }

    /// Whether the text contains any decoration block.
    pub fn contains_decorations(&self, text: &str) -> bool {
        self.pattern.is_match(text)
    }

    /// Extract every decoration block from `source`.
    pub fn extract(&self, source: &str) -> Extraction {
        let mut extraction = Extraction::default();
        let mut warnings = Warnings::default();
        let mut remainder = String::with_capacity(source.len());
        let mut last = 0;

        for caps in self.pattern.captures_iter(source) {
            let (Some(whole), Some(name), Some(decoration), Some(body)) =
                (caps.get(0), caps.get(1), caps.get(2), caps.get(3))
            else {
                continue;
            };

            remainder.push_str(&source[last..whole.start()]);
            remainder.extend(whole.as_str().matches('\n').map(|_| '\n'));
            last = whole.end();
            extraction.blocks.push(whole.as_str().to_string());

            let line = line_of(source, whole.start());
            let name = name.as_str().trim();
            let decoration = decoration.as_str().trim();

            let dictionary = self.parser.translator().dictionary();
            let selector = if dictionary.elements().contains_alias(name) {
                dictionary.resolve_element(name)
            } else if looks_like_selector(name) {
                name
            } else {
                warnings.push(line, format!("unknown element '{name}' in decoration '{decoration}'"));
                continue;
            };

            let (styles, body_warnings) = self.parser.parse_body(body.as_str(), line);
            for warning in body_warnings {
                warnings.push(warning.line, warning.message);
            }

            let rule = DecorationRule::new(name, decoration, selector, styles);
            tracing::debug!(
                target: targets::DECORATION,
                id = %rule.id,
                selector = %rule.selector,
                "decoration block parsed"
            );
            match extraction.rules.iter_mut().find(|r| r.id == rule.id) {
                Some(existing) => *existing = rule,
                None => extraction.rules.push(rule),
            }
        }
        remainder.push_str(&source[last..]);

        // Whatever still starts with `@` did not match the block syntax.
        for (index, line) in remainder.lines().enumerate() {
            let line = line.trim();
            if line.starts_with('@') {
                warnings.push(index as u32 + 1, format!("unrecognized decoration block: {line}"));
            }
        }

        extraction.remainder = remainder;
        extraction.warnings = warnings.into_vec();
        extraction.warnings.sort_by_key(|w| w.line);
        extraction
    }
}

fn line_of(source: &str, offset: usize) -> u32 {
    source[..offset].matches('\n').count() as u32 + 1
}
