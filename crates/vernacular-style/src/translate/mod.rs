//! Value translation between the localized dialect and canonical syntax.
//!
//! [`ValueTranslator::translate_value`] turns a localized raw value into a
//! canonical one for a given canonical property. It tries, in order:
//!
//! 1. stripping surrounding quotes (text content is re-quoted and kept),
//! 2. an exact match in the global keyword table,
//! 3. a whole-value localized function call, e.g. `旋转(45度)`,
//! 4. a `<number><localized-unit>` value, e.g. `12像素`,
//! 5. the property's handler from [`handlers::HANDLERS`],
//! 6. component-wise translation of compound values,
//!
//! and otherwise passes the value through unchanged, so hand-written
//! canonical syntax keeps working next to localized syntax.
//!
//! [`ValueTranslator::format_value`] is the mirror image used when
//! generating localized text.

mod color;
pub(crate) mod components;
pub mod handlers;

use std::sync::Arc;

use vernacular_core::logging::targets;

use crate::dictionary::Dictionary;

pub use color::{hex_to_triplet, parse_hex, parse_triplet, triplet_to_hex};
pub use handlers::HandlerKind;

const TARGET: &str = targets::TRANSLATE;

/// Translates declaration values in both directions.
#[derive(Debug, Clone)]
pub struct ValueTranslator {
    dictionary: Arc<Dictionary>,
}

impl ValueTranslator {
    /// Create a translator over a shared dictionary.
    pub fn new(dictionary: Arc<Dictionary>) -> Self {
        Self { dictionary }
    }

    /// The dictionary this translator reads.
    pub fn dictionary(&self) -> &Arc<Dictionary> {
        &self.dictionary
    }

    /// The handler that applies to a canonical property, if any.
    pub fn handler_for(&self, property: &str) -> Option<HandlerKind> {
        handlers::handler_for(property, &self.dictionary)
    }

    /// Translate a localized value for a canonical property.
    pub fn translate_value(&self, raw: &str, property: &str) -> String {
        let trimmed = raw.trim();
        let value = strip_quotes(trimmed);
        let handler = self.handler_for(property);

        if handler == Some(HandlerKind::Quoted) {
            if value.len() == trimmed.len() && components::word_count(value) > 1 {
                let pieces = components::split(value);
                if pieces
                    .iter()
                    .any(|p| matches!(p, components::Piece::Word(w) if strip_quotes(w).len() != w.len()))
                {
                    return components::map_words(value, |word| {
                        let inner = strip_quotes(word);
                        self.translate_text(inner, inner.len() != word.len())
                    });
                }
            }
            return self.translate_text(value, value.len() != trimmed.len());
        }

        if let Some(keyword) = self.dictionary.keywords().get(value) {
            return keyword.to_string();
        }

        if let Some(call) = self.translate_call(value, property) {
            return call;
        }

        if let Some((number, unit)) = self.dictionary.split_localized_unit(value) {
            return format!("{number}{unit}");
        }

        if let Some(kind) = handler {
            if let Some(translated) = self.apply_handler(kind, value, property) {
                return translated;
            }
        }

        if components::word_count(value) > 1 {
            return components::map_words(value, |word| self.translate_word(word, property));
        }

        tracing::debug!(target: TARGET, property, value, "value passed through");
        value.to_string()
    }

    /// Format a canonical value as localized text for a canonical property.
    pub fn format_value(&self, canonical: &str, property: &str) -> String {
        let value = canonical.trim();
        match self.handler_for(property) {
            Some(HandlerKind::Quoted) if value.starts_with(['"', '\'']) => {
                return value.to_string();
            }
            Some(HandlerKind::ChannelTriplet) => {
                if let Some(hex) = triplet_to_hex(value) {
                    return hex;
                }
            }
            _ => {}
        }
        components::map_words(value, |word| self.format_word(word, property))
    }

    /// Text content: quoted text stays text, bare keywords and calls
    /// translate, anything else is quoted.
    fn translate_text(&self, value: &str, was_quoted: bool) -> String {
        if was_quoted {
            return quote(value);
        }
        if let Some(keyword) = self.dictionary.keywords().get(value) {
            return keyword.to_string();
        }
        if value.contains('(') || value.is_empty() || value.is_ascii() {
            return value.to_string();
        }
        quote(value)
    }

    fn apply_handler(&self, kind: HandlerKind, value: &str, property: &str) -> Option<String> {
        match kind {
            HandlerKind::Quoted => Some(quote(value)),
            HandlerKind::ChannelTriplet => hex_to_triplet(value),
            HandlerKind::FunctionList => {
                if components::word_count(value) < 2 {
                    return None;
                }
                Some(components::map_words(value, |word| {
                    self.translate_call(word, property)
                        .unwrap_or_else(|| self.translate_word(word, property))
                }))
            }
            HandlerKind::Enumerated => {
                let scoped = self.dictionary.enumeration(property)?;
                if let Some(canonical) = scoped.get(value) {
                    return Some(canonical.to_string());
                }
                if components::word_count(value) < 2 {
                    return None;
                }
                Some(components::map_words(value, |word| self.translate_word(word, property)))
            }
        }
    }

    /// Translate one top-level component of a compound value.
    fn translate_word(&self, word: &str, property: &str) -> String {
        let dict = &self.dictionary;
        if let Some(canonical) = dict.enumeration(property).and_then(|t| t.get(word)) {
            return canonical.to_string();
        }
        if let Some(canonical) = dict.keywords().get(word) {
            return canonical.to_string();
        }
        if let Some(call) = self.translate_call(word, property) {
            return call;
        }
        if let Some((number, unit)) = dict.split_localized_unit(word) {
            return format!("{number}{unit}");
        }
        word.to_string()
    }

    /// Rewrite a whole-value localized function call.
    fn translate_call(&self, value: &str, property: &str) -> Option<String> {
        let (entry, args) = self.dictionary.functions().match_localized(value)?;
        if !balanced(args) {
            return None;
        }
        let args = if entry.translate_args {
            components::map_words(args, |word| self.translate_word(word, property))
        } else {
            args.trim().to_string()
        };
        Some(format!("{}({})", entry.canonical, args))
    }

    fn format_word(&self, word: &str, property: &str) -> String {
        let dict = &self.dictionary;
        if let Some(alias) = dict.enumeration(property).and_then(|t| t.alias_of(word)) {
            return alias.to_string();
        }
        if let Some(alias) = dict.keywords().alias_of(word) {
            return alias.to_string();
        }
        if let Some((entry, args)) = dict.functions().match_canonical(word) {
            if balanced(args) {
                let args = if entry.translate_args {
                    components::map_words(args, |inner| self.format_word(inner, property))
                } else {
                    args.trim().to_string()
                };
                return format!("{}({})", entry.localized, args);
            }
        }
        if let Some((number, unit)) = dict.split_canonical_unit(word) {
            return format!("{number}{unit}");
        }
        word.to_string()
    }
}

/// Remove the quotes around a single quoted string.
///
/// `"a" "b"` is two strings, not one string containing `a" "b`, and is
/// returned unchanged.
pub fn strip_quotes(value: &str) -> &str {
    const PAIRS: &[(char, char)] = &[('"', '"'), ('\'', '\''), ('“', '”'), ('「', '」')];
    for (open, close) in PAIRS {
        if let Some(inner) = value
            .strip_prefix(*open)
            .and_then(|rest| rest.strip_suffix(*close))
        {
            if inner.contains(*close) {
                return value;
            }
            return inner;
        }
    }
    value
}

fn quote(value: &str) -> String {
    if value.contains('"') {
        format!("'{value}'")
    } else {
        format!("\"{value}\"")
    }
}

/// Whether parentheses (either glyph) in `text` are balanced.
fn balanced(text: &str) -> bool {
    let mut depth = 0usize;
    for c in text.chars() {
        match c {
            '(' | '（' => depth += 1,
            ')' | '）' => match depth.checked_sub(1) {
                Some(d) => depth = d,
                None => return false,
            },
            _ => {}
        }
    }
    depth == 0
}
