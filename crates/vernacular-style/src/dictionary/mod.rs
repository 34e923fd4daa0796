//! The alias dictionary.
//!
//! Four independent bidirectional tables (elements, properties, keywords,
//! units), property-scoped keyword enumerations, the localized function
//! table, and the category list used to group generated source. A
//! [`Dictionary`] is built once and shared immutably (`Arc<Dictionary>`) by
//! the translator, parser and generator.

mod builtin;
mod functions;
mod table;

use std::collections::HashMap;

use regex::Regex;

use crate::Result;
use crate::config::AliasConfig;
use crate::error::compile_pattern;

pub use functions::{FunctionPattern, FunctionTable};
pub use table::AliasTable;

const NUMBER: &str = r"-?(?:\d+(?:\.\d+)?|\.\d+)";

/// A named group of selectors in generated localized source.
#[derive(Debug, Clone)]
pub struct Category {
    /// Header text.
    pub title: String,
    /// Position among headers when generating.
    pub rank: u8,
    pattern: Regex,
}

impl Category {
    /// Whether a selector belongs to this category.
    pub fn matches(&self, selector: &str) -> bool {
        self.pattern.is_match(selector)
    }
}

/// Immutable lookup tables for the localized dialect.
#[derive(Debug, Clone)]
pub struct Dictionary {
    elements: AliasTable,
    properties: AliasTable,
    keywords: AliasTable,
    units: AliasTable,
    enumerations: HashMap<String, AliasTable>,
    functions: FunctionTable,
    categories: Vec<Category>,
    fallback_category: String,
    localized_unit: Regex,
    canonical_unit: Regex,
}

impl Dictionary {
    /// Build the built-in dictionary.
    pub fn builtin() -> Result<Self> {
        Self::with_aliases(&AliasConfig::default())
    }

    /// Build the built-in dictionary with user aliases appended to each table.
    ///
    /// Appended aliases resolve normally but never replace a built-in display
    /// alias for a canonical token that already has one.
    pub fn with_aliases(extra: &AliasConfig) -> Result<Self> {
        let elements = chain(builtin::ELEMENTS, &extra.elements);
        let properties = chain(builtin::PROPERTIES, &extra.properties);
        let keywords = chain(builtin::KEYWORDS, &extra.keywords);
        let units = chain(builtin::UNITS, &extra.units);

        let mut enumerations: HashMap<String, AliasTable> = HashMap::new();
        for (properties, entries) in builtin::ENUMERATIONS {
            for property in *properties {
                let table = enumerations.entry((*property).to_string()).or_default();
                for (alias, canonical) in *entries {
                    table.register(*alias, *canonical);
                }
            }
        }

        let functions = FunctionTable::new(
            builtin::FUNCTIONS
                .iter()
                .map(|(localized, canonical, args)| FunctionPattern::new(*localized, *canonical, *args))
                .collect::<Result<Vec<_>>>()?,
        )?;

        let categories = builtin::CATEGORIES
            .iter()
            .map(|(title, pattern, rank)| {
                Ok(Category {
                    title: (*title).to_string(),
                    rank: *rank,
                    pattern: compile_pattern(pattern)?,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let localized_unit = unit_pattern(units.pairs().map(|(alias, _)| alias), r"\s*")?;
        let canonical_unit = unit_pattern(units.pairs().map(|(_, canonical)| canonical), "")?;

        Ok(Self {
            elements,
            properties,
            keywords,
            units,
            enumerations,
            functions,
            categories,
            fallback_category: builtin::FALLBACK_CATEGORY.to_string(),
            localized_unit,
            canonical_unit,
        })
    }

    /// Resolve an element alias to a selector; unknown input is taken as a raw selector.
    pub fn resolve_element<'a>(&'a self, alias: &'a str) -> &'a str {
        self.elements.resolve(alias)
    }

    /// Display alias for a selector, or the selector itself.
    pub fn localize_element<'a>(&'a self, selector: &'a str) -> &'a str {
        self.elements.localize(selector)
    }

    /// Resolve a property alias; unknown input passes through.
    pub fn resolve_property<'a>(&'a self, alias: &'a str) -> &'a str {
        self.properties.resolve(alias)
    }

    /// Display alias for a canonical property, or the property itself.
    pub fn localize_property<'a>(&'a self, property: &'a str) -> &'a str {
        self.properties.localize(property)
    }

    /// Resolve a keyword alias; unknown input passes through.
    pub fn resolve_keyword<'a>(&'a self, alias: &'a str) -> &'a str {
        self.keywords.resolve(alias)
    }

    /// The element table.
    pub fn elements(&self) -> &AliasTable {
        &self.elements
    }

    /// The property table.
    pub fn properties(&self) -> &AliasTable {
        &self.properties
    }

    /// The global keyword table.
    pub fn keywords(&self) -> &AliasTable {
        &self.keywords
    }

    /// The unit table.
    pub fn units(&self) -> &AliasTable {
        &self.units
    }

    /// The keyword enumeration scoped to a canonical property, if any.
    pub fn enumeration(&self, property: &str) -> Option<&AliasTable> {
        self.enumerations.get(property)
    }

    /// The localized function table.
    pub fn functions(&self) -> &FunctionTable {
        &self.functions
    }

    /// Split `<number><localized-unit>` into the number and the canonical unit.
    pub fn split_localized_unit<'v>(&self, value: &'v str) -> Option<(&'v str, &str)> {
        let caps = self.localized_unit.captures(value)?;
        let number = caps.get(1)?.as_str();
        let unit = self.units.get(caps.get(2)?.as_str())?;
        Some((number, unit))
    }

    /// Split `<number><canonical-unit>` into the number and the localized unit.
    pub fn split_canonical_unit<'v>(&self, value: &'v str) -> Option<(&'v str, &str)> {
        let caps = self.canonical_unit.captures(value)?;
        let number = caps.get(1)?.as_str();
        let unit = self.units.alias_of(caps.get(2)?.as_str())?;
        Some((number, unit))
    }

    /// Categories sorted by display rank.
    pub fn categories_by_rank(&self) -> Vec<&Category> {
        let mut sorted: Vec<&Category> = self.categories.iter().collect();
        sorted.sort_by_key(|c| c.rank);
        sorted
    }

    /// Title of the category a selector belongs to.
    pub fn category_of(&self, selector: &str) -> &str {
        self.categories
            .iter()
            .find(|c| c.matches(selector))
            .map_or(self.fallback_category.as_str(), |c| c.title.as_str())
    }

    /// Title used for selectors outside every category.
    pub fn fallback_category(&self) -> &str {
        &self.fallback_category
    }
}

/// Whether a name contains selector syntax rather than being a bare alias.
pub fn looks_like_selector(name: &str) -> bool {
    name.chars()
        .any(|c| matches!(c, '.' | '#' | '[' | ']' | '>' | '*' | '+' | '~' | ' ' | ':' | '(' | ')'))
        || name.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

fn chain(builtin: &[(&str, &str)], extra: &std::collections::BTreeMap<String, String>) -> AliasTable {
    let mut table = AliasTable::from_pairs(builtin.iter().copied());
    for (alias, canonical) in extra {
        table.register(alias.as_str(), canonical.as_str());
    }
    table
}

fn unit_pattern<'a>(units: impl Iterator<Item = &'a str>, gap: &str) -> Result<Regex> {
    let mut units: Vec<&str> = units.collect();
    // Longest first so `根字` wins over `字` and `ms` over `s`.
    units.sort_by_key(|u| std::cmp::Reverse(u.chars().count()));
    let alternation = units
        .iter()
        .map(|u| regex::escape(u))
        .collect::<Vec<_>>()
        .join("|");
    compile_pattern(&format!(r"^({NUMBER}){gap}({alternation})$"))
}
