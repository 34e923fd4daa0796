//! Property-specific value handling.
//!
//! Most values translate the same way whatever property they belong to.
//! The exceptions are listed in [`HANDLERS`]: the first entry whose matcher
//! accepts a property decides how that property's values are treated.

use crate::dictionary::Dictionary;

/// How a property's values deviate from generic translation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandlerKind {
    /// Text content: quotes are restored after translation and the value is
    /// otherwise left alone.
    Quoted,
    /// Theme channel: a hex color becomes an `r, g, b` triplet.
    ChannelTriplet,
    /// Function list (`transform`, `filter`): every component is a call.
    FunctionList,
    /// The property has its own keyword enumeration, consulted before the
    /// global keyword table for each component.
    Enumerated,
}

/// Which properties a handler applies to.
#[derive(Debug, Clone, Copy)]
pub enum PropertyMatch {
    /// One of the listed property names.
    Exact(&'static [&'static str]),
    /// Any property whose name ends with the suffix.
    Suffix(&'static str),
    /// Any property with a scoped enumeration in the dictionary.
    Scoped,
}

impl PropertyMatch {
    fn accepts(&self, property: &str, dictionary: &Dictionary) -> bool {
        match self {
            Self::Exact(names) => names.contains(&property),
            Self::Suffix(suffix) => property.ends_with(suffix),
            Self::Scoped => dictionary.enumeration(property).is_some(),
        }
    }
}

/// The handler table, in priority order.
pub const HANDLERS: &[(PropertyMatch, HandlerKind)] = &[
    (PropertyMatch::Exact(&["content"]), HandlerKind::Quoted),
    (PropertyMatch::Suffix("-rgb"), HandlerKind::ChannelTriplet),
    (
        PropertyMatch::Exact(&["transform", "filter", "backdrop-filter"]),
        HandlerKind::FunctionList,
    ),
    (PropertyMatch::Scoped, HandlerKind::Enumerated),
];

/// Find the handler for a canonical property.
pub fn handler_for(property: &str, dictionary: &Dictionary) -> Option<HandlerKind> {
    HANDLERS
        .iter()
        .find(|(matcher, _)| matcher.accepts(property, dictionary))
        .map(|(_, kind)| *kind)
}
