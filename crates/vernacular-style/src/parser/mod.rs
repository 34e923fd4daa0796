//! Localized source parsing.

mod error;
mod localized;

pub use error::ParseWarning;
pub(crate) use error::Warnings;
pub use localized::{LocalizedParser, ParseOutput, split_declaration, split_declarations};
