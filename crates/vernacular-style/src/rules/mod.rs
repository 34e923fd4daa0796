//! Rules and rule maps.

mod rule;
mod stylesheet;

pub use rule::{PropertyMap, StyleRule};
pub use stylesheet::RuleMap;
