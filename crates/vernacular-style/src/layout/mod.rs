//! Layout intent expansion for anchor rules.
//!
//! An anchor rule declares *where* its content should go (`--layout-mode`,
//! `--anchor-position`, `--offset-x`, `--offset-y`, `--rotation`) and the
//! [`LayoutPreprocessor`] turns that into ordinary positioning declarations
//! between parsing and canonical generation.

mod intent;
mod preprocess;

pub use intent::{
    ANCHOR_POSITION, Alignment, AnchorPosition, Edge, INTENT_PROPERTIES, LayoutIntent, LayoutMode,
    MODE, OFFSET_X, OFFSET_Y, ROTATION, is_zero, normalize_length,
};
pub use preprocess::{LayoutPreprocessor, flow_container, is_layout_property};
