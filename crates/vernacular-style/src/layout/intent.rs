//! Declarative layout intent carried by anchor rules.

use std::fmt;

use vernacular_core::logging::targets;

use crate::rules::PropertyMap;

/// `--layout-mode`.
pub const MODE: &str = "--layout-mode";
/// `--anchor-position`.
pub const ANCHOR_POSITION: &str = "--anchor-position";
/// `--offset-x`.
pub const OFFSET_X: &str = "--offset-x";
/// `--offset-y`.
pub const OFFSET_Y: &str = "--offset-y";
/// `--rotation`.
pub const ROTATION: &str = "--rotation";

/// Every property that carries intent.
pub const INTENT_PROPERTIES: [&str; 5] = [MODE, ANCHOR_POSITION, OFFSET_X, OFFSET_Y, ROTATION];

/// How an anchor's content is placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LayoutMode {
    /// No repositioning; only the visual properties are kept.
    #[default]
    None,
    /// The anchor takes part in its container's flow, pushing siblings aside.
    Squeeze,
    /// The anchor floats above its container.
    Overlay,
}

impl LayoutMode {
    /// Parse a canonical mode keyword.
    pub fn from_canonical(value: &str) -> Option<Self> {
        match value.trim() {
            "none" => Some(Self::None),
            "squeeze" => Some(Self::Squeeze),
            "overlay" => Some(Self::Overlay),
            _ => None,
        }
    }

    /// The canonical keyword.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Squeeze => "squeeze",
            Self::Overlay => "overlay",
        }
    }
}

/// The edge of the container an anchor attaches to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Edge {
    Top,
    Bottom,
    Left,
    Right,
}

impl Edge {
    /// Whether the edge is horizontal (top or bottom).
    pub fn is_horizontal(&self) -> bool {
        matches!(self, Self::Top | Self::Bottom)
    }
}

/// Where along its edge an anchor sits.
///
/// For top and bottom edges this runs left → right, for left and right
/// edges top → bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Alignment {
    Start,
    Center,
    End,
}

impl Alignment {
    /// The matching `align-self` value.
    pub fn align_self(&self) -> &'static str {
        match self {
            Self::Start => "flex-start",
            Self::Center => "center",
            Self::End => "flex-end",
        }
    }
}

/// One of the twelve anchor positions, named edge first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AnchorPosition {
    #[default]
    TopLeft,
    TopCenter,
    TopRight,
    BottomLeft,
    BottomCenter,
    BottomRight,
    LeftTop,
    LeftMiddle,
    LeftBottom,
    RightTop,
    RightMiddle,
    RightBottom,
}

impl AnchorPosition {
    /// All positions.
    pub const ALL: [AnchorPosition; 12] = [
        Self::TopLeft,
        Self::TopCenter,
        Self::TopRight,
        Self::BottomLeft,
        Self::BottomCenter,
        Self::BottomRight,
        Self::LeftTop,
        Self::LeftMiddle,
        Self::LeftBottom,
        Self::RightTop,
        Self::RightMiddle,
        Self::RightBottom,
    ];

    /// Parse a canonical position keyword such as `bottom-right`.
    pub fn from_canonical(value: &str) -> Option<Self> {
        let value = value.trim();
        Self::ALL.into_iter().find(|p| p.as_str() == value)
    }

    /// The canonical keyword.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TopLeft => "top-left",
            Self::TopCenter => "top-center",
            Self::TopRight => "top-right",
            Self::BottomLeft => "bottom-left",
            Self::BottomCenter => "bottom-center",
            Self::BottomRight => "bottom-right",
            Self::LeftTop => "left-top",
            Self::LeftMiddle => "left-middle",
            Self::LeftBottom => "left-bottom",
            Self::RightTop => "right-top",
            Self::RightMiddle => "right-middle",
            Self::RightBottom => "right-bottom",
        }
    }

    /// The edge named first.
    pub fn edge(&self) -> Edge {
        match self {
            Self::TopLeft | Self::TopCenter | Self::TopRight => Edge::Top,
            Self::BottomLeft | Self::BottomCenter | Self::BottomRight => Edge::Bottom,
            Self::LeftTop | Self::LeftMiddle | Self::LeftBottom => Edge::Left,
            Self::RightTop | Self::RightMiddle | Self::RightBottom => Edge::Right,
        }
    }

    /// The position along the edge.
    pub fn alignment(&self) -> Alignment {
        match self {
            Self::TopLeft | Self::BottomLeft | Self::LeftTop | Self::RightTop => Alignment::Start,
            Self::TopCenter | Self::BottomCenter | Self::LeftMiddle | Self::RightMiddle => {
                Alignment::Center
            }
            Self::TopRight | Self::BottomRight | Self::LeftBottom | Self::RightBottom => {
                Alignment::End
            }
        }
    }

    /// Whether the anchor sits on the right-hand side horizontally.
    pub fn is_right(&self) -> bool {
        match self.edge() {
            Edge::Right => true,
            Edge::Left => false,
            Edge::Top | Edge::Bottom => self.alignment() == Alignment::End,
        }
    }

    /// Whether the anchor sits on the bottom side vertically.
    pub fn is_bottom(&self) -> bool {
        match self.edge() {
            Edge::Bottom => true,
            Edge::Top => false,
            Edge::Left | Edge::Right => self.alignment() == Alignment::End,
        }
    }

    /// Whether the anchor must be painted after its siblings in flow
    /// (anchors named `bottom-*` or `right-*`).
    pub fn comes_last(&self) -> bool {
        matches!(self.edge(), Edge::Bottom | Edge::Right)
    }
}

impl fmt::Display for AnchorPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Layout intent read from an anchor rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutIntent {
    pub mode: LayoutMode,
    pub anchor: AnchorPosition,
    /// Inward distance from the horizontal anchor edge.
    pub offset_x: String,
    /// Inward distance from the vertical anchor edge.
    pub offset_y: String,
    pub rotation: String,
}

impl Default for LayoutIntent {
    fn default() -> Self {
        Self {
            mode: LayoutMode::None,
            anchor: AnchorPosition::TopLeft,
            offset_x: "0px".to_string(),
            offset_y: "0px".to_string(),
            rotation: "0deg".to_string(),
        }
    }
}

impl LayoutIntent {
    /// Read the intent from a rule's properties.
    ///
    /// Returns `None` when the rule carries no intent property at all.
    /// Unrecognized mode or position keywords fall back to the defaults.
    pub fn from_properties(properties: &PropertyMap) -> Option<Self> {
        if !INTENT_PROPERTIES.iter().any(|p| properties.contains(p)) {
            return None;
        }

        let mut intent = Self::default();
        if let Some(value) = properties.get(MODE) {
            match LayoutMode::from_canonical(value) {
                Some(mode) => intent.mode = mode,
                None => tracing::warn!(
                    target: targets::LAYOUT,
                    value,
                    "unknown layout mode, using none"
                ),
            }
        }
        if let Some(value) = properties.get(ANCHOR_POSITION) {
            match AnchorPosition::from_canonical(value) {
                Some(anchor) => intent.anchor = anchor,
                None => tracing::warn!(
                    target: targets::LAYOUT,
                    value,
                    "unknown anchor position, using top-left"
                ),
            }
        }
        if let Some(value) = properties.get(OFFSET_X) {
            intent.offset_x = normalize_length(value, "px");
        }
        if let Some(value) = properties.get(OFFSET_Y) {
            intent.offset_y = normalize_length(value, "px");
        }
        if let Some(value) = properties.get(ROTATION) {
            intent.rotation = normalize_length(value, "deg");
        }
        Some(intent)
    }

    /// Whether the rotation is zero.
    pub fn has_rotation(&self) -> bool {
        !is_zero(&self.rotation)
    }
}

/// Give a bare number a unit; anything else is kept.
pub fn normalize_length(value: &str, unit: &str) -> String {
    let value = value.trim();
    if value.is_empty() {
        return format!("0{unit}");
    }
    if value.parse::<f64>().is_ok() {
        return format!("{value}{unit}");
    }
    value.to_string()
}

/// Whether a number-with-unit value is zero, e.g. `0`, `0px`, `-0.0deg`.
pub fn is_zero(value: &str) -> bool {
    let value = value.trim();
    let split = value
        .find(|c: char| !(c.is_ascii_digit() || matches!(c, '.' | '-' | '+')))
        .unwrap_or(value.len());
    let (number, unit) = value.split_at(split);
    unit.chars().all(|c| c.is_ascii_alphabetic() || c == '%')
        && number.parse::<f64>().is_ok_and(|n| n == 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positions_round_trip_their_keywords() {
        for position in AnchorPosition::ALL {
            assert_eq!(AnchorPosition::from_canonical(position.as_str()), Some(position));
        }
        assert_eq!(AnchorPosition::from_canonical("middle"), None);
    }

    #[test]
    fn sides() {
        assert!(AnchorPosition::TopRight.is_right());
        assert!(!AnchorPosition::TopRight.is_bottom());
        assert!(AnchorPosition::RightTop.is_right());
        assert!(AnchorPosition::LeftBottom.is_bottom());
        assert!(AnchorPosition::RightTop.comes_last());
        assert!(!AnchorPosition::TopRight.comes_last());
        assert_eq!(AnchorPosition::LeftMiddle.alignment(), Alignment::Center);
    }

    #[test]
    fn intent_defaults() {
        let props = PropertyMap::from_pairs([(MODE, "overlay")]);
        let intent = LayoutIntent::from_properties(&props).unwrap();

        assert_eq!(intent.mode, LayoutMode::Overlay);
        assert_eq!(intent.anchor, AnchorPosition::TopLeft);
        assert_eq!(intent.offset_x, "0px");
        assert!(!intent.has_rotation());

        assert!(LayoutIntent::from_properties(&PropertyMap::from_pairs([("width", "1px")])).is_none());
    }

    #[test]
    fn bad_keywords_fall_back() {
        let props = PropertyMap::from_pairs([(MODE, "sideways"), (ANCHOR_POSITION, "up"), (OFFSET_X, "4")]);
        let intent = LayoutIntent::from_properties(&props).unwrap();

        assert_eq!(intent.mode, LayoutMode::None);
        assert_eq!(intent.anchor, AnchorPosition::TopLeft);
        assert_eq!(intent.offset_x, "4px");
    }

    #[test]
    fn zero_detection() {
        assert!(is_zero("0"));
        assert!(is_zero("0deg"));
        assert!(is_zero("-0.0px"));
        assert!(!is_zero("15deg"));
        assert!(!is_zero("calc(0px)"));
        assert!(!is_zero(""));
    }
}
