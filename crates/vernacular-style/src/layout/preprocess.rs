//! Expansion of anchor rules into concrete geometry.

use regex::Regex;
use vernacular_core::logging::targets;

use crate::Result;
use crate::config::CompilerConfig;
use crate::error::compile_pattern;
use crate::layout::intent::{Alignment, Edge, INTENT_PROPERTIES, LayoutIntent, LayoutMode, is_zero};
use crate::rules::{PropertyMap, RuleMap};

const TARGET: &str = targets::LAYOUT;

const LAYOUT_PROPERTIES: &[&str] = &[
    "position",
    "top",
    "right",
    "bottom",
    "left",
    "margin",
    "margin-top",
    "margin-right",
    "margin-bottom",
    "margin-left",
    "transform",
    "z-index",
    "order",
    "align-self",
];

/// Whether a property positions the anchor container rather than styling
/// its content.
pub fn is_layout_property(property: &str) -> bool {
    LAYOUT_PROPERTIES.contains(&property) || INTENT_PROPERTIES.contains(&property)
}

/// Rewrites anchor rules carrying a [`LayoutIntent`].
///
/// For each such rule the declarations are split into layout properties,
/// which go to the anchor container, and visual properties, which go to the
/// content selector (anchor selector + content suffix). Depending on the
/// mode, the container gets absolute (`overlay`) or in-flow (`squeeze`)
/// geometry, and in squeeze mode the nearest flow container becomes a flex
/// box. Rules without intent pass through untouched.
#[derive(Debug, Clone)]
pub struct LayoutPreprocessor {
    anchor: Regex,
    content_suffix: String,
    z_index_floor: i64,
}

impl LayoutPreprocessor {
    /// Create a preprocessor from the compiler configuration.
    pub fn new(config: &CompilerConfig) -> Result<Self> {
        Ok(Self {
            anchor: compile_pattern(&config.anchor_pattern)?,
            content_suffix: config.content_suffix.clone(),
            z_index_floor: i64::from(config.z_index_floor),
        })
    }

    /// Whether a selector names an anchor.
    pub fn is_anchor(&self, selector: &str) -> bool {
        self.anchor.is_match(selector)
    }

    /// The selector of an anchor's visual content.
    pub fn content_selector(&self, anchor: &str) -> String {
        format!("{anchor}{}", self.content_suffix)
    }

    /// Expand every anchor rule with intent.
    pub fn expand(&self, rules: &RuleMap) -> RuleMap {
        let mut out = RuleMap::new();

        for rule in rules.iter() {
            let intent = if self.is_anchor(&rule.selector) {
                LayoutIntent::from_properties(&rule.properties)
            } else {
                None
            };
            let Some(intent) = intent else {
                out.merge(&rule.selector, &rule.properties);
                continue;
            };

            tracing::debug!(
                target: TARGET,
                selector = %rule.selector,
                mode = intent.mode.as_str(),
                anchor = intent.anchor.as_str(),
                "expanding anchor rule"
            );

            let mut layout = PropertyMap::new();
            let mut visual = PropertyMap::new();
            for (property, value) in rule.properties.iter() {
                if is_layout_property(property) {
                    layout.set(property, value);
                } else {
                    visual.set(property, value);
                }
            }

            match intent.mode {
                LayoutMode::None => {}
                LayoutMode::Overlay => {
                    out.merge(&rule.selector, &self.overlay(&intent, &layout));
                }
                LayoutMode::Squeeze => {
                    out.merge(&rule.selector, &squeeze(&intent));
                    match flow_container(&rule.selector) {
                        Some(container) => out.merge(&container, &flow_rule(&intent)),
                        None => tracing::debug!(
                            target: TARGET,
                            selector = %rule.selector,
                            "anchor has no flow container"
                        ),
                    }
                }
            }
            out.merge(&self.content_selector(&rule.selector), &visual);
        }

        out.prune();
        out
    }

    fn overlay(&self, intent: &LayoutIntent, user: &PropertyMap) -> PropertyMap {
        let mut container = PropertyMap::new();
        container.set("position", "absolute");
        for side in ["top", "right", "bottom", "left"] {
            container.set(side, "auto");
        }

        let mut transforms = Vec::new();
        let anchor = intent.anchor;
        match anchor.edge() {
            Edge::Top | Edge::Bottom => {
                let edge = if anchor.edge() == Edge::Top { "top" } else { "bottom" };
                container.set(edge, intent.offset_y.as_str());
                match anchor.alignment() {
                    Alignment::Start => {
                        container.set("left", intent.offset_x.as_str());
                    }
                    Alignment::End => {
                        container.set("right", intent.offset_x.as_str());
                    }
                    Alignment::Center => {
                        container.set("left", centered(&intent.offset_x));
                        transforms.push("translateX(-50%)".to_string());
                    }
                }
            }
            Edge::Left | Edge::Right => {
                let edge = if anchor.edge() == Edge::Left { "left" } else { "right" };
                container.set(edge, intent.offset_x.as_str());
                match anchor.alignment() {
                    Alignment::Start => {
                        container.set("top", intent.offset_y.as_str());
                    }
                    Alignment::End => {
                        container.set("bottom", intent.offset_y.as_str());
                    }
                    Alignment::Center => {
                        container.set("top", centered(&intent.offset_y));
                        transforms.push("translateY(-50%)".to_string());
                    }
                }
            }
        }

        let user_z = user
            .get("z-index")
            .and_then(|z| z.trim().parse::<i64>().ok())
            .unwrap_or(self.z_index_floor);
        container.set("z-index", user_z.max(self.z_index_floor).to_string());
        container.set("margin", "0");

        if let Some(transform) = user.get("transform").filter(|t| *t != "none") {
            transforms.push(transform.to_string());
        }
        if intent.has_rotation() {
            transforms.push(format!("rotate({})", intent.rotation));
        }
        container.set("transform", transform_value(transforms));
        container
    }
}

fn squeeze(intent: &LayoutIntent) -> PropertyMap {
    let anchor = intent.anchor;
    let mut container = PropertyMap::new();
    container.set("position", "static");
    for reset in ["top", "right", "bottom", "left", "z-index"] {
        container.set(reset, "auto");
    }
    container.set("align-self", anchor.alignment().align_self());

    let (horizontal, vertical) = (
        if anchor.is_right() { "margin-right" } else { "margin-left" },
        if anchor.is_bottom() { "margin-bottom" } else { "margin-top" },
    );
    for side in ["margin-top", "margin-right", "margin-bottom", "margin-left"] {
        let value = if side == horizontal {
            intent.offset_x.as_str()
        } else if side == vertical {
            intent.offset_y.as_str()
        } else {
            "0"
        };
        container.set(side, value);
    }

    let rotation = if intent.has_rotation() {
        vec![format!("rotate({})", intent.rotation)]
    } else {
        Vec::new()
    };
    container.set("transform", transform_value(rotation));

    if anchor.comes_last() {
        container.set("order", "1");
    }
    container
}

fn flow_rule(intent: &LayoutIntent) -> PropertyMap {
    let direction = if intent.anchor.edge().is_horizontal() {
        "column"
    } else {
        "row"
    };
    PropertyMap::from_pairs([("display", "flex"), ("flex-direction", direction)])
}

/// The anchor's nearest flow container: its selector with the deepest
/// compound selector (and any combinator before it) removed.
pub fn flow_container(anchor: &str) -> Option<String> {
    let mut parts: Vec<&str> = anchor.split_whitespace().collect();
    parts.pop()?;
    while parts.last().is_some_and(|p| matches!(*p, ">" | "+" | "~")) {
        parts.pop();
    }
    if parts.is_empty() {
        None
    } else {
        Some(parts.join(" "))
    }
}

fn centered(offset: &str) -> String {
    if is_zero(offset) {
        "50%".to_string()
    } else {
        format!("calc(50% + {offset})")
    }
}

fn transform_value(parts: Vec<String>) -> String {
    if parts.is_empty() {
        "none".to_string()
    } else {
        parts.join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::intent::{ANCHOR_POSITION, AnchorPosition, MODE, OFFSET_X, OFFSET_Y, ROTATION};

    const AVATAR: &str = ".profile-card .avatar-anchor";
    const CONTENT: &str = ".profile-card .avatar-anchor > .anchor-content";

    fn preprocessor() -> LayoutPreprocessor {
        LayoutPreprocessor::new(&CompilerConfig::default()).unwrap()
    }

    fn anchor_rule(pairs: &[(&str, &str)]) -> RuleMap {
        let mut rules = RuleMap::new();
        for (property, value) in pairs {
            rules.set(AVATAR, property, *value);
        }
        rules
    }

    #[test]
    fn overlay_bottom_right() {
        let rules = anchor_rule(&[
            (MODE, "overlay"),
            (ANCHOR_POSITION, "bottom-right"),
            (OFFSET_X, "5px"),
            (OFFSET_Y, "0px"),
            ("width", "48px"),
        ]);
        let out = preprocessor().expand(&rules);

        let container = out.get(AVATAR).unwrap();
        assert_eq!(container.get("position"), Some("absolute"));
        assert_eq!(container.get("right"), Some("5px"));
        assert_eq!(container.get("bottom"), Some("0px"));
        assert_eq!(container.get("left"), Some("auto"));
        assert_eq!(container.get("z-index"), Some("10"));
        assert_eq!(container.get("transform"), Some("none"));
        assert!(!container.contains("width"));
        assert!(!container.contains(MODE));

        assert_eq!(out.value(CONTENT, "width"), Some("48px"));
        assert!(!out.contains(".profile-card"));
    }

    #[test]
    fn overlay_center_composes_transforms() {
        let rules = anchor_rule(&[
            (MODE, "overlay"),
            (ANCHOR_POSITION, "top-center"),
            (OFFSET_X, "10px"),
            (ROTATION, "15deg"),
            ("transform", "scale(1.2)"),
            ("z-index", "40"),
        ]);
        let container = preprocessor().expand(&rules).remove(AVATAR).unwrap();

        assert_eq!(container.get("left"), Some("calc(50% + 10px)"));
        assert_eq!(container.get("top"), Some("0px"));
        assert_eq!(
            container.get("transform"),
            Some("translateX(-50%) scale(1.2) rotate(15deg)")
        );
        assert_eq!(container.get("z-index"), Some("40"));
    }

    #[test]
    fn overlay_middle_centers_vertically() {
        let rules = anchor_rule(&[(MODE, "overlay"), (ANCHOR_POSITION, "left-middle")]);
        let container = preprocessor().expand(&rules).remove(AVATAR).unwrap();

        assert_eq!(container.get("left"), Some("0px"));
        assert_eq!(container.get("top"), Some("50%"));
        assert_eq!(container.get("transform"), Some("translateY(-50%)"));
    }

    #[test]
    fn squeeze_right_top() {
        let rules = anchor_rule(&[
            (MODE, "squeeze"),
            (ANCHOR_POSITION, "right-top"),
            (OFFSET_X, "4px"),
            (OFFSET_Y, "2px"),
        ]);
        let out = preprocessor().expand(&rules);

        let container = out.get(AVATAR).unwrap();
        assert_eq!(container.get("position"), Some("static"));
        assert_eq!(container.get("top"), Some("auto"));
        assert_eq!(container.get("z-index"), Some("auto"));
        assert_eq!(container.get("align-self"), Some("flex-start"));
        assert_eq!(container.get("margin-right"), Some("4px"));
        assert_eq!(container.get("margin-top"), Some("2px"));
        assert_eq!(container.get("margin-left"), Some("0"));
        assert_eq!(container.get("order"), Some("1"));

        assert_eq!(out.value(".profile-card", "display"), Some("flex"));
        assert_eq!(out.value(".profile-card", "flex-direction"), Some("row"));
    }

    #[test]
    fn squeeze_top_uses_horizontal_alignment() {
        let rules = anchor_rule(&[(MODE, "squeeze"), (ANCHOR_POSITION, "top-right")]);
        let out = preprocessor().expand(&rules);

        assert_eq!(out.value(AVATAR, "align-self"), Some("flex-end"));
        assert_eq!(out.value(AVATAR, "order"), None);
        assert_eq!(out.value(".profile-card", "flex-direction"), Some("column"));
    }

    #[test]
    fn overlay_geometry_for_every_position() {
        // position, edge, edge value, along-edge side, along-edge value, transform
        let table = [
            ("top-left", "top", "7px", "left", "3px", "none"),
            ("top-center", "top", "7px", "left", "calc(50% + 3px)", "translateX(-50%)"),
            ("top-right", "top", "7px", "right", "3px", "none"),
            ("bottom-left", "bottom", "7px", "left", "3px", "none"),
            ("bottom-center", "bottom", "7px", "left", "calc(50% + 3px)", "translateX(-50%)"),
            ("bottom-right", "bottom", "7px", "right", "3px", "none"),
            ("left-top", "left", "3px", "top", "7px", "none"),
            ("left-middle", "left", "3px", "top", "calc(50% + 7px)", "translateY(-50%)"),
            ("left-bottom", "left", "3px", "bottom", "7px", "none"),
            ("right-top", "right", "3px", "top", "7px", "none"),
            ("right-middle", "right", "3px", "top", "calc(50% + 7px)", "translateY(-50%)"),
            ("right-bottom", "right", "3px", "bottom", "7px", "none"),
        ];
        let pre = preprocessor();

        for position in AnchorPosition::ALL {
            let (_, edge, edge_value, side, side_value, transform) = table
                .iter()
                .copied()
                .find(|row| row.0 == position.as_str())
                .unwrap();
            let rules = anchor_rule(&[
                (MODE, "overlay"),
                (ANCHOR_POSITION, position.as_str()),
                (OFFSET_X, "3px"),
                (OFFSET_Y, "7px"),
            ]);
            let container = pre.expand(&rules).remove(AVATAR).unwrap();

            assert_eq!(container.get(edge), Some(edge_value), "{position}");
            assert_eq!(container.get(side), Some(side_value), "{position}");
            assert_eq!(container.get("transform"), Some(transform), "{position}");
            for other in ["top", "right", "bottom", "left"] {
                if other != edge && other != side {
                    assert_eq!(container.get(other), Some("auto"), "{position} {other}");
                }
            }
        }
    }

    #[test]
    fn squeeze_flow_for_every_position() {
        // position, align-self, horizontal margin, vertical margin, painted last, flex-direction
        let table = [
            ("top-left", "flex-start", "margin-left", "margin-top", false, "column"),
            ("top-center", "center", "margin-left", "margin-top", false, "column"),
            ("top-right", "flex-end", "margin-right", "margin-top", false, "column"),
            ("bottom-left", "flex-start", "margin-left", "margin-bottom", true, "column"),
            ("bottom-center", "center", "margin-left", "margin-bottom", true, "column"),
            ("bottom-right", "flex-end", "margin-right", "margin-bottom", true, "column"),
            ("left-top", "flex-start", "margin-left", "margin-top", false, "row"),
            ("left-middle", "center", "margin-left", "margin-top", false, "row"),
            ("left-bottom", "flex-end", "margin-left", "margin-bottom", false, "row"),
            ("right-top", "flex-start", "margin-right", "margin-top", true, "row"),
            ("right-middle", "center", "margin-right", "margin-top", true, "row"),
            ("right-bottom", "flex-end", "margin-right", "margin-bottom", true, "row"),
        ];
        let pre = preprocessor();

        for position in AnchorPosition::ALL {
            let (_, align, horizontal, vertical, last, direction) = table
                .iter()
                .copied()
                .find(|row| row.0 == position.as_str())
                .unwrap();
            let rules = anchor_rule(&[
                (MODE, "squeeze"),
                (ANCHOR_POSITION, position.as_str()),
                (OFFSET_X, "3px"),
                (OFFSET_Y, "7px"),
            ]);
            let out = pre.expand(&rules);
            let container = out.get(AVATAR).unwrap();

            assert_eq!(container.get("align-self"), Some(align), "{position}");
            assert_eq!(container.get(horizontal), Some("3px"), "{position}");
            assert_eq!(container.get(vertical), Some("7px"), "{position}");
            let zeroed = ["margin-top", "margin-right", "margin-bottom", "margin-left"]
                .into_iter()
                .filter(|m| container.get(m) == Some("0"))
                .count();
            assert_eq!(zeroed, 2, "{position}");
            assert_eq!(container.get("order"), last.then_some("1"), "{position}");
            assert_eq!(out.value(".profile-card", "flex-direction"), Some(direction), "{position}");
        }
    }

    #[test]
    fn squeeze_replaces_prior_transform() {
        let overlay = anchor_rule(&[(MODE, "overlay"), (ROTATION, "30deg"), ("transform", "scale(2)")]);
        let squeeze = anchor_rule(&[(MODE, "squeeze"), (ROTATION, "0deg"), ("transform", "scale(2)")]);
        let pre = preprocessor();

        assert_eq!(pre.expand(&overlay).value(AVATAR, "transform"), Some("scale(2) rotate(30deg)"));
        assert_eq!(pre.expand(&squeeze).value(AVATAR, "transform"), Some("none"));
    }

    #[test]
    fn mode_none_keeps_only_visual_properties() {
        let rules = anchor_rule(&[(MODE, "none"), ("position", "absolute"), ("opacity", "0.5")]);
        let out = preprocessor().expand(&rules);

        assert_eq!(out.len(), 1);
        assert_eq!(out.value(CONTENT, "opacity"), Some("0.5"));
    }

    #[test]
    fn non_anchor_and_intent_free_rules_pass_through() {
        let mut rules = RuleMap::new();
        rules.set(".card", MODE, "overlay");
        rules.set(AVATAR, "width", "1px");

        assert_eq!(preprocessor().expand(&rules), rules);
    }

    #[test]
    fn flow_container_trims_deepest_segment() {
        assert_eq!(flow_container(".a .b-anchor").as_deref(), Some(".a"));
        assert_eq!(flow_container("header > .banner-anchor").as_deref(), Some("header"));
        assert_eq!(flow_container(".solo-anchor"), None);
    }
}
