//! Deterministic declaration order for canonical output.

use crate::rules::PropertyMap;

/// Property groups in output order: layout, box model, border, background,
/// text, effects. Properties listed nowhere sort alphabetically after all
/// of these.
pub const PRIORITY: &[&[&str]] = &[
    &[
        "display",
        "position",
        "top",
        "right",
        "bottom",
        "left",
        "z-index",
        "float",
        "flex-direction",
        "align-items",
        "justify-content",
        "align-self",
        "order",
        "gap",
    ],
    &[
        "box-sizing",
        "width",
        "min-width",
        "max-width",
        "height",
        "min-height",
        "max-height",
        "margin",
        "margin-top",
        "margin-right",
        "margin-bottom",
        "margin-left",
        "padding",
        "padding-top",
        "padding-right",
        "padding-bottom",
        "padding-left",
        "overflow",
    ],
    &[
        "border",
        "border-width",
        "border-style",
        "border-color",
        "border-radius",
        "outline",
    ],
    &[
        "background",
        "background-color",
        "background-image",
        "background-repeat",
        "background-size",
        "background-position",
        "background-attachment",
    ],
    &[
        "color",
        "font-family",
        "font-size",
        "font-weight",
        "font-style",
        "line-height",
        "text-align",
        "text-decoration",
        "letter-spacing",
        "text-shadow",
        "content",
    ],
    &[
        "opacity",
        "box-shadow",
        "filter",
        "backdrop-filter",
        "transform",
        "transition",
        "animation",
        "cursor",
        "pointer-events",
    ],
];

/// Position of a property in [`PRIORITY`], if listed.
pub fn rank(property: &str) -> Option<usize> {
    PRIORITY
        .iter()
        .flat_map(|group| group.iter())
        .position(|p| *p == property)
}

/// Declarations of a map in output order.
pub fn sorted(properties: &PropertyMap) -> Vec<(&str, &str)> {
    let mut declarations: Vec<(&str, &str)> = properties.iter().collect();
    declarations.sort_by_key(|(property, _)| match rank(property) {
        Some(index) => (0, index, ""),
        None => (1, 0, *property),
    });
    declarations
}
