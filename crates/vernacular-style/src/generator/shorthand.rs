//! Shorthand merging.
//!
//! Four margin or padding sides collapse into one shorthand, and a border
//! width/style/color triple collapses into `border`. The longhands are
//! always removed afterwards so the output never declares the same thing
//! twice.

use crate::rules::PropertyMap;
use crate::translate::components;

const SIDES: [&str; 4] = ["top", "right", "bottom", "left"];

/// Merge shorthand-able longhands in place.
pub fn merge_shorthand(properties: &mut PropertyMap) {
    merge_box(properties, "margin");
    merge_box(properties, "padding");
    merge_border(properties);
}

fn merge_box(properties: &mut PropertyMap, shorthand: &str) {
    let longhands = SIDES.map(|side| format!("{shorthand}-{side}"));
    if !longhands.iter().any(|l| properties.contains(l)) {
        return;
    }

    // Longhands override the sides of an existing shorthand.
    let mut sides: [Option<String>; 4] = match properties.get(shorthand) {
        Some(value) => match expand_box(value) {
            Some(expanded) => expanded.map(Some),
            None => return,
        },
        None => Default::default(),
    };
    for (slot, longhand) in sides.iter_mut().zip(&longhands) {
        if let Some(value) = properties.get(longhand) {
            *slot = Some(value.to_string());
        }
    }

    let [Some(top), Some(right), Some(bottom), Some(left)] = sides else {
        return;
    };
    properties.set(shorthand, collapse_box([&top, &right, &bottom, &left]));
    for longhand in &longhands {
        properties.remove(longhand);
    }
}

fn merge_border(properties: &mut PropertyMap) {
    const PARTS: [&str; 3] = ["border-width", "border-style", "border-color"];

    let mut values = Vec::with_capacity(PARTS.len());
    for part in PARTS {
        match properties.get(part) {
            Some(value) if components::word_count(value) == 1 => values.push(value.to_string()),
            _ => return,
        }
    }

    properties.set("border", values.join(" "));
    for part in PARTS {
        properties.remove(part);
    }
}

/// Expand a 1–4 value box shorthand into top/right/bottom/left.
pub fn expand_box(value: &str) -> Option<[String; 4]> {
    let words: Vec<String> = components::split(value)
        .into_iter()
        .map(|piece| match piece {
            components::Piece::Word(word) => Some(word.to_string()),
            components::Piece::Comma => None,
        })
        .collect::<Option<_>>()?;

    match words.as_slice() {
        [a] => Some([a.clone(), a.clone(), a.clone(), a.clone()]),
        [v, h] => Some([v.clone(), h.clone(), v.clone(), h.clone()]),
        [t, h, b] => Some([t.clone(), h.clone(), b.clone(), h.clone()]),
        [t, r, b, l] => Some([t.clone(), r.clone(), b.clone(), l.clone()]),
        _ => None,
    }
}

/// Collapse top/right/bottom/left into the shortest equivalent shorthand.
pub fn collapse_box([top, right, bottom, left]: [&str; 4]) -> String {
    if top == right && right == bottom && bottom == left {
        top.to_string()
    } else if top == bottom && right == left {
        format!("{top} {right}")
    } else if right == left {
        format!("{top} {right} {bottom}")
    } else {
        format!("{top} {right} {bottom} {left}")
    }
}
