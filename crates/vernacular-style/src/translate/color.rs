//! Hex color ↔ channel triplet conversion.
//!
//! Theme channel properties (names ending in `-rgb`) hold a bare
//! `r, g, b` triplet so they can be used as `rgba(var(--theme-rgb), 0.5)`.
//! Authors write them as hex colors.

/// Parse `#RGB` or `#RRGGBB` into channels.
pub fn parse_hex(value: &str) -> Option<[u8; 3]> {
    let hex = value.trim().strip_prefix('#')?;
    if !hex.is_ascii() {
        return None;
    }

    match hex.len() {
        3 => {
            // #RGB -> #RRGGBB
            let r = u8::from_str_radix(&hex[0..1], 16).ok()? * 17;
            let g = u8::from_str_radix(&hex[1..2], 16).ok()? * 17;
            let b = u8::from_str_radix(&hex[2..3], 16).ok()? * 17;
            Some([r, g, b])
        }
        6 => {
            let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
            let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
            let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
            Some([r, g, b])
        }
        _ => None,
    }
}

/// Parse an `r, g, b` triplet.
pub fn parse_triplet(value: &str) -> Option<[u8; 3]> {
    let mut channels = [0u8; 3];
    let mut parts = value.split(',');
    for channel in &mut channels {
        *channel = parts.next()?.trim().parse().ok()?;
    }
    if parts.next().is_some() {
        return None;
    }
    Some(channels)
}

/// `#ff8800` → `255, 136, 0`.
pub fn hex_to_triplet(value: &str) -> Option<String> {
    parse_hex(value).map(|[r, g, b]| format!("{r}, {g}, {b}"))
}

/// `255, 136, 0` → `#ff8800`.
pub fn triplet_to_hex(value: &str) -> Option<String> {
    parse_triplet(value).map(|[r, g, b]| format!("#{r:02x}{g:02x}{b:02x}"))
}
