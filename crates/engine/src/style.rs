//! Colour and header lookups as pure functions.
//!
//! These were process-global maps in earlier revisions of this code; they
//! are constant data, so they live in `match` tables with explicit default
//! arms instead.

use crate::model::Badge;

/// Fixed palette indexed by the name-derived hash.
pub const WAY_COLORS: [&str; 10] = [
    "#49b45d", "#3473ba", "#f67536", "#0ebdf5", "#ffb81b", "#815aa1", "#d6473d", "#704233",
    "#909093", "#68a0bd",
];

/// Deterministic theme colour for an untagged name: the sum of its character
/// code points modulo the palette size.
pub fn color_from_name(name: &str) -> &'static str {
    let sum: u32 = name.chars().map(|c| c as u32).sum();
    WAY_COLORS[(sum % WAY_COLORS.len() as u32) as usize]
}

/// Resolve a `colour` tag value to hex. Hex values pass through; the named
/// colours the tagging scheme allows map to their RGB values; anything else
/// falls back to a loud magenta so bad data is visible rather than fatal.
pub fn resolve_osm_colour(colour: &str) -> &str {
    if colour.starts_with('#') {
        return colour;
    }
    match colour {
        "black" => "#000000",
        "gray" | "grey" => "#808080",
        "maroon" => "#800000",
        "olive" => "#808000",
        "green" => "#008000",
        "teal" => "#008080",
        "navy" => "#000080",
        "purple" => "#800080",
        "white" => "#FFFFFF",
        "silver" => "#C0C0C0",
        "red" => "#FF0000",
        "yellow" => "#FFFF00",
        "lime" => "#00FF00",
        "aqua" => "#00FFFF",
        "blue" => "#0000FF",
        "fuchsia" | "magenta" => "#FF00FF",
        _ => "#FF00FF",
    }
}

/// Fill colour for a badge: explicit tag first, name-derived otherwise.
pub fn badge_fill(badge: &Badge) -> String {
    match badge.colour() {
        Some(colour) => resolve_osm_colour(colour).to_owned(),
        None => color_from_name(badge.display_key()).to_owned(),
    }
}

/// Localized scheme header for a two-letter language code. Unrecognized
/// codes fall back to the English wording.
pub fn header_for(lang: &str) -> &'static str {
    match lang {
        "ru" => "Схема маршрута",
        "en" => "Scheme of route",
        "es" => "Esquema de ruta",
        "de" => "Scheme der Route",
        "zh" => "路线方案",
        "ko" => "노선 구성표",
        _ => "Scheme of route",
    }
}
