//! Swatch colour resolution and light-colour classification.

/// Fallback swatch when nothing else resolves.
const FALLBACK_HEX: &str = "#cccccc";

/// Built-in colour name/slug -> hex table.
///
/// Covers the garment colours the storefront actually stocks; anything else
/// needs explicit per-term hex metadata or falls back to neutral grey.
static COLOR_MAP: &[(&str, &str)] = &[
    ("black", "#000000"),
    ("white", "#ffffff"),
    ("red", "#ff0000"),
    ("blue", "#0000ff"),
    ("navy", "#1e3a5f"),
    ("royal-blue", "#4169e1"),
    ("sky-blue", "#87ceeb"),
    ("light-blue", "#add8e6"),
    ("green", "#008000"),
    ("lime", "#00ff00"),
    ("forest-green", "#228b22"),
    ("yellow", "#ffff00"),
    ("gold", "#ffd700"),
    ("orange", "#ffa500"),
    ("pink", "#ffc0cb"),
    ("hot-pink", "#ff69b4"),
    ("purple", "#800080"),
    ("violet", "#ee82ee"),
    ("brown", "#8b4513"),
    ("tan", "#d2b48c"),
    ("beige", "#f5f5dc"),
    ("cream", "#fffdd0"),
    ("grey", "#808080"),
    ("gray", "#808080"),
    ("light-grey", "#d3d3d3"),
    ("dark-grey", "#a9a9a9"),
    ("charcoal", "#36454f"),
    ("silver", "#c0c0c0"),
    ("maroon", "#800000"),
    ("teal", "#008080"),
    ("cyan", "#00ffff"),
    ("coral", "#ff7f50"),
    ("salmon", "#fa8072"),
    ("burgundy", "#800020"),
    ("khaki", "#c3b091"),
    ("olive", "#808000"),
    ("heather-grey", "#b6b6b4"),
];

fn lookup(key: &str) -> Option<&'static str> {
    COLOR_MAP
        .iter()
        .find(|(name, _)| *name == key)
        .map(|(_, hex)| *hex)
}

/// Resolve a colour term to a swatch hex value.
///
/// Resolution order:
/// 1. Explicit per-term hex metadata (must start with `#`)
/// 2. Built-in colour table, slug first, then name (lowercased,
///    spaces -> hyphens)
/// 3. Fallback neutral grey
///
/// Total: always returns a value.
#[must_use]
pub fn resolve_swatch_color(name: &str, slug: &str, explicit_hex: Option<&str>) -> String {
    if let Some(hex) = explicit_hex
        && !hex.is_empty()
        && hex.starts_with('#')
    {
        return hex.to_owned();
    }

    let slug_key = slug.to_lowercase();
    if !slug_key.is_empty()
        && let Some(hex) = lookup(&slug_key)
    {
        return hex.to_owned();
    }

    let name_key = name.to_lowercase().replace(' ', "-");
    if let Some(hex) = lookup(&name_key) {
        return hex.to_owned();
    }

    FALLBACK_HEX.to_owned()
}

/// Classify a swatch as light: all of R, G, B strictly above 200.
///
/// Accepts 3- or 6-digit hex with or without the leading `#`. Malformed
/// input is never light.
#[must_use]
pub fn is_light_color(hex: &str) -> bool {
    decode_hex_rgb(hex).is_some_and(|(r, g, b)| r > 200 && g > 200 && b > 200)
}

fn decode_hex_rgb(hex: &str) -> Option<(u8, u8, u8)> {
    let digits = hex.strip_prefix('#').unwrap_or(hex);

    let expanded: String = if digits.len() == 3 {
        digits.chars().flat_map(|c| [c, c]).collect()
    } else {
        digits.to_owned()
    };

    if expanded.len() != 6 {
        return None;
    }

    let r = u8::from_str_radix(expanded.get(0..2)?, 16).ok()?;
    let g = u8::from_str_radix(expanded.get(2..4)?, 16).ok()?;
    let b = u8::from_str_radix(expanded.get(4..6)?, 16).ok()?;
    Some((r, g, b))
}
