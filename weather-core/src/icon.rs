//! Condition code to display glyph lookup.

/// Glyph used when the code prefix is not in the table.
pub const FALLBACK_ICON: &str = "🌡️";

const ICONS: &[(&str, &str)] = &[
    ("01", "☀️"),
    ("02", "🌤️"),
    ("03", "☁️"),
    ("04", "☁️"),
    ("09", "🌧️"),
    ("10", "🌦️"),
    ("11", "⛈️"),
    ("13", "❄️"),
    ("50", "🌫️"),
];

/// Resolve a provider icon code (e.g. `"10n"`) to a glyph.
///
/// Only the first two characters are significant, so day and night variants
/// share a glyph.
pub fn weather_icon(code: &str) -> &'static str {
    let Some(prefix) = code.get(..2) else {
        return FALLBACK_ICON;
    };

    ICONS
        .iter()
        .find(|(p, _)| *p == prefix)
        .map(|(_, icon)| *icon)
        .unwrap_or(FALLBACK_ICON)
}
