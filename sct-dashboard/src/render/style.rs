//! Style tables keyed by a record's status or type field.
//!
//! Every lookup has a fallback, so an unrecognised key still renders.

/// Signal marker colours.
pub const SIGNAL_COLORS: &[(&str, &str)] = &[("green", "#00aa00"), ("red", "#ff0000")];
pub const SIGNAL_FALLBACK_COLOR: &str = "#aa8800";

pub const POI_GLYPHS: &[(&str, &str)] = &[
    ("monument", "🗽"),
    ("park", "🌳"),
    ("landmark", "🏛️"),
    ("entertainment", "🎡"),
    ("museum", "🏛️"),
    ("attraction", "⛲"),
    ("beach", "🏖️"),
];
pub const POI_FALLBACK_GLYPH: &str = "📍";

/// Font Awesome icon classes for emergency services.
pub const EMERGENCY_ICONS: &[(&str, &str)] = &[
    ("hospital", "fa-hospital"),
    ("police", "fa-shield-alt"),
    ("fire_station", "fa-fire-extinguisher"),
];
pub const EMERGENCY_FALLBACK_ICON: &str = "fa-building";

pub const DISASTER_COLORS: &[(&str, &str)] = &[
    ("flood", "#1e90ff"),
    ("earthquake", "#8b4513"),
    ("hurricane", "#ff6347"),
];
pub const DISASTER_FALLBACK_COLOR: &str = "#ff0000";

pub const REPORT_GLYPHS: &[(&str, &str)] = &[
    ("accident", "🚗💥"),
    ("congestion", "🚦"),
    ("construction", "🚧"),
    ("hazard", "⚠️"),
    ("police", "👮"),
    ("closure", "🚫"),
];
pub const REPORT_FALLBACK_GLYPH: &str = "📢";

/// Exact-match lookup in a style table.
pub fn lookup(table: &[(&str, &'static str)], key: &str, fallback: &'static str) -> &'static str {
    table
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, v)| *v)
        .unwrap_or(fallback)
}

pub fn signal_color(status: &str) -> &'static str {
    lookup(SIGNAL_COLORS, status, SIGNAL_FALLBACK_COLOR)
}

pub fn poi_glyph(category: &str) -> &'static str {
    lookup(POI_GLYPHS, category, POI_FALLBACK_GLYPH)
}

pub fn emergency_icon(kind: &str) -> &'static str {
    lookup(EMERGENCY_ICONS, kind, EMERGENCY_FALLBACK_ICON)
}

pub fn disaster_color(kind: &str) -> &'static str {
    lookup(DISASTER_COLORS, kind, DISASTER_FALLBACK_COLOR)
}

pub fn report_glyph(kind: &str) -> &'static str {
    lookup(REPORT_GLYPHS, kind, REPORT_FALLBACK_GLYPH)
}

/// Parking availability tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Availability {
    Plentiful,
    Moderate,
    Scarce,
}

impl Availability {
    /// More than 50 free spaces is plentiful, more than 10 moderate.
    pub fn from_available(available: u32) -> Self {
        if available > 50 {
            Availability::Plentiful
        } else if available > 10 {
            Availability::Moderate
        } else {
            Availability::Scarce
        }
    }

    pub const fn color(self) -> &'static str {
        match self {
            Availability::Plentiful => "#00aa00",
            Availability::Moderate => "#ff8c00",
            Availability::Scarce => "#ff0000",
        }
    }
}
