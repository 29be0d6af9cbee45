// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

//! Static status/category lookup tables for list-view badges.

use crate::model::ResourceKind;

pub const PILL_BASE: &str = "text-xs px-3 py-1 rounded-full font-semibold";
pub const TAG_BASE: &str = "text-xs font-medium px-3 py-1 rounded-lg whitespace-nowrap";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tone {
    Gray,
    Yellow,
    Green,
    Blue,
    Red,
    Cyan,
    Indigo,
    Purple,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Badge {
    pub tone: Tone,
    pub colors: &'static str,
}

const fn badge(tone: Tone, colors: &'static str) -> Badge {
    Badge { tone, colors }
}

const NEUTRAL_STATUS: Badge = badge(Tone::Gray, "bg-gray-100 text-gray-600");
const NEUTRAL_CATEGORY: Badge = badge(Tone::Gray, "bg-gray-100 text-gray-700");

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StyleTable {
    pub entries: &'static [(&'static str, Badge)],
    pub fallback: Badge,
    pub base: &'static str,
}

impl StyleTable {
    /// Looks up `value` lower-cased; unmapped values, including ones with
    /// surrounding whitespace, get the table's fallback.
    pub fn badge(&self, value: &str) -> Badge {
        let key = value.to_lowercase();
        self.entries
            .iter()
            .find(|(candidate, _)| *candidate == key)
            .map_or(self.fallback, |(_, badge)| *badge)
    }

    pub fn class_name(&self, value: &str) -> String {
        format!("{} {}", self.badge(value).colors, self.base)
    }
}

pub static RESERVATION_STATUS_STYLES: StyleTable = StyleTable {
    entries: &[
        ("upcoming", badge(Tone::Yellow, "bg-yellow-100 text-yellow-700")),
        ("ongoing", badge(Tone::Green, "bg-green-100 text-green-700")),
        ("archived/delivered", badge(Tone::Gray, "bg-gray-200 text-gray-700")),
    ],
    fallback: NEUTRAL_STATUS,
    base: PILL_BASE,
};

pub static RESERVATION_CATEGORY_STYLES: StyleTable = StyleTable {
    entries: &[
        ("co-working", badge(Tone::Cyan, "bg-cyan-100 text-cyan-700")),
        ("virtual", badge(Tone::Blue, "bg-blue-100 text-blue-700")),
        ("private", badge(Tone::Indigo, "bg-indigo-100 text-indigo-700")),
        ("meeting", badge(Tone::Purple, "bg-purple-100 text-purple-700")),
    ],
    fallback: NEUTRAL_CATEGORY,
    base: PILL_BASE,
};

pub static TICKET_STATUS_STYLES: StyleTable = StyleTable {
    entries: &[
        ("pending", badge(Tone::Red, "bg-red-100 text-red-700")),
        ("ongoing", badge(Tone::Green, "bg-green-100 text-green-700")),
        ("archived/delivered", badge(Tone::Blue, "bg-blue-100 text-blue-700")),
    ],
    fallback: NEUTRAL_STATUS,
    base: PILL_BASE,
};

pub static TICKET_CATEGORY_STYLES: StyleTable = StyleTable {
    entries: &[
        ("technical", badge(Tone::Green, "bg-green-100 text-green-700")),
        ("billing", badge(Tone::Blue, "bg-blue-100 text-blue-700")),
        ("support", badge(Tone::Yellow, "bg-yellow-100 text-yellow-700")),
        ("bug", badge(Tone::Red, "bg-red-100 text-red-700")),
    ],
    fallback: NEUTRAL_CATEGORY,
    base: TAG_BASE,
};

pub static LOG_LEVEL_STYLES: StyleTable = StyleTable {
    entries: &[
        ("info", badge(Tone::Blue, "bg-blue-100 text-blue-700")),
        ("warning", badge(Tone::Yellow, "bg-yellow-100 text-yellow-700")),
        ("error", badge(Tone::Red, "bg-red-100 text-red-700")),
    ],
    fallback: NEUTRAL_STATUS,
    base: PILL_BASE,
};

pub static LOG_CATEGORY_STYLES: StyleTable = StyleTable {
    entries: &[
        ("auth", badge(Tone::Indigo, "bg-indigo-100 text-indigo-700")),
        ("reservation", badge(Tone::Cyan, "bg-cyan-100 text-cyan-700")),
        ("ticket", badge(Tone::Purple, "bg-purple-100 text-purple-700")),
        ("system", badge(Tone::Gray, "bg-gray-200 text-gray-700")),
    ],
    fallback: NEUTRAL_CATEGORY,
    base: TAG_BASE,
};

pub fn status_styles(kind: ResourceKind) -> &'static StyleTable {
    match kind {
        ResourceKind::Reservations => &RESERVATION_STATUS_STYLES,
        ResourceKind::Tickets => &TICKET_STATUS_STYLES,
        ResourceKind::Logs => &LOG_LEVEL_STYLES,
    }
}

pub fn category_styles(kind: ResourceKind) -> &'static StyleTable {
    match kind {
        ResourceKind::Reservations => &RESERVATION_CATEGORY_STYLES,
        ResourceKind::Tickets => &TICKET_CATEGORY_STYLES,
        ResourceKind::Logs => &LOG_CATEGORY_STYLES,
    }
}
