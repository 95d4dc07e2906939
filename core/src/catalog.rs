//! Static category and event catalog.
//!
//! Content data consumed by the pages and by `GET /api/events`. This is
//! deliberately a compile-time catalog, not a stored collection.

use serde::Serialize;

/// An event category shown on the categories grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Category {
    pub id: &'static str,
    pub name: &'static str,
    pub img: &'static str,
    pub desc: &'static str,
}

/// A showcase event on the previous/upcoming pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ShowcaseEvent {
    pub name: &'static str,
    pub img: &'static str,
}

/// The full catalog served by `GET /api/events`.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct EventCatalog {
    pub categories: &'static [Category],
    pub previous: &'static [ShowcaseEvent],
    pub upcoming: &'static [ShowcaseEvent],
}

pub const CATEGORIES: &[Category] = &[
    Category {
        id: "sports",
        name: "Sports",
        img: "/images/sports.png",
        desc: "Organized tournaments, matches, and sports events.",
    },
    Category {
        id: "corporate",
        name: "Corporate",
        img: "/images/corporate.png",
        desc: "Professional conferences, meetings, and corporate events.",
    },
    Category {
        id: "social",
        name: "Social",
        img: "/images/social.png",
        desc: "Weddings, birthdays, baby showers, and social gatherings.",
    },
    Category {
        id: "educational",
        name: "Educational",
        img: "/images/educational.png",
        desc: "Workshops, seminars, and educational events.",
    },
    Category {
        id: "cultural",
        name: "Cultural",
        img: "/images/cultural.png",
        desc: "Festivals, concerts, and cultural celebrations.",
    },
    Category {
        id: "community",
        name: "Community",
        img: "/images/community.png",
        desc: "Community programs, awareness events, and local gatherings.",
    },
];

pub const PREVIOUS_EVENTS: &[ShowcaseEvent] = &[
    ShowcaseEvent {
        name: "Corporate Summit 2024",
        img: "/images/previous1.png",
    },
    ShowcaseEvent {
        name: "Wedding Gala",
        img: "/images/previous2.png",
    },
];

pub const UPCOMING_EVENTS: &[ShowcaseEvent] = &[
    ShowcaseEvent {
        name: "Tech Meet 2025",
        img: "/images/upcoming1.png",
    },
    ShowcaseEvent {
        name: "Cultural Festival",
        img: "/images/upcoming2.png",
    },
];

/// Look up a category by its URL id.
pub fn category(id: &str) -> Option<&'static Category> {
    CATEGORIES.iter().find(|c| c.id == id)
}

/// The catalog in the shape `GET /api/events` serves.
pub fn event_catalog() -> EventCatalog {
    EventCatalog {
        categories: CATEGORIES,
        previous: PREVIOUS_EVENTS,
        upcoming: UPCOMING_EVENTS,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn category_lookup_by_id() {
        assert_eq!(category("sports").map(|c| c.name), Some("Sports"));
        assert_eq!(category("corporate").map(|c| c.name), Some("Corporate"));
        assert_eq!(category("weddings"), None);
    }

    #[test]
    fn catalog_serializes_with_all_sections() {
        let json = serde_json::to_value(event_catalog()).unwrap();
        assert_eq!(json["categories"].as_array().unwrap().len(), 6);
        assert_eq!(json["previous"].as_array().unwrap().len(), 2);
        assert_eq!(json["upcoming"].as_array().unwrap().len(), 2);
        assert_eq!(json["categories"][0]["id"], "sports");
    }
}
