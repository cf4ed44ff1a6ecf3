//! Static reference data used by the onboarding forms.
//!
//! Countries, social platforms and the access options shown on the final step
//! are fixed at compile time and never mutated. Lookups are pure.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde::Serialize;
use strsim::levenshtein;

/// Country applied when the business-info form leaves the field blank.
pub const DEFAULT_COUNTRY: &str = "United Kingdom";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Country {
    pub id: &'static str,
    pub name: &'static str,
}

/// Icon shown next to a linked account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PlatformIcon {
    Facebook,
    Globe,
    /// Fallback for platform ids that are not in the reference set.
    Generic,
}

impl PlatformIcon {
    pub fn glyph(self) -> &'static str {
        match self {
            PlatformIcon::Facebook => "[f]",
            PlatformIcon::Globe => "[@]",
            PlatformIcon::Generic => "[?]",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Platform {
    pub id: &'static str,
    pub name: &'static str,
    pub icon: PlatformIcon,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AccessOption {
    pub id: u8,
    pub title: &'static str,
    pub description: &'static str,
}

static COUNTRIES: [Country; 5] = [
    Country {
        id: "us",
        name: DEFAULT_COUNTRY,
    },
    Country {
        id: "ga",
        name: "Gabon",
    },
    Country {
        id: "gd",
        name: "Grenada",
    },
    Country {
        id: "kr",
        name: "Korea",
    },
    Country {
        id: "hk",
        name: "Hong Kong",
    },
];

static PLATFORMS: [Platform; 4] = [
    Platform {
        id: "facebook",
        name: "Facebook",
        icon: PlatformIcon::Facebook,
    },
    Platform {
        id: "google",
        name: "Google",
        icon: PlatformIcon::Globe,
    },
    Platform {
        id: "tripadvisor",
        name: "TripAdvisor",
        icon: PlatformIcon::Globe,
    },
    Platform {
        id: "yelp",
        name: "Yelp",
        icon: PlatformIcon::Globe,
    },
];

static ACCESS_OPTIONS: [AccessOption; 2] = [
    AccessOption {
        id: 1,
        title: "People and access",
        description: "Add, edit or remove people's access",
    },
    AccessOption {
        id: 2,
        title: "Advanced settings",
        description: "See profile ID and manage labels, shop codes and other settings",
    },
];

/// Lower-cased id and display name -> index into `PLATFORMS`.
static PLATFORM_INDEX: Lazy<HashMap<String, usize>> = Lazy::new(|| {
    let mut index = HashMap::new();
    for (position, platform) in PLATFORMS.iter().enumerate() {
        index.insert(platform.id.to_ascii_lowercase(), position);
        index.insert(platform.name.to_ascii_lowercase(), position);
    }
    index
});

const GENERIC_PLATFORM: Platform = Platform {
    id: "",
    name: "Other",
    icon: PlatformIcon::Generic,
};

pub fn countries() -> &'static [Country] {
    &COUNTRIES
}

pub fn platforms() -> &'static [Platform] {
    &PLATFORMS
}

pub fn access_options() -> &'static [AccessOption] {
    &ACCESS_OPTIONS
}

pub fn default_country() -> &'static Country {
    &COUNTRIES[0]
}

/// Case-insensitive substring search over country names, in list order.
pub fn search_countries(term: &str) -> Vec<&'static Country> {
    let needle = term.trim().to_lowercase();
    COUNTRIES
        .iter()
        .filter(|country| country.name.to_lowercase().contains(&needle))
        .collect()
}

/// Resolves a country by id or display name.
pub fn find_country(query: &str) -> Option<&'static Country> {
    let key = query.trim();
    COUNTRIES.iter().find(|country| {
        country.id.eq_ignore_ascii_case(key) || country.name.eq_ignore_ascii_case(key)
    })
}

/// Resolves a platform by id or display name, ignoring case.
pub fn resolve_platform(query: &str) -> Option<&'static Platform> {
    PLATFORM_INDEX
        .get(&query.trim().to_ascii_lowercase())
        .map(|position| &PLATFORMS[*position])
}

/// Display lookup that never fails: unknown ids get the generic icon.
pub fn platform_for_display(id: &str) -> Platform {
    resolve_platform(id).copied().unwrap_or(GENERIC_PLATFORM)
}

/// Closest platform name for a mistyped query, if any is near enough.
pub fn suggest_platform(query: &str) -> Option<&'static Platform> {
    let needle = query.trim().to_ascii_lowercase();
    if needle.is_empty() {
        return None;
    }
    PLATFORMS
        .iter()
        .map(|platform| (levenshtein(&platform.name.to_ascii_lowercase(), &needle), platform))
        .min_by_key(|(distance, _)| *distance)
        .filter(|(distance, _)| *distance <= 3)
        .map(|(_, platform)| platform)
}
