//! Tour records produced by the scraper and written to the CMS import file.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One day of a tour itinerary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItineraryDay {
    pub day: u32,
    pub title: String,
    pub description: String,
}

/// Everything extracted from a single tour page.
///
/// `url` is always set and equals the page that was requested. Every other
/// field is best-effort; string fields are empty when nothing matched. A
/// record with `error == Some(true)` guarantees only `url` and `scraped_at`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedTour {
    pub title: String,
    pub url: String,
    pub duration_text: String,
    pub duration_days: Option<u32>,
    pub price_text: String,
    pub price_amount: Option<f64>,
    pub price_currency: Option<String>,
    pub description: String,
    pub excerpt: String,
    pub images: Vec<String>,
    pub itinerary: Vec<ItineraryDay>,
    pub destination: String,
    pub difficulty: String,
    pub highlights: Vec<String>,
    pub slug: String,
    pub scraped_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    /// Set on error records whose title/description/images came from a
    /// degraded pass over partial HTML.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recovery_attempt: Option<bool>,
}

impl ExtractedTour {
    /// An empty record for `url`, stamped now.
    #[must_use]
    pub fn blank(url: &str) -> Self {
        Self {
            title: String::new(),
            url: url.to_owned(),
            duration_text: String::new(),
            duration_days: None,
            price_text: String::new(),
            price_amount: None,
            price_currency: None,
            description: String::new(),
            excerpt: String::new(),
            images: Vec::new(),
            itinerary: Vec::new(),
            destination: String::new(),
            difficulty: String::new(),
            highlights: Vec::new(),
            slug: String::new(),
            scraped_at: Utc::now(),
            error: None,
            error_message: None,
            recovery_attempt: None,
        }
    }

    #[must_use]
    pub fn is_error(&self) -> bool {
        self.error == Some(true)
    }
}

/// Tour category, inferred from keywords in the title and description.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    Trekking,
    Cultural,
    Wildlife,
    Adventure,
    Pilgrimage,
    General,
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Category::Trekking => write!(f, "Trekking"),
            Category::Cultural => write!(f, "Cultural"),
            Category::Wildlife => write!(f, "Wildlife"),
            Category::Adventure => write!(f, "Adventure"),
            Category::Pilgrimage => write!(f, "Pilgrimage"),
            Category::General => write!(f, "General"),
        }
    }
}

/// A successfully extracted tour, ready for CMS import.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CleanedTour {
    #[serde(flatten)]
    pub tour: ExtractedTour,
    pub category: Category,
    pub display_price: String,
}

/// URL-safe slug: lowercase, every run of non-alphanumeric characters
/// collapsed to one `-`, no leading or trailing `-`.
#[must_use]
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_dash = false;
    for c in text.chars().flat_map(char::to_lowercase) {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c);
        } else {
            pending_dash = true;
        }
    }
    slug
}
