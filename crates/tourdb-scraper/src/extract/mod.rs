//! Per-page field extraction.
//!
//! [`extract_tour`] runs every field's fallback chain over one page of HTML
//! and applies the shared post-processing (whitespace, slug, excerpt, parsed
//! duration and price). [`recovery_record`] builds the error record used when
//! no usable HTML could be fetched.

pub(crate) mod chains;
mod images;
mod itinerary;

use std::collections::HashSet;

use tourdb_core::{slugify, ExtractedTour, SiteConfig};

use crate::parse::{excerpt, normalize_whitespace, parse_duration_days, parse_price, strip_site_suffix};
use crate::strategy::{element_text, first_match, Page, Strategy};

use chains::{
    DESCRIPTION_CHAIN, DESTINATION_CHAIN, DIFFICULTY_CHAIN, DURATION_CHAIN, PRICE_CHAIN,
    RECOVERY_DESCRIPTION_CHAIN, RECOVERY_TITLE_CHAIN, TITLE_CHAIN,
};

const HIGHLIGHT_SELECTORS: &[&str] = &[
    ".tour-highlights li",
    ".trip-highlights li",
    ".highlights li",
    "#highlights li",
    "[class*='highlight'] li",
];

/// Extracts a full record from a page that was fetched successfully.
#[must_use]
pub fn extract_tour(html: &str, url: &str, site: &SiteConfig) -> ExtractedTour {
    let page = Page::parse(html);
    let mut tour = ExtractedTour::blank(url);

    tour.title = extract_title(&page, TITLE_CHAIN, site);

    tour.duration_text = first_match(&page, DURATION_CHAIN).unwrap_or_default();
    tour.duration_days = parse_duration_days(&tour.duration_text);

    tour.price_text = first_match(&page, PRICE_CHAIN).unwrap_or_default();
    let (amount, currency) = parse_price(&tour.price_text).unzip();
    tour.price_amount = amount;
    tour.price_currency = currency;

    tour.description = first_match(&page, DESCRIPTION_CHAIN).unwrap_or_default();
    tour.excerpt = excerpt(&tour.description);

    tour.images = images::extract_images(&page, site.base());
    tour.itinerary = itinerary::extract_itinerary(&page);
    tour.destination = extract_destination(&page, &tour.title, site);
    tour.difficulty = first_match(&page, DIFFICULTY_CHAIN).unwrap_or_default();
    tour.highlights = extract_highlights(&page);
    tour.slug = slugify(&tour.title);

    tracing::debug!(
        url,
        title = %tour.title,
        images = tour.images.len(),
        itinerary_days = tour.itinerary.len(),
        "extracted tour page"
    );

    tour
}

/// Error record for a page whose primary fetch and retry both failed.
///
/// When any HTML came back (an unusable body, a bot wall, a truncated page),
/// a recovery pass pulls title, description and images from it and the
/// record is marked with `recovery_attempt`.
#[must_use]
pub fn recovery_record(
    url: &str,
    partial_html: Option<&str>,
    site: &SiteConfig,
    message: String,
) -> ExtractedTour {
    let mut tour = ExtractedTour::blank(url);
    tour.error = Some(true);
    tour.error_message = Some(message);

    let Some(html) = partial_html.filter(|h| !h.trim().is_empty()) else {
        return tour;
    };

    let page = Page::parse(html);
    tour.recovery_attempt = Some(true);
    tour.title = extract_title(&page, RECOVERY_TITLE_CHAIN, site);
    tour.slug = slugify(&tour.title);
    tour.description = first_match(&page, RECOVERY_DESCRIPTION_CHAIN).unwrap_or_default();
    tour.excerpt = excerpt(&tour.description);
    tour.images = images::og_image(&page, site.base()).into_iter().collect();
    tour
}

fn extract_title(page: &Page, chain: &[Strategy], site: &SiteConfig) -> String {
    first_match(page, chain)
        .map(|title| strip_site_suffix(&title, &site.site_name_suffixes))
        .unwrap_or_default()
}

/// Selectors, then a configured destination named in the title, then the default.
fn extract_destination(page: &Page, title: &str, site: &SiteConfig) -> String {
    if let Some(found) = first_match(page, DESTINATION_CHAIN) {
        return found;
    }

    let lower_title = title.to_lowercase();
    site.destinations
        .iter()
        .map(|d| normalize_whitespace(d))
        .find(|d| !d.is_empty() && lower_title.contains(&d.to_lowercase()))
        .unwrap_or_else(|| site.default_destination.clone())
}

fn extract_highlights(page: &Page) -> Vec<String> {
    for css in HIGHLIGHT_SELECTORS {
        let mut seen = HashSet::new();
        let items: Vec<String> = page
            .select_all(css)
            .into_iter()
            .map(element_text)
            .filter(|text| !text.is_empty() && seen.insert(text.clone()))
            .collect();
        if !items.is_empty() {
            return items;
        }
    }
    Vec::new()
}

#[cfg(test)]
#[path = "../extract_test.rs"]
mod tests;
