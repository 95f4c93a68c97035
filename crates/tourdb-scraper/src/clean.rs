//! Turns extracted records into CMS-ready tours.

use tourdb_core::{Category, CleanedTour, ExtractedTour, SiteConfig};

/// Keyword stems per category, checked in this order; the first category
/// with any stem present in the title or description wins.
const CATEGORY_KEYWORDS: &[(Category, &[&str])] = &[
    (
        Category::Trekking,
        &["trek", "hiking", "hike", "base camp", "circuit"],
    ),
    (
        Category::Cultural,
        &["cultur", "heritage", "sightseeing", "city tour", "temple", "historic"],
    ),
    (
        Category::Wildlife,
        &["wildlife", "safari", "jungle", "national park", "bird watching"],
    ),
    (
        Category::Adventure,
        &["adventure", "rafting", "paragliding", "bungee", "climbing", "expedition", "zipline"],
    ),
    (
        Category::Pilgrimage,
        &["pilgrimage", "kailash", "muktinath", "lumbini", "spiritual"],
    ),
];

pub const PRICE_ON_REQUEST: &str = "Price on request";

/// Drops error records and derives category, display price and a definite
/// day count for the rest.
#[must_use]
pub fn clean_tours(records: Vec<ExtractedTour>, site: &SiteConfig) -> Vec<CleanedTour> {
    records
        .into_iter()
        .filter(|tour| {
            if tour.is_error() {
                tracing::debug!(url = %tour.url, "dropping failed record from output");
                false
            } else {
                true
            }
        })
        .map(|tour| clean_tour(tour, site))
        .collect()
}

fn clean_tour(mut tour: ExtractedTour, site: &SiteConfig) -> CleanedTour {
    let category = infer_category(&tour.title, &tour.description);
    let display_price = display_price(&tour);
    if tour.duration_days.is_none() {
        tour.duration_days = Some(site.default_duration_days);
    }
    CleanedTour {
        tour,
        category,
        display_price,
    }
}

/// Category from keywords in `title` and `description`.
#[must_use]
pub fn infer_category(title: &str, description: &str) -> Category {
    let haystack = format!("{title} {description}").to_lowercase();
    CATEGORY_KEYWORDS
        .iter()
        .find(|(_, stems)| stems.iter().any(|stem| haystack.contains(stem)))
        .map_or(Category::General, |(category, _)| *category)
}

/// `"USD 1,250"` from parsed amount and currency, else the raw price text,
/// else [`PRICE_ON_REQUEST`].
#[must_use]
pub fn display_price(tour: &ExtractedTour) -> String {
    if let (Some(amount), Some(currency)) = (tour.price_amount, tour.price_currency.as_deref()) {
        return format!("{currency} {}", format_amount(amount));
    }
    if !tour.price_text.trim().is_empty() {
        return tour.price_text.trim().to_owned();
    }
    PRICE_ON_REQUEST.to_owned()
}

/// Thousands-grouped amount; two decimals only when there is a fraction.
fn format_amount(amount: f64) -> String {
    let rendered = if amount.fract().abs() < f64::EPSILON {
        format!("{amount:.0}")
    } else {
        format!("{amount:.2}")
    };
    let (whole, fraction) = match rendered.split_once('.') {
        Some((whole, fraction)) => (whole.to_owned(), Some(fraction.to_owned())),
        None => (rendered, None),
    };

    let (sign, digits) = match whole.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", whole.as_str()),
    };
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    match fraction {
        Some(fraction) => format!("{sign}{grouped}.{fraction}"),
        None => format!("{sign}{grouped}"),
    }
}

#[cfg(test)]
#[path = "clean_test.rs"]
mod tests;
