//! Text normalization and regex parsing for extracted field values.

use std::sync::LazyLock;

use regex::Regex;

/// Description length above which the excerpt is truncated.
pub const EXCERPT_MAX_CHARS: usize = 200;
const ELLIPSIS: &str = "...";

static WHITESPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid whitespace regex"));
static DURATION_TEXT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b\d{1,3}\s*-?\s*(?:days?|nights?)\b").expect("valid duration text regex")
});
static DURATION_DAYS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(\d{1,3})\s*-?\s*days?\b").expect("valid duration days regex")
});
static PRICE_PREFIX_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(\bUS\s?\$|\$|€|£|\b(?:USD|NPR|INR|EUR|GBP|Rs\.?))\s*([0-9][0-9,]*(?:\.[0-9]+)?)")
        .expect("valid price prefix regex")
});
static PRICE_SUFFIX_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)([0-9][0-9,]*(?:\.[0-9]+)?)\s*(USD|NPR|INR|EUR|GBP)\b")
        .expect("valid price suffix regex")
});
pub(crate) static DAY_LABEL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bday\s*(\d{1,3})\b").expect("valid day label regex"));

/// Collapses every whitespace run to a single space and trims the ends.
#[must_use]
pub fn normalize_whitespace(text: &str) -> String {
    WHITESPACE_RE.replace_all(text.trim(), " ").into_owned()
}

/// Short form of a description: verbatim up to [`EXCERPT_MAX_CHARS`]
/// characters, otherwise truncated so that the result including `...` is
/// exactly that long.
#[must_use]
pub fn excerpt(description: &str) -> String {
    if description.chars().count() <= EXCERPT_MAX_CHARS {
        return description.to_owned();
    }
    let keep = EXCERPT_MAX_CHARS - ELLIPSIS.len();
    let mut out: String = description.chars().take(keep).collect();
    out.push_str(ELLIPSIS);
    out
}

/// Day count from text such as `"14 Days / 13 Nights"` or `"7-day trek"`.
/// Nights alone do not count.
#[must_use]
pub fn parse_duration_days(text: &str) -> Option<u32> {
    DURATION_DAYS_RE
        .captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<u32>().ok())
}

/// First `<number> day(s)/night(s)` phrase in free page text.
#[must_use]
pub fn find_duration_text(page_text: &str) -> Option<String> {
    DURATION_TEXT_RE
        .find(page_text)
        .map(|m| normalize_whitespace(m.as_str()))
}

/// First currency amount in free page text, as written.
#[must_use]
pub fn find_price_text(page_text: &str) -> Option<String> {
    PRICE_PREFIX_RE
        .find(page_text)
        .or_else(|| PRICE_SUFFIX_RE.find(page_text))
        .map(|m| normalize_whitespace(m.as_str()))
}

/// `true` when `text` carries a currency symbol or code next to an amount.
#[must_use]
pub fn looks_like_price(text: &str) -> bool {
    PRICE_PREFIX_RE.is_match(text) || PRICE_SUFFIX_RE.is_match(text)
}

/// Amount and currency code from price text. Thousands separators are
/// dropped; `$` maps to `USD` and `Rs` to `NPR`.
#[must_use]
pub fn parse_price(text: &str) -> Option<(f64, String)> {
    let (symbol, number) = if let Some(caps) = PRICE_PREFIX_RE.captures(text) {
        (caps.get(1)?.as_str(), caps.get(2)?.as_str())
    } else {
        let caps = PRICE_SUFFIX_RE.captures(text)?;
        (caps.get(2)?.as_str(), caps.get(1)?.as_str())
    };

    let amount = number.replace(',', "").parse::<f64>().ok()?;
    Some((amount, currency_code(symbol).to_owned()))
}

fn currency_code(symbol: &str) -> &'static str {
    let lower = symbol.to_ascii_lowercase();
    if lower.contains('$') || lower.starts_with("usd") {
        "USD"
    } else if lower.starts_with("npr") || lower.starts_with("rs") {
        "NPR"
    } else if lower.starts_with("inr") {
        "INR"
    } else if symbol.contains('€') || lower.starts_with("eur") {
        "EUR"
    } else if symbol.contains('£') || lower.starts_with("gbp") {
        "GBP"
    } else {
        "USD"
    }
}

/// Removes a trailing site name (and the separator before it) from a page
/// title, e.g. `"Everest Trek | Guru Tours"` → `"Everest Trek"`. A title that
/// is nothing but the site name is returned unchanged.
#[must_use]
pub fn strip_site_suffix(title: &str, suffixes: &[String]) -> String {
    let mut out = normalize_whitespace(title);
    for suffix in suffixes {
        let suffix = suffix.trim();
        if suffix.is_empty() {
            continue;
        }
        let pattern = format!(r"(?i)\s*[|\-–—:·•]*\s*{}\s*$", regex::escape(suffix));
        let Ok(re) = Regex::new(&pattern) else {
            continue;
        };
        let stripped = re.replace(&out, "").trim().to_owned();
        if !stripped.is_empty() {
            out = stripped;
        }
    }
    out
}

#[cfg(test)]
#[path = "parse_test.rs"]
mod tests;
