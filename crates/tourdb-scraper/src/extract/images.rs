use std::collections::HashSet;

use scraper::ElementRef;

use crate::client::resolve_url;
use crate::strategy::{select_within, Page};

const GALLERY_SELECTORS: &[&str] = &[
    ".tour-gallery",
    ".trip-gallery",
    ".gallery",
    ".slider",
    ".carousel",
    ".swiper-wrapper",
    "[class*='gallery']",
];

/// Lazy-loading plugins move the real URL out of `src`.
const SOURCE_ATTRS: &[&str] = &["src", "data-src", "data-original", "data-lazy-src"];

/// Images with a declared width or height at or below this are treated as chrome.
const MIN_CONTENT_IMAGE_PX: u32 = 100;

/// Tour images, absolute and deduplicated: the first gallery container that
/// yields any, else every content-sized `<img>`, else `og:image`.
pub(crate) fn extract_images(page: &Page, base: &str) -> Vec<String> {
    for css in GALLERY_SELECTORS {
        let mut found = Vec::new();
        for container in page.select_all(css) {
            found.extend(
                select_within(container, "img")
                    .into_iter()
                    .filter_map(image_source)
                    .filter_map(|src| resolve_url(base, src))
                    .filter(|url| !is_decorative(url)),
            );
        }
        if !found.is_empty() {
            return dedup(found);
        }
    }

    let sized: Vec<String> = page
        .select_all("img")
        .into_iter()
        .filter(|img| has_content_dimensions(*img))
        .filter_map(image_source)
        .filter_map(|src| resolve_url(base, src))
        .filter(|url| !is_decorative(url))
        .collect();
    if !sized.is_empty() {
        return dedup(sized);
    }

    og_image(page, base).into_iter().collect()
}

/// `og:image` only, for recovery passes.
pub(crate) fn og_image(page: &Page, base: &str) -> Option<String> {
    page.select_all("meta[property='og:image']")
        .into_iter()
        .filter_map(|meta| meta.value().attr("content"))
        .find_map(|content| resolve_url(base, content))
}

fn image_source(img: ElementRef<'_>) -> Option<&str> {
    SOURCE_ATTRS
        .iter()
        .filter_map(|attr| img.value().attr(attr))
        .map(str::trim)
        .find(|value| !value.is_empty() && !value.starts_with("data:"))
}

fn has_content_dimensions(img: ElementRef<'_>) -> bool {
    ["width", "height"].iter().all(|attr| {
        img.value()
            .attr(attr)
            .and_then(leading_number)
            .is_none_or(|px| px > MIN_CONTENT_IMAGE_PX)
    })
}

fn leading_number(raw: &str) -> Option<u32> {
    let digits: String = raw.trim().chars().take_while(char::is_ascii_digit).collect();
    digits.parse().ok()
}

#[allow(clippy::case_sensitive_file_extension_comparisons)] // name is already lowercased
fn is_decorative(url: &str) -> bool {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    let name = path.rsplit('/').next().unwrap_or(path).to_ascii_lowercase();
    name.contains("icon") || name.contains("logo") || name.ends_with(".svg")
}

fn dedup(urls: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    urls.into_iter().filter(|url| seen.insert(url.clone())).collect()
}
