//! Field extraction strategies and the parsed page they run against.
//!
//! Each field is extracted by an ordered table of [`Strategy`] values; the
//! first one that yields non-empty text wins. Tables live in
//! [`crate::extract::chains`].

use scraper::{ElementRef, Html, Selector};

use crate::parse::{find_duration_text, find_price_text, looks_like_price, normalize_whitespace};

/// Paragraphs shorter than this are skipped by [`Strategy::LeadParagraphs`].
const LEAD_PARAGRAPH_MIN_CHARS: usize = 30;
const LEAD_PARAGRAPH_COUNT: usize = 3;

/// One way of pulling a field value out of a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Text of the first element matching the selector that has any.
    Text(&'static str),
    /// Like [`Strategy::Text`], restricted to elements whose text carries a
    /// currency symbol or code.
    PriceText(&'static str),
    /// `content` attribute of the first matching `<meta>` element.
    MetaContent(&'static str),
    /// The document `<title>`.
    TitleTag,
    /// First `<number> day(s)/night(s)` phrase in the visible page text.
    DurationInText,
    /// First currency amount in the visible page text.
    PriceInText,
    /// The first few substantial paragraphs, joined.
    LeadParagraphs,
}

impl Strategy {
    /// Runs this strategy; `None` when nothing non-empty was found.
    #[must_use]
    pub fn apply(self, page: &Page) -> Option<String> {
        let value = match self {
            Strategy::Text(css) => page
                .select_all(css)
                .into_iter()
                .map(element_text)
                .find(|text| !text.is_empty()),
            Strategy::PriceText(css) => page
                .select_all(css)
                .into_iter()
                .map(element_text)
                .find(|text| looks_like_price(text)),
            Strategy::MetaContent(css) => page
                .select_all(css)
                .into_iter()
                .filter_map(|el| el.value().attr("content"))
                .map(normalize_whitespace)
                .find(|text| !text.is_empty()),
            Strategy::TitleTag => page
                .select_all("title")
                .into_iter()
                .map(element_text)
                .find(|text| !text.is_empty()),
            Strategy::DurationInText => find_duration_text(page.text()),
            Strategy::PriceInText => find_price_text(page.text()),
            Strategy::LeadParagraphs => {
                let paragraphs: Vec<String> = page
                    .select_all("p")
                    .into_iter()
                    .map(element_text)
                    .filter(|text| text.chars().count() > LEAD_PARAGRAPH_MIN_CHARS)
                    .take(LEAD_PARAGRAPH_COUNT)
                    .collect();
                (!paragraphs.is_empty()).then(|| paragraphs.join(" "))
            }
        };
        value.filter(|v| !v.is_empty())
    }
}

/// Runs `chain` in order and returns the first non-empty value.
#[must_use]
pub fn first_match(page: &Page, chain: &[Strategy]) -> Option<String> {
    chain.iter().find_map(|strategy| {
        let value = strategy.apply(page);
        if value.is_some() {
            tracing::trace!(?strategy, "strategy matched");
        }
        value
    })
}

/// A parsed HTML document plus its visible text, computed once.
pub struct Page {
    document: Html,
    text: String,
}

impl Page {
    #[must_use]
    pub fn parse(html: &str) -> Self {
        let document = Html::parse_document(html);
        let text = visible_text(&document);
        Self { document, text }
    }

    /// Whitespace-normalized text of the document, without script and style bodies.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// All elements matching `css`. An unparseable selector matches nothing.
    #[must_use]
    pub fn select_all(&self, css: &str) -> Vec<ElementRef<'_>> {
        match parse_selector(css) {
            Some(selector) => self.document.select(&selector).collect(),
            None => Vec::new(),
        }
    }
}

/// Parses a CSS selector, logging and returning `None` when it is invalid.
pub(crate) fn parse_selector(css: &str) -> Option<Selector> {
    match Selector::parse(css) {
        Ok(selector) => Some(selector),
        Err(e) => {
            tracing::warn!(selector = css, error = %e, "invalid CSS selector");
            None
        }
    }
}

/// All elements under `scope` matching `css`.
pub(crate) fn select_within<'a>(scope: ElementRef<'a>, css: &str) -> Vec<ElementRef<'a>> {
    match parse_selector(css) {
        Some(selector) => scope.select(&selector).collect(),
        None => Vec::new(),
    }
}

/// Whitespace-normalized text content of an element.
#[must_use]
pub(crate) fn element_text(element: ElementRef<'_>) -> String {
    normalize_whitespace(&element.text().collect::<Vec<_>>().join(" "))
}

fn visible_text(document: &Html) -> String {
    let mut parts: Vec<&str> = Vec::new();
    for node in document.root_element().descendants() {
        let Some(text) = node.value().as_text() else {
            continue;
        };
        let hidden = node
            .parent()
            .and_then(|parent| parent.value().as_element().map(|el| el.name()))
            .is_some_and(|name| matches!(name, "script" | "style" | "noscript" | "template"));
        if !hidden {
            parts.push(&**text);
        }
    }
    normalize_whitespace(&parts.join(" "))
}
