//! Ranked strategy tables, one per scalar field.

use crate::strategy::Strategy;

pub(crate) const TITLE_CHAIN: &[Strategy] = &[
    Strategy::Text("h1.tour-title"),
    Strategy::Text(".tour-title"),
    Strategy::Text(".package-title"),
    Strategy::Text(".trip-title"),
    Strategy::Text("h1.entry-title"),
    Strategy::Text(".page-title h1"),
    Strategy::Text("article h1"),
    Strategy::Text("h1"),
    Strategy::MetaContent("meta[property='og:title']"),
    Strategy::TitleTag,
];

pub(crate) const DURATION_CHAIN: &[Strategy] = &[
    Strategy::Text(".tour-duration"),
    Strategy::Text(".trip-duration"),
    Strategy::Text(".duration"),
    Strategy::Text("[class*='duration']"),
    Strategy::Text(".trip-facts .days"),
    Strategy::DurationInText,
];

pub(crate) const PRICE_CHAIN: &[Strategy] = &[
    Strategy::PriceText(".tour-price"),
    Strategy::PriceText(".trip-price"),
    Strategy::PriceText(".package-price"),
    Strategy::PriceText(".price"),
    Strategy::PriceText("[class*='price']"),
    Strategy::PriceText(".cost"),
    Strategy::PriceInText,
];

pub(crate) const DESCRIPTION_CHAIN: &[Strategy] = &[
    Strategy::Text(".tour-description"),
    Strategy::Text(".trip-overview"),
    Strategy::Text(".tour-overview"),
    Strategy::Text("#overview"),
    Strategy::Text(".overview"),
    Strategy::Text(".description"),
    Strategy::MetaContent("meta[property='og:description']"),
    Strategy::MetaContent("meta[name='description']"),
    Strategy::LeadParagraphs,
];

pub(crate) const DESTINATION_CHAIN: &[Strategy] = &[
    Strategy::Text(".tour-destination"),
    Strategy::Text(".trip-destination"),
    Strategy::Text(".destination"),
    Strategy::Text("[class*='destination']"),
    Strategy::Text(".location"),
];

pub(crate) const DIFFICULTY_CHAIN: &[Strategy] = &[
    Strategy::Text(".tour-difficulty"),
    Strategy::Text(".difficulty"),
    Strategy::Text(".trip-grade"),
    Strategy::Text(".grade"),
    Strategy::Text("[class*='difficulty']"),
];

/// Recovery passes over partial HTML skip anything structural.
pub(crate) const RECOVERY_TITLE_CHAIN: &[Strategy] = &[
    Strategy::MetaContent("meta[property='og:title']"),
    Strategy::TitleTag,
    Strategy::Text("h1"),
];

pub(crate) const RECOVERY_DESCRIPTION_CHAIN: &[Strategy] = &[
    Strategy::MetaContent("meta[property='og:description']"),
    Strategy::MetaContent("meta[name='description']"),
    Strategy::LeadParagraphs,
];
