use scraper::ElementRef;
use tourdb_core::ItineraryDay;

use crate::parse::{normalize_whitespace, DAY_LABEL_RE};
use crate::strategy::{element_text, select_within, Page};

const CONTAINER_SELECTORS: &[&str] = &[
    ".itinerary",
    "#itinerary",
    ".tour-itinerary",
    ".trip-itinerary",
    "[class*='itinerary']",
];

const DAY_ITEM_SELECTORS: &[&str] = &[
    ".itinerary-item",
    ".itinerary-day",
    ".day-item",
    ".day",
    ".accordion-item",
    "li",
];

const DAY_TITLE_SELECTORS: &[&str] = &[".day-title", "h3", "h4", "h5", ".title", "strong"];

const DAY_DESCRIPTION_SELECTORS: &[&str] = &[".day-description", ".description", ".content", "p"];

/// Day-by-day itinerary from the first container whose day items yield anything.
pub(crate) fn extract_itinerary(page: &Page) -> Vec<ItineraryDay> {
    for container_css in CONTAINER_SELECTORS {
        let Some(container) = page.select_all(container_css).into_iter().next() else {
            continue;
        };
        for item_css in DAY_ITEM_SELECTORS {
            let days: Vec<ItineraryDay> = select_within(container, item_css)
                .into_iter()
                .enumerate()
                .filter_map(|(index, item)| extract_day(item, index))
                .collect();
            if !days.is_empty() {
                return days;
            }
        }
    }
    Vec::new()
}

fn extract_day(item: ElementRef<'_>, index: usize) -> Option<ItineraryDay> {
    let full_text = element_text(item);
    if full_text.is_empty() {
        return None;
    }

    let fallback_day = u32::try_from(index + 1).unwrap_or(u32::MAX);

    let title = first_text(item, DAY_TITLE_SELECTORS)
        .or_else(|| DAY_LABEL_RE.find(&full_text).map(|m| m.as_str().to_owned()))
        .unwrap_or_else(|| format!("Day {fallback_day}"));

    let description = first_text(item, DAY_DESCRIPTION_SELECTORS)
        .unwrap_or_else(|| remainder_after_title(&full_text, &title));

    let day = DAY_LABEL_RE
        .captures(&title)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<u32>().ok())
        .unwrap_or(fallback_day);

    Some(ItineraryDay {
        day,
        title,
        description,
    })
}

/// Text of every element matching the first selector that matches anything non-empty.
fn first_text(scope: ElementRef<'_>, selectors: &[&str]) -> Option<String> {
    selectors.iter().find_map(|css| {
        let parts: Vec<String> = select_within(scope, css)
            .into_iter()
            .map(element_text)
            .filter(|text| !text.is_empty())
            .collect();
        (!parts.is_empty()).then(|| parts.join(" "))
    })
}

fn remainder_after_title(full_text: &str, title: &str) -> String {
    let rest = full_text.replacen(title, "", 1);
    normalize_whitespace(rest.trim_start_matches(|c: char| {
        c.is_whitespace() || matches!(c, ':' | '-' | '–' | '—' | '.')
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn structured_items_use_title_and_description_selectors() {
        let page = Page::parse(
            r#"<section class="itinerary">
                 <div class="itinerary-item"><h3>Day 1: Arrive in Kathmandu</h3><p>Transfer to hotel.</p></div>
                 <div class="itinerary-item"><h3>Day 2: Fly to Lukla</h3><p>Scenic flight.</p><p>Trek to Phakding.</p></div>
               </section>"#,
        );
        let days = extract_itinerary(&page);
        assert_eq!(days.len(), 2);
        assert_eq!(days[0].day, 1);
        assert_eq!(days[0].title, "Day 1: Arrive in Kathmandu");
        assert_eq!(days[0].description, "Transfer to hotel.");
        assert_eq!(days[1].day, 2);
        assert_eq!(days[1].description, "Scenic flight. Trek to Phakding.");
    }

    #[test]
    fn day_label_regex_when_no_title_element() {
        let page = Page::parse(
            r#"<div id="itinerary"><ul>
                 <li>Day 3 - Namche Bazaar acclimatisation hike</li>
                 <li>Rest day in the village</li>
               </ul></div>"#,
        );
        let days = extract_itinerary(&page);
        assert_eq!(days.len(), 2);
        assert_eq!(days[0].day, 3);
        assert_eq!(days[0].title, "Day 3");
        assert_eq!(days[0].description, "Namche Bazaar acclimatisation hike");
        assert_eq!(days[1].day, 2);
        assert_eq!(days[1].title, "Day 2");
        assert_eq!(days[1].description, "Rest day in the village");
    }

    #[test]
    fn empty_when_no_itinerary_container() {
        let page = Page::parse("<ul><li>Day 1 somewhere</li></ul>");
        assert!(extract_itinerary(&page).is_empty());
    }
}
