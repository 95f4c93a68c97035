use super::*;

fn site() -> SiteConfig {
    SiteConfig {
        base_url: "https://example.com".to_owned(),
        listing_paths: vec!["/tours".to_owned()],
        site_name_suffixes: vec!["Guru Tours".to_owned()],
        destinations: vec!["Everest".to_owned(), "Annapurna".to_owned()],
        default_destination: "Nepal".to_owned(),
        default_duration_days: 1,
    }
}

const FULL_PAGE: &str = r#"
<html>
  <head>
    <title>Everest Base Camp Trek! | Guru Tours</title>
    <meta property="og:image" content="/img/og.jpg">
  </head>
  <body>
    <h1 class="tour-title">  Everest Base Camp
        Trek! </h1>
    <ul class="trip-facts">
      <li class="duration">14 Days / 13 Nights</li>
      <li class="difficulty">Strenuous</li>
    </ul>
    <div class="price">Starting from <strong>USD 1,450</strong></div>
    <div class="tour-description">
      <p>Walk in the footsteps of legends to the foot of the world's highest mountain.</p>
    </div>
    <div class="tour-gallery">
      <img src="/img/ebc-1.jpg"><img data-src="/img/ebc-2.jpg">
    </div>
    <ul class="highlights">
      <li>Sunrise from Kala Patthar</li>
      <li>Tengboche monastery</li>
      <li>Sunrise from Kala Patthar</li>
    </ul>
    <div class="itinerary">
      <div class="day"><h4>Day 1: Arrival</h4><p>Meet at the airport.</p></div>
      <div class="day"><h4>Day 2: Lukla</h4><p>Fly to Lukla.</p></div>
    </div>
  </body>
</html>"#;

#[test]
fn full_page_extracts_every_field() {
    let tour = extract_tour(FULL_PAGE, "https://example.com/tour/ebc", &site());

    assert_eq!(tour.url, "https://example.com/tour/ebc");
    assert_eq!(tour.title, "Everest Base Camp Trek!");
    assert_eq!(tour.slug, "everest-base-camp-trek");
    assert_eq!(tour.duration_text, "14 Days / 13 Nights");
    assert_eq!(tour.duration_days, Some(14));
    assert_eq!(tour.price_text, "Starting from USD 1,450");
    assert_eq!(tour.price_amount, Some(1450.0));
    assert_eq!(tour.price_currency.as_deref(), Some("USD"));
    assert_eq!(
        tour.description,
        "Walk in the footsteps of legends to the foot of the world's highest mountain."
    );
    assert_eq!(tour.excerpt, tour.description);
    assert_eq!(
        tour.images,
        vec!["https://example.com/img/ebc-1.jpg", "https://example.com/img/ebc-2.jpg"]
    );
    assert_eq!(tour.itinerary.len(), 2);
    assert_eq!(tour.itinerary[1].title, "Day 2: Lukla");
    assert_eq!(tour.destination, "Everest");
    assert_eq!(tour.difficulty, "Strenuous");
    assert_eq!(
        tour.highlights,
        vec!["Sunrise from Kala Patthar", "Tengboche monastery"]
    );
    assert!(tour.error.is_none());
}

#[test]
fn og_title_used_when_no_title_selectors_match() {
    let html = r#"<html><head>
        <meta property="og:title" content="Annapurna Sanctuary | Guru Tours">
        <title>Something else entirely</title>
      </head><body><p>No headings on this page.</p></body></html>"#;
    let tour = extract_tour(html, "https://example.com/tour/abc", &site());
    assert_eq!(tour.title, "Annapurna Sanctuary");
    assert_eq!(tour.destination, "Annapurna");
}

#[test]
fn title_tag_used_last_with_suffix_stripped() {
    let html = "<html><head><title>Langtang Valley Trek - Guru Tours</title></head><body></body></html>";
    let tour = extract_tour(html, "https://example.com/trek/langtang", &site());
    assert_eq!(tour.title, "Langtang Valley Trek");
    assert_eq!(tour.slug, "langtang-valley-trek");
}

#[test]
fn record_url_equals_input_exactly() {
    let url = "https://example.com/tour/ebc/?ref=Listing&x=1";
    let tour = extract_tour("<html></html>", url, &site());
    assert_eq!(tour.url, url);
}

#[test]
fn duration_falls_back_to_page_text() {
    let html = "<html><body><h1>Mardi Himal</h1><p>A short 6 days trek to the ridge.</p></body></html>";
    let tour = extract_tour(html, "https://example.com/trek/mardi", &site());
    assert_eq!(tour.duration_text, "6 days");
    assert_eq!(tour.duration_days, Some(6));
}

#[test]
fn duration_days_unset_without_day_pattern() {
    let html = r#"<html><body><h1>Pokhara Stay</h1><span class="duration">3 Nights</span></body></html>"#;
    let tour = extract_tour(html, "https://example.com/tour/pokhara", &site());
    assert_eq!(tour.duration_text, "3 Nights");
    assert_eq!(tour.duration_days, None);
}

#[test]
fn price_selector_without_currency_falls_back_to_page_text() {
    let html = r#"<html><body>
        <div class="price">Ask us</div>
        <p>All inclusive for just NPR 45,000 per person.</p>
      </body></html>"#;
    let tour = extract_tour(html, "https://example.com/tour/x", &site());
    assert_eq!(tour.price_text, "NPR 45,000");
    assert_eq!(tour.price_amount, Some(45000.0));
    assert_eq!(tour.price_currency.as_deref(), Some("NPR"));
}

#[test]
fn price_element_wins_over_earlier_amount_in_page_text() {
    let html = r#"<html><body>
        <p>Book this month and save $100 on any departure.</p>
        <div class="tour-price">USD1,250</div>
        <div class="package-price">EUR 950</div>
      </body></html>"#;
    let tour = extract_tour(html, "https://example.com/tour/promo", &site());
    assert_eq!(tour.price_text, "USD1,250");
    assert_eq!(tour.price_amount, Some(1250.0));
    assert_eq!(tour.price_currency.as_deref(), Some("USD"));
}

#[test]
fn euro_price_element_is_recognised() {
    let html = r#"<html><body><div class="trip-price">EUR 950</div></body></html>"#;
    let tour = extract_tour(html, "https://example.com/tour/eu", &site());
    assert_eq!(tour.price_text, "EUR 950");
    assert_eq!(tour.price_amount, Some(950.0));
    assert_eq!(tour.price_currency.as_deref(), Some("EUR"));
}

#[test]
fn missing_price_leaves_amount_unset() {
    let tour = extract_tour("<html><body><h1>Free walk</h1></body></html>", "https://example.com/tour/y", &site());
    assert_eq!(tour.price_text, "");
    assert!(tour.price_amount.is_none());
    assert!(tour.price_currency.is_none());
}

#[test]
fn description_falls_back_to_meta_then_paragraphs() {
    let with_meta = r#"<html><head><meta name="description" content="Meta description text"></head>
        <body><p>This paragraph is long enough to be picked as a lead paragraph.</p></body></html>"#;
    let tour = extract_tour(with_meta, "https://example.com/tour/m", &site());
    assert_eq!(tour.description, "Meta description text");

    let paragraphs_only = r"<html><body>
        <p>Too short.</p>
        <p>This paragraph is long enough to be picked as a lead paragraph.</p>
      </body></html>";
    let tour = extract_tour(paragraphs_only, "https://example.com/tour/p", &site());
    assert_eq!(
        tour.description,
        "This paragraph is long enough to be picked as a lead paragraph."
    );
}

#[test]
fn long_description_gets_truncated_excerpt() {
    let long = "x".repeat(250);
    let html = format!(r#"<html><body><div class="tour-description">{long}</div></body></html>"#);
    let tour = extract_tour(&html, "https://example.com/tour/long", &site());
    assert_eq!(tour.description.len(), 250);
    assert_eq!(tour.excerpt, format!("{}...", "x".repeat(197)));
}

#[test]
fn destination_defaults_when_nothing_matches() {
    let tour = extract_tour("<html><body><h1>Bhutan Highlights</h1></body></html>", "https://example.com/tour/b", &site());
    assert_eq!(tour.destination, "Nepal");
    assert_eq!(tour.difficulty, "");
}

#[test]
fn recovery_record_without_html_carries_only_identity() {
    let tour = recovery_record(
        "https://example.com/tour/dead",
        None,
        &site(),
        "HTTP error: timed out".to_owned(),
    );
    assert_eq!(tour.url, "https://example.com/tour/dead");
    assert_eq!(tour.error, Some(true));
    assert_eq!(tour.error_message.as_deref(), Some("HTTP error: timed out"));
    assert!(tour.recovery_attempt.is_none());
    assert!(tour.title.is_empty());
}

#[test]
fn recovery_record_salvages_partial_html() {
    let partial = r#"<html><head><title>Gokyo Lakes | Guru Tours</title>
        <meta property="og:description" content="Turquoise lakes below Cho Oyu.">
        <meta property="og:image" content="https://cdn.example.com/gokyo.jpg">"#;
    let tour = recovery_record(
        "https://example.com/tour/gokyo",
        Some(partial),
        &site(),
        "response too sparse".to_owned(),
    );
    assert_eq!(tour.error, Some(true));
    assert_eq!(tour.recovery_attempt, Some(true));
    assert_eq!(tour.title, "Gokyo Lakes");
    assert_eq!(tour.slug, "gokyo-lakes");
    assert_eq!(tour.description, "Turquoise lakes below Cho Oyu.");
    assert_eq!(tour.images, vec!["https://cdn.example.com/gokyo.jpg"]);
}
