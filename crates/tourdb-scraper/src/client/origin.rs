//! URL origin extraction and link resolution.

/// Extracts the scheme+host origin from a URL.
///
/// Given `"https://example.com/tours/nepal"`, returns `"https://example.com"`.
#[must_use]
pub fn extract_origin(url: &str) -> String {
    reqwest::Url::parse(url).map_or_else(
        |e| {
            tracing::warn!(
                url,
                error = %e,
                "could not parse URL; falling back to string split for origin extraction"
            );
            url.trim_end_matches('/')
                .splitn(4, '/')
                .take(3)
                .collect::<Vec<_>>()
                .join("/")
        },
        |u| u.origin().ascii_serialization(),
    )
}

/// Resolves `raw` (absolute, protocol-relative, root-relative or bare path)
/// against `base`. Returns `None` for empty input, non-navigable schemes, or
/// anything that does not produce an absolute `http(s)` URL.
#[must_use]
pub fn resolve_url(base: &str, raw: &str) -> Option<String> {
    let raw = raw.trim().replace("&amp;", "&");
    if raw.is_empty() {
        return None;
    }
    let lower = raw.to_ascii_lowercase();
    if ["javascript:", "mailto:", "tel:", "data:"]
        .iter()
        .any(|scheme| lower.starts_with(scheme))
    {
        return None;
    }

    let base = reqwest::Url::parse(&format!("{}/", base.trim_end_matches('/'))).ok()?;
    let joined = base.join(&raw).ok()?;
    is_absolute_http(joined.as_str()).then(|| joined.to_string())
}

/// `true` when `url` parses as an absolute `http` or `https` URL with a host.
#[must_use]
pub fn is_absolute_http(url: &str) -> bool {
    reqwest::Url::parse(url)
        .is_ok_and(|u| matches!(u.scheme(), "http" | "https") && u.host_str().is_some())
}
