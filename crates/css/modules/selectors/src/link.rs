//! Link URL completion for `:link` / `:visited`.

use url::Url;

/// Complete an `href` value into the absolute URL the visited set is keyed by.
///
/// Leading and trailing ASCII whitespace is stripped first. Relative references are
/// joined against `base`; without a base only absolute URLs resolve.
pub fn resolve_link(base: Option<&Url>, href: &str) -> Option<String> {
    let trimmed = href.trim_matches(|ch: char| ch.is_ascii_whitespace());
    let resolved = match base {
        Some(base_url) => base_url.join(trimmed),
        None => Url::parse(trimmed),
    };
    resolved.ok().map(String::from)
}
