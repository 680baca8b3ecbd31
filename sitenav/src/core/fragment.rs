//! URL fragment helpers.

use url::Url;

/// Anchor id targeted by a link's `href`, resolved against the page URL.
///
/// Returns `None` when the href carries no fragment. An href that cannot be
/// resolved falls back to the text after its first `#`.
pub fn anchor_from_href(href: &str, base: &str) -> Option<String> {
    let hash_at = href.find('#')?;

    let resolved = Url::parse(base)
        .and_then(|base| base.join(href))
        .map(|url| url.fragment().unwrap_or_default().to_string());
    let fragment = match resolved {
        Ok(fragment) => fragment,
        Err(_) => href[hash_at + 1..].to_string(),
    };

    if fragment.is_empty() {
        None
    } else {
        Some(fragment)
    }
}

/// Anchor id named by a `location.hash` value (`#contact` → `contact`).
pub fn anchor_from_hash(hash: &str) -> &str {
    hash.strip_prefix('#').unwrap_or(hash)
}
