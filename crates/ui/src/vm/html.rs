use std::collections::HashSet;

/// Clean service-provided text for `dangerous_inner_html`.
///
/// The trivia service sends HTML-escaped strings; entities are kept and only
/// inline formatting tags survive.
#[must_use]
pub fn sanitize_html(html: &str) -> String {
    let tags: HashSet<&str> = ["b", "i", "em", "strong", "br", "sub", "sup"]
        .into_iter()
        .collect();

    ammonia::Builder::new()
        .tags(tags)
        .clean(html)
        .to_string()
}
