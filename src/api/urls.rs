use reqwest::Url;

/// Resolves a document path returned by the backend against the API base.
///
/// Absolute URLs are returned unchanged; anything else is appended to `base`.
pub fn resolve_document_url(base: &str, path: &str) -> String {
    if path.starts_with("http://") || path.starts_with("https://") {
        return path.to_string();
    }

    let base = base.trim_end_matches('/');
    if path.starts_with('/') {
        format!("{}{}", base, path)
    } else {
        format!("{}/{}", base, path)
    }
}

/// Last non-empty path segment of a URL, ignoring query and fragment.
pub fn file_name_from_url(url: &str) -> Option<String> {
    let url = Url::parse(url).ok()?;
    url.path_segments()?
        .filter(|segment| !segment.is_empty())
        .last()
        .map(str::to_string)
}
