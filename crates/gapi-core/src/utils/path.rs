use std::borrow::Cow;

/// Prefix every dashboard lookup lives under
const DASHBOARDS_ROOT: &str = "/api/dashboards";

/// Default storage kind for bare slugs
const DEFAULT_DASHBOARD_KIND: &str = "db";

/// Lexically clean a slash-separated path: collapse repeated slashes, drop
/// `.` elements, resolve `..` against the preceding element, and strip any
/// trailing slash. An empty result becomes `.` (or `/` for rooted paths).
pub fn clean_path(path: &str) -> String {
    let rooted = path.starts_with('/');
    let mut parts: Vec<&str> = Vec::new();

    for part in path.split('/') {
        match part {
            "" | "." => {}
            ".." => {
                if parts.last().is_some_and(|last| *last != "..") {
                    parts.pop();
                } else if !rooted {
                    // `..` above the root is the root
                    parts.push("..");
                }
            }
            _ => parts.push(part),
        }
    }

    let joined = parts.join("/");
    match (rooted, joined.is_empty()) {
        (true, _) => format!("/{}", joined),
        (false, true) => ".".to_string(),
        (false, false) => joined,
    }
}

/// Directory part of `path`: everything through the last slash, cleaned.
fn dir(path: &str) -> String {
    match path.rfind('/') {
        Some(idx) => clean_path(&path[..=idx]),
        None => ".".to_string(),
    }
}

/// Request path for fetching a dashboard by URI.
///
/// A URI without a directory (`home`, `./home`) is taken as a slug in the
/// default `db/` store; anything else (`db/home`, `file/home.json`) is kept.
/// Each segment of the result is percent-encoded, so `?` and `#` stay in
/// the path.
pub fn dashboard_path(uri: &str) -> String {
    let uri: Cow<'_, str> = if dir(uri) == "." {
        Cow::Owned(format!("{}/{}", DEFAULT_DASHBOARD_KIND, uri))
    } else {
        Cow::Borrowed(uri)
    };
    clean_path(&format!("{}/{}", DASHBOARDS_ROOT, uri))
        .split('/')
        .map(segment)
        .collect::<Vec<_>>()
        .join("/")
}

/// Percent-encode a value for use as a single path segment.
pub fn segment(value: &str) -> Cow<'_, str> {
    urlencoding::encode(value)
}
