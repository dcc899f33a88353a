use lazy_static::lazy_static;
use regex::Regex;

/// Recovers the platform's post id from a previously stored post URL.
///
/// Post ids are exactly 25 lowercase alphanumeric characters, ending the URL
/// path or followed by a query string. If the platform ever changes the id
/// format this returns None and the caller falls back to creating a new post.
pub fn extract_post_id(url: &str) -> Option<String> {
    lazy_static! {
        static ref POST_ID_REGEX: Regex =
            Regex::new(r"(?:^|[^a-z0-9])(?P<id>[a-z0-9]{25})(?:\?|$)").unwrap();
    }

    POST_ID_REGEX
        .captures(url)
        .and_then(|cap| cap.name("id").map(|m| m.as_str().to_string()))
}
