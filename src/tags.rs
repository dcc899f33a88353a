use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;
use serde_yaml::Value;

/// A tag as the platform expects it: a URL-safe slug plus the display name.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedTag {
    pub slug: String,
    pub name: String,
}

fn slugify(raw: &str) -> String {
    lazy_static! {
        static ref NON_SLUG: Regex = Regex::new(r"[^a-z0-9\s-]").unwrap();
        static ref WS_RUN: Regex = Regex::new(r"\s+").unwrap();
        static ref HYPHEN_RUN: Regex = Regex::new(r"-{2,}").unwrap();
    }

    let slug = raw.trim().to_lowercase();
    let slug = NON_SLUG.replace_all(&slug, "");
    let slug = WS_RUN.replace_all(&slug, "-");
    let slug = HYPHEN_RUN.replace_all(&slug, "-");
    slug.trim_matches('-').to_string()
}

fn coerce_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        // Mappings, sequences and nulls cannot yield a usable tag
        _ => None,
    }
}

/// Normalizes the raw `tags` value from the front matter. Tags whose slug or
/// name ends up empty are dropped, so the result may be empty - the caller
/// must check. Anything that is not a sequence yields an empty list.
pub fn normalize_tags(value: &Value) -> Vec<NormalizedTag> {
    let Value::Sequence(items) = value else {
        return vec![];
    };

    items
        .iter()
        .filter_map(coerce_to_string)
        .filter_map(|raw| {
            let name = raw.trim().to_string();
            let slug = slugify(&raw);
            if slug.is_empty() || name.is_empty() {
                None
            } else {
                Some(NormalizedTag { slug, name })
            }
        })
        .collect()
}
