use lazy_static::lazy_static;
use regex::Regex;
use serde_yaml::{Mapping, Value};

use crate::error::PublishError;

pub const TITLE: &str = "title";
pub const TAGS: &str = "tags";
pub const SUBTITLE: &str = "subtitle";
pub const COVER_IMAGE: &str = "coverImage";
pub const CANONICAL_URL: &str = "canonicalUrl";
pub const PUBLISHED_URL: &str = "publishedUrl";

/// A markdown post split into its YAML front matter and the raw body.
/// The body is kept byte for byte, so a rewrite only touches the header.
#[derive(Debug, Clone)]
pub struct Document {
    pub matter: Mapping,
    pub body: String,
}

/// Splits a post into front matter mapping and body. The front matter must
/// open the file with a `---` line and close with another.
pub fn split_document(content: &str) -> Result<Document, PublishError> {
    lazy_static! {
        static ref FRONT_MATTER_REGEX: Regex =
            Regex::new(r"(?s)\A---[ \t]*\r?\n(?:(?P<yaml>.*?)\r?\n)?---[ \t]*(\r?\n|\z)").unwrap();
    }

    let Some(caps) = FRONT_MATTER_REGEX.captures(content) else {
        return Err(PublishError::Parse(
            "no front matter block found at the start of the file".to_string(),
        ));
    };

    // An empty header is well-formed; validation reports the missing fields
    let yaml = caps.name("yaml").map(|m| m.as_str()).unwrap_or("");
    let matter: Mapping = if yaml.trim().is_empty() {
        Mapping::new()
    } else {
        serde_yaml::from_str(yaml)?
    };

    let body_start = caps.get(0).map(|m| m.end()).unwrap_or(content.len());
    let body = content[body_start..].to_string();

    Ok(Document { matter, body })
}

/// Serializes the document back, front matter first. Field order in the
/// mapping is preserved by serde_yaml.
pub fn render_document(doc: &Document) -> Result<String, PublishError> {
    let yaml = serde_yaml::to_string(&doc.matter)?;
    Ok(format!("---\n{}---\n{}", yaml, doc.body))
}

fn str_field(matter: &Mapping, key: &str) -> Option<String> {
    match matter.get(key) {
        Some(Value::String(s)) => Some(s.clone()),
        _ => None,
    }
}

/// The recognized front matter fields of one post. `tags` stays raw here;
/// normalization is a separate step with its own failure mode.
#[derive(Debug, Clone)]
pub struct PostMeta {
    pub title: String,
    pub tags: Value,
    pub subtitle: Option<String>,
    pub cover_image: Option<String>,
    pub canonical_url: Option<String>,
    pub published_url: Option<String>,
}

impl PostMeta {
    /// Extracts the recognized fields. Call `validate` first - this assumes
    /// `title` is a string and does not check `tags`.
    pub fn from_matter(matter: &Mapping) -> PostMeta {
        PostMeta {
            title: str_field(matter, TITLE).unwrap_or_default(),
            tags: matter.get(TAGS).cloned().unwrap_or(Value::Null),
            subtitle: str_field(matter, SUBTITLE),
            cover_image: str_field(matter, COVER_IMAGE),
            canonical_url: str_field(matter, CANONICAL_URL),
            published_url: str_field(matter, PUBLISHED_URL),
        }
    }
}

/// Checks the mandatory fields, collecting every violation into one message
/// so the author can fix the file in a single pass.
pub fn validate(matter: &Mapping, file_name: &str) -> Result<(), PublishError> {
    let mut problems: Vec<String> = vec![];

    match matter.get(TITLE) {
        None => problems.push("missing required field 'title'".to_string()),
        Some(Value::String(s)) if s.trim().is_empty() => {
            problems.push("'title' must not be empty".to_string())
        }
        Some(Value::String(_)) => {}
        Some(_) => problems.push("'title' must be a string".to_string()),
    }

    match matter.get(TAGS) {
        None => problems.push("missing required field 'tags'".to_string()),
        Some(Value::Sequence(items)) if items.is_empty() => {
            problems.push("'tags' must not be empty".to_string())
        }
        Some(Value::Sequence(_)) => {}
        Some(_) => problems.push("'tags' must be a list".to_string()),
    }

    if problems.is_empty() {
        Ok(())
    } else {
        Err(PublishError::Validation(format!(
            "invalid front matter in {}: {}",
            file_name,
            problems.join("; ")
        )))
    }
}
