use std::fs;
use std::path::Path;

use serde_yaml::Value;
use spdlog::warn;

use crate::client::Publish;
use crate::config::PostStatus;
use crate::error::PublishError;
use crate::frontmatter::{render_document, split_document, validate, PostMeta, PUBLISHED_URL};
use crate::payload::{build_publish_input, build_update_input};
use crate::post_id::extract_post_id;
use crate::tags::normalize_tags;

/// Run-level knobs shared by every file in a batch.
pub struct PublishSettings {
    pub publication_id: String,
    pub post_status: PostStatus,
    pub update_existing: bool,
}

/// What happened to one file. Both variants are successes.
#[derive(Debug, PartialEq)]
pub enum ProcessedPost {
    Created { url: String },
    Updated { url: String },
}

fn file_label(file_path: &Path) -> String {
    file_path
        .file_name()
        .and_then(|n| n.to_str())
        .map(str::to_string)
        .unwrap_or_else(|| file_path.display().to_string())
}

/// Publishes one markdown file: parse, validate, call the platform, and
/// record the assigned URL back into the file when it is new or changed.
pub async fn process_post(
    client: &dyn Publish,
    file_path: &Path,
    settings: &PublishSettings,
) -> Result<ProcessedPost, PublishError> {
    let label = file_label(file_path);

    let content = fs::read_to_string(file_path)
        .map_err(|e| PublishError::Io(e).in_file(&label))?;
    let mut doc = split_document(&content).map_err(|e| e.in_file(&label))?;

    validate(&doc.matter, &label)?;
    let meta = PostMeta::from_matter(&doc.matter);

    let tags = normalize_tags(&meta.tags);
    if tags.is_empty() {
        return Err(PublishError::NoTags.in_file(&label));
    }

    // Update only when asked for and the file already records a post URL.
    // A URL we cannot find an id in downgrades to a create.
    let mut post_id = None;
    if settings.update_existing {
        if let Some(ref url) = meta.published_url {
            post_id = extract_post_id(url);
            if post_id.is_none() {
                warn!("{}: no post id found in {}, creating a new post instead", label, url);
            }
        }
    }

    let (remote, was_update) = match post_id {
        Some(id) => {
            let input = build_update_input(&meta, &doc.body, tags, id);
            let remote = client.update(&input).await.map_err(|e| e.in_file(&label))?;
            (remote, true)
        }
        None => {
            let input = build_publish_input(
                &meta,
                &doc.body,
                tags,
                settings.post_status,
                &settings.publication_id,
            );
            let remote = client.create(&input).await.map_err(|e| e.in_file(&label))?;
            (remote, false)
        }
    };

    let Some(post) = remote else {
        return Err(PublishError::NoPostData.in_file(&label));
    };

    if meta.published_url.as_deref() != Some(post.url.as_str()) {
        doc.matter.insert(
            Value::String(PUBLISHED_URL.to_string()),
            Value::String(post.url.clone()),
        );
        let rendered = render_document(&doc).map_err(|e| e.in_file(&label))?;
        fs::write(file_path, rendered).map_err(|e| {
            PublishError::WriteBack { url: post.url.clone(), source: e }.in_file(&label)
        })?;
    }

    if was_update {
        Ok(ProcessedPost::Updated { url: post.url })
    } else {
        Ok(ProcessedPost::Created { url: post.url })
    }
}
