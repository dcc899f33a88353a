use serde::Serialize;

use crate::config::PostStatus;
use crate::frontmatter::PostMeta;
use crate::tags::NormalizedTag;

/// Marks a post as republished content, pointing back at its original home.
#[derive(Debug, Clone, Serialize)]
pub struct RepublishOptions {
    #[serde(rename = "originalArticleURL")]
    pub original_article_url: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CoverImageOptions {
    #[serde(rename = "coverImageURL")]
    pub cover_image_url: String,
}

/// Input for the PublishPost mutation.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishInput {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    pub publication_id: String,
    pub content_markdown: String,
    pub tags: Vec<NormalizedTag>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_republished: Option<RepublishOptions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_image_options: Option<CoverImageOptions>,
    // Some(Null) serializes as an explicit null, which tells the platform to
    // keep the post as a draft. Omitted entirely for public posts.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_at: Option<serde_json::Value>,
}

/// Input for the UpdatePost mutation. Carries the post id instead of the
/// publication id, which is never sent on update.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateInput {
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    pub content_markdown: String,
    pub tags: Vec<NormalizedTag>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_republished: Option<RepublishOptions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_image_options: Option<CoverImageOptions>,
}

fn trimmed_subtitle(meta: &PostMeta) -> Option<String> {
    meta.subtitle
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn republish_options(meta: &PostMeta) -> Option<RepublishOptions> {
    meta.canonical_url.clone().map(|url| RepublishOptions {
        original_article_url: url,
    })
}

fn cover_image_options(meta: &PostMeta) -> Option<CoverImageOptions> {
    meta.cover_image.clone().map(|url| CoverImageOptions {
        cover_image_url: url,
    })
}

pub fn build_publish_input(
    meta: &PostMeta,
    body: &str,
    tags: Vec<NormalizedTag>,
    status: PostStatus,
    publication_id: &str,
) -> PublishInput {
    PublishInput {
        title: meta.title.trim().to_string(),
        subtitle: trimmed_subtitle(meta),
        publication_id: publication_id.to_string(),
        content_markdown: body.to_string(),
        tags,
        is_republished: republish_options(meta),
        cover_image_options: cover_image_options(meta),
        published_at: match status {
            PostStatus::Draft => Some(serde_json::Value::Null),
            PostStatus::Public => None,
        },
    }
}

pub fn build_update_input(
    meta: &PostMeta,
    body: &str,
    tags: Vec<NormalizedTag>,
    post_id: String,
) -> UpdateInput {
    UpdateInput {
        id: post_id,
        title: meta.title.trim().to_string(),
        subtitle: trimmed_subtitle(meta),
        content_markdown: body.to_string(),
        tags,
        is_republished: republish_options(meta),
        cover_image_options: cover_image_options(meta),
    }
}
