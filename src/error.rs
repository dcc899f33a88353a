use std::io;

use thiserror::Error;

/// Errors that can stop one post from being published. The batch runner
/// catches these per file and keeps going.
#[derive(Debug, Error)]
pub enum PublishError {
    #[error("{0}")]
    Validation(String),

    #[error("all tags were discarded during normalization")]
    NoTags,

    #[error("front matter error: {0}")]
    Parse(String),

    #[error("API returned errors: {0}")]
    Upstream(String),

    #[error("no post data returned from API")]
    NoPostData,

    #[error("request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("{0}")]
    Io(#[from] io::Error),

    // The remote post exists at this point, so losing the write means the
    // file and the platform are out of sync until the URL is recorded by hand.
    #[error("post is live at {url} but the file could not be updated: {source}")]
    WriteBack { url: String, source: io::Error },

    #[error("{file}: {source}")]
    PostFailed {
        file: String,
        source: Box<PublishError>,
    },
}

impl PublishError {
    /// Attaches the failing post's file name while keeping the original
    /// error kind inspectable through `source`.
    pub fn in_file(self, file: &str) -> PublishError {
        PublishError::PostFailed { file: file.to_string(), source: Box::new(self) }
    }
}

impl From<serde_yaml::Error> for PublishError {
    fn from(value: serde_yaml::Error) -> Self {
        PublishError::Parse(value.to_string())
    }
}
