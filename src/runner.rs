use std::path::{Path, PathBuf};
use std::{fs, io};

use spdlog::{info, warn};

use crate::client::Publish;
use crate::processor::{process_post, ProcessedPost, PublishSettings};

const MARKDOWN_EXTENSIONS: [&str; 2] = ["md", "markdown"];

/// Aggregate outcome of one run. Created and updated posts both count as
/// successes; any failure marks the whole run as failed.
#[derive(Debug, Default, PartialEq)]
pub struct RunSummary {
    pub created: u32,
    pub updated: u32,
    pub failed: u32,
}

impl RunSummary {
    pub fn succeeded(&self) -> u32 {
        self.created + self.updated
    }

    pub fn is_success(&self) -> bool {
        self.failed == 0
    }
}

fn is_markdown(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            let ext = ext.to_lowercase();
            MARKDOWN_EXTENSIONS.contains(&ext.as_str())
        })
        .unwrap_or(false)
}

/// Lists the markdown files directly inside the posts directory. Order is
/// whatever the filesystem yields; it is not sorted and not guaranteed
/// stable across platforms.
pub fn list_post_files(posts_dir: &Path) -> io::Result<Vec<PathBuf>> {
    let mut posts = vec![];
    let entries = fs::read_dir(posts_dir)?;
    for entry in entries {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let path = entry.path();
        if is_markdown(&path) {
            posts.push(path);
        }
    }
    Ok(posts)
}

/// Drives the per-file pipeline over every eligible file, one at a time.
/// Sequential on purpose: the platform rate-limits, so only one request is
/// ever in flight. A failing file is logged and counted, never aborts the
/// batch.
pub async fn run_batch(
    client: &dyn Publish,
    posts_dir: &Path,
    settings: &PublishSettings,
) -> io::Result<RunSummary> {
    let files = list_post_files(posts_dir)?;

    if files.is_empty() {
        warn!("no markdown files found in {}", posts_dir.display());
        return Ok(RunSummary::default());
    }

    info!("found {} markdown file(s) in {}", files.len(), posts_dir.display());

    let mut summary = RunSummary::default();
    for file in files {
        match process_post(client, &file, settings).await {
            Ok(ProcessedPost::Created { url }) => {
                info!("{}: created {}", file.display(), url);
                summary.created += 1;
            }
            Ok(ProcessedPost::Updated { url }) => {
                info!("{}: updated {}", file.display(), url);
                summary.updated += 1;
            }
            Err(err) => {
                // The error already names the file
                warn!("{}", err);
                summary.failed += 1;
            }
        }
    }

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use tempfile::TempDir;

    use crate::client::RemotePost;
    use crate::config::PostStatus;
    use crate::error::PublishError;
    use crate::payload::{PublishInput, UpdateInput};
    use crate::test_data::{POST_INVALID, POST_NEW, POST_PUBLISHED};

    use super::*;

    struct CountingPublisher {
        served: Mutex<u32>,
    }

    impl CountingPublisher {
        fn new() -> CountingPublisher {
            CountingPublisher { served: Mutex::new(0) }
        }

        fn next_post(&self) -> Option<RemotePost> {
            let mut served = self.served.lock().unwrap();
            *served += 1;
            Some(RemotePost {
                id: "cm1x9a0b2000108l4hyp2e5gq".to_string(),
                title: "t".to_string(),
                url: format!("https://blog.example.com/post-{}", served),
            })
        }
    }

    #[async_trait]
    impl Publish for CountingPublisher {
        async fn create(&self, _input: &PublishInput) -> Result<Option<RemotePost>, PublishError> {
            Ok(self.next_post())
        }

        async fn update(&self, _input: &UpdateInput) -> Result<Option<RemotePost>, PublishError> {
            Ok(self.next_post())
        }
    }

    fn settings() -> PublishSettings {
        PublishSettings {
            publication_id: "pub-1".to_string(),
            post_status: PostStatus::Public,
            update_existing: false,
        }
    }

    #[test]
    fn test_list_filters_markdown_extensions() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.md"), "x").unwrap();
        fs::write(dir.path().join("b.MD"), "x").unwrap();
        fs::write(dir.path().join("c.markdown"), "x").unwrap();
        fs::write(dir.path().join("notes.txt"), "x").unwrap();
        fs::write(dir.path().join("no_extension"), "x").unwrap();
        fs::create_dir(dir.path().join("nested.md")).unwrap();

        let mut names: Vec<String> = list_post_files(dir.path())
            .unwrap()
            .into_iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap().to_string())
            .collect();
        names.sort();
        assert_eq!(names, ["a.md", "b.MD", "c.markdown"]);
    }

    #[test]
    fn test_list_missing_dir_is_an_error() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope");
        assert!(list_post_files(&missing).is_err());
    }

    #[tokio::test]
    async fn test_batch_continues_past_failures() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("one.md"), POST_NEW).unwrap();
        fs::write(dir.path().join("two.md"), POST_PUBLISHED).unwrap();
        fs::write(dir.path().join("bad.md"), POST_INVALID).unwrap();

        let publisher = CountingPublisher::new();
        let summary = run_batch(&publisher, dir.path(), &settings()).await.unwrap();

        assert_eq!(summary.succeeded(), 2);
        assert_eq!(summary.failed, 1);
        assert!(!summary.is_success());
    }

    #[tokio::test]
    async fn test_empty_directory_is_a_successful_run() {
        let dir = TempDir::new().unwrap();
        let publisher = CountingPublisher::new();
        let summary = run_batch(&publisher, dir.path(), &settings()).await.unwrap();

        assert_eq!(summary, RunSummary::default());
        assert!(summary.is_success());
    }
}
