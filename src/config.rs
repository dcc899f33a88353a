use std::io::ErrorKind;
use std::path::PathBuf;
use std::{env, fs, io};

use serde::Deserialize;

/// Environment variable that overrides `[api] access_token`. CI secrets
/// usually arrive this way rather than through the config file.
pub const TOKEN_ENV_VAR: &str = "MDPUBLISH_TOKEN";

const DEFAULT_ENDPOINT: &str = "https://gql.hashnode.com";

#[derive(Deserialize)]
pub struct Paths {
    pub posts_dir: PathBuf,
}

#[derive(Deserialize)]
pub struct Api {
    pub endpoint: Option<String>,
    pub publication_id: String,
    pub access_token: Option<String>,
}

#[derive(Deserialize)]
pub struct Defaults {
    pub post_status: Option<PostStatus>,
    pub update_existing: Option<bool>,
}

/// Target state for a newly created post. Any other value in the config file
/// fails deserialization, which aborts the run before any file is touched.
#[derive(Debug, Deserialize, Copy, Clone, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    Draft,
    Public,
}

#[derive(Deserialize)]
pub struct Log {
    pub level: LogLevel,
    pub log_to_console: bool,
    pub location: Option<PathBuf>,
}

#[derive(Deserialize, Copy, Clone)]
pub enum LogLevel {
    Critical = 0,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Deserialize)]
pub struct Config {
    pub paths: Paths,
    pub api: Api,
    pub defaults: Option<Defaults>,
    pub log: Option<Log>,
}

impl Config {
    pub fn endpoint(&self) -> &str {
        self.api.endpoint.as_deref().unwrap_or(DEFAULT_ENDPOINT)
    }

    /// The environment variable wins over the config file.
    pub fn access_token(&self) -> Option<String> {
        env::var(TOKEN_ENV_VAR)
            .ok()
            .filter(|t| !t.is_empty())
            .or_else(|| self.api.access_token.clone().filter(|t| !t.is_empty()))
    }

    pub fn post_status(&self) -> PostStatus {
        self.defaults
            .as_ref()
            .and_then(|d| d.post_status)
            .unwrap_or(PostStatus::Public)
    }

    pub fn update_existing(&self) -> bool {
        self.defaults
            .as_ref()
            .and_then(|d| d.update_existing)
            .unwrap_or(false)
    }
}

pub fn read_config(cfg_path: &PathBuf) -> io::Result<Config> {
    let cfg_content = match fs::read_to_string(cfg_path) {
        Ok(content) => content,
        Err(e) => return Err(io::Error::new(e.kind(), format!("Error opening configuration file {}: {}", cfg_path.display(), e))),
    };

    let cfg: Config = match toml::from_str::<Config>(cfg_content.as_str()) {
        Ok(cfg) => cfg,
        Err(e) => return Err(io::Error::new(
            ErrorKind::InvalidData, format!("Error parsing configuration file: {}", e))),
    };

    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"
[paths]
posts_dir = "posts"

[api]
publication_id = "pub-1"
access_token = "tok"
"#;

    #[test]
    fn test_minimal_config_defaults() {
        let cfg: Config = toml::from_str(MINIMAL).unwrap();
        assert_eq!(cfg.endpoint(), DEFAULT_ENDPOINT);
        assert_eq!(cfg.post_status(), PostStatus::Public);
        assert!(!cfg.update_existing());
        assert!(cfg.log.is_none());
    }

    #[test]
    fn test_full_config() {
        let full = r#"
[paths]
posts_dir = "content/posts"

[api]
endpoint = "http://localhost:9999/graphql"
publication_id = "pub-1"
access_token = "tok"

[defaults]
post_status = "draft"
update_existing = true
"#;
        let cfg: Config = toml::from_str(full).unwrap();
        assert_eq!(cfg.endpoint(), "http://localhost:9999/graphql");
        assert_eq!(cfg.post_status(), PostStatus::Draft);
        assert!(cfg.update_existing());
    }

    // One test on purpose: the cases share the process-wide env var and must
    // not interleave with each other.
    #[test]
    fn test_access_token_resolution() {
        let cfg: Config = toml::from_str(MINIMAL).unwrap();

        env::remove_var(TOKEN_ENV_VAR);
        assert_eq!(cfg.access_token(), Some("tok".to_string()));

        env::set_var(TOKEN_ENV_VAR, "env-tok");
        assert_eq!(cfg.access_token(), Some("env-tok".to_string()));

        // An empty env var does not shadow the config file token
        env::set_var(TOKEN_ENV_VAR, "");
        assert_eq!(cfg.access_token(), Some("tok".to_string()));

        env::remove_var(TOKEN_ENV_VAR);

        let no_token = r#"
[paths]
posts_dir = "posts"

[api]
publication_id = "pub-1"
"#;
        let cfg: Config = toml::from_str(no_token).unwrap();
        assert_eq!(cfg.access_token(), None);

        let blank_token = r#"
[paths]
posts_dir = "posts"

[api]
publication_id = "pub-1"
access_token = ""
"#;
        let cfg: Config = toml::from_str(blank_token).unwrap();
        assert_eq!(cfg.access_token(), None);
    }

    #[test]
    fn test_invalid_post_status_is_fatal() {
        let bad = r#"
[paths]
posts_dir = "posts"

[api]
publication_id = "pub-1"

[defaults]
post_status = "scheduled"
"#;
        assert!(toml::from_str::<Config>(bad).is_err());
    }
}
