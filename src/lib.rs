pub mod client;
pub mod config;
pub mod error;
pub mod frontmatter;
pub mod logger;
pub mod payload;
pub mod post_id;
pub mod processor;
pub mod runner;
pub mod tags;
mod test_data;
