use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::PublishError;
use crate::payload::{PublishInput, UpdateInput};

const PUBLISH_MUTATION: &str = r#"
mutation PublishPost($input: PublishPostInput!) {
  publishPost(input: $input) {
    post { id title url }
  }
}"#;

const UPDATE_MUTATION: &str = r#"
mutation UpdatePost($input: UpdatePostInput!) {
  updatePost(input: $input) {
    post { id title url }
  }
}"#;

/// The post as the platform reports it back after a mutation.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct RemotePost {
    pub id: String,
    pub title: String,
    pub url: String,
}

/// The two remote operations the tool performs. A trait seam so the file
/// processor can be driven against a stub in tests.
#[async_trait]
pub trait Publish {
    async fn create(&self, input: &PublishInput) -> Result<Option<RemotePost>, PublishError>;
    async fn update(&self, input: &UpdateInput) -> Result<Option<RemotePost>, PublishError>;
}

#[derive(Serialize)]
struct GraphQlRequest<'a, V: Serialize> {
    query: &'static str,
    variables: Variables<'a, V>,
}

#[derive(Serialize)]
struct Variables<'a, V: Serialize> {
    input: &'a V,
}

#[derive(Deserialize)]
struct GraphQlResponse<T> {
    data: Option<T>,
    errors: Option<Vec<GraphQlError>>,
}

#[derive(Deserialize)]
struct GraphQlError {
    message: String,
}

#[derive(Deserialize)]
struct PublishData {
    #[serde(rename = "publishPost")]
    publish_post: MutationResult,
}

#[derive(Deserialize)]
struct UpdateData {
    #[serde(rename = "updatePost")]
    update_post: MutationResult,
}

#[derive(Deserialize)]
struct MutationResult {
    post: Option<RemotePost>,
}

/// GraphQL client for the publishing API. One POST per mutation, the access
/// token forwarded verbatim in the Authorization header.
pub struct ApiClient {
    client: reqwest::Client,
    endpoint: String,
    access_token: String,
}

impl ApiClient {
    pub fn new(endpoint: impl Into<String>, access_token: impl Into<String>) -> ApiClient {
        ApiClient {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
            access_token: access_token.into(),
        }
    }

    async fn execute<V, D>(&self, query: &'static str, input: &V) -> Result<D, PublishError>
    where
        V: Serialize + Sync,
        D: DeserializeOwned,
    {
        let request = GraphQlRequest { query, variables: Variables { input } };

        let response = self
            .client
            .post(&self.endpoint)
            .header("Authorization", &self.access_token)
            .json(&request)
            .send()
            .await?;

        let graphql_response: GraphQlResponse<D> = response.json().await?;

        if let Some(errors) = graphql_response.errors {
            let joined = errors
                .into_iter()
                .map(|e| e.message)
                .collect::<Vec<String>>()
                .join("; ");
            return Err(PublishError::Upstream(joined));
        }

        graphql_response
            .data
            .ok_or_else(|| PublishError::Upstream("empty response".to_string()))
    }
}

#[async_trait]
impl Publish for ApiClient {
    async fn create(&self, input: &PublishInput) -> Result<Option<RemotePost>, PublishError> {
        let data: PublishData = self.execute(PUBLISH_MUTATION, input).await?;
        Ok(data.publish_post.post)
    }

    async fn update(&self, input: &UpdateInput) -> Result<Option<RemotePost>, PublishError> {
        let data: UpdateData = self.execute(UPDATE_MUTATION, input).await?;
        Ok(data.update_post.post)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_with_post() {
        let raw = r#"{"data":{"publishPost":{"post":{
            "id":"cm1x9a0b2000108l4hyp2e5gq",
            "title":"Hello",
            "url":"https://blog.example.com/hello"}}}}"#;
        let parsed: GraphQlResponse<PublishData> = serde_json::from_str(raw).unwrap();
        let post = parsed.data.unwrap().publish_post.post.unwrap();
        assert_eq!(post.url, "https://blog.example.com/hello");
    }

    #[test]
    fn test_response_with_missing_post() {
        let raw = r#"{"data":{"updatePost":{"post":null}}}"#;
        let parsed: GraphQlResponse<UpdateData> = serde_json::from_str(raw).unwrap();
        assert!(parsed.data.unwrap().update_post.post.is_none());
    }

    #[test]
    fn test_response_with_errors() {
        let raw = r#"{"data":null,"errors":[{"message":"bad token"},{"message":"try again"}]}"#;
        let parsed: GraphQlResponse<PublishData> = serde_json::from_str(raw).unwrap();
        let messages: Vec<String> =
            parsed.errors.unwrap().into_iter().map(|e| e.message).collect();
        assert_eq!(messages.join("; "), "bad token; try again");
    }

    #[test]
    fn test_request_shape() {
        let input = PublishInput {
            title: "T".to_string(),
            subtitle: None,
            publication_id: "pub-1".to_string(),
            content_markdown: "b".to_string(),
            tags: vec![],
            is_republished: None,
            cover_image_options: None,
            published_at: None,
        };
        let request = GraphQlRequest { query: PUBLISH_MUTATION, variables: Variables { input: &input } };
        let json = serde_json::to_value(&request).unwrap();
        assert!(json["query"].as_str().unwrap().contains("mutation PublishPost"));
        assert_eq!(json["variables"]["input"]["publicationId"], "pub-1");
    }
}
