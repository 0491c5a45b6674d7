//! GraphQL-over-HTTP transport.
//!
//! Every call goes through [`Client::graphql`]: POST the document and its
//! variables, unwrap the `{data, errors}` envelope, and map anything that
//! goes wrong onto [`FetchError`] so the load layer can publish it as-is.

use std::time::Duration;

use anyhow::Context;
use aniview_core::FetchError;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use crate::config::ApiConfig;
use crate::media::{ListCategory, MediaCard, MediaData, MediaDetail, MediaType, PageData};
use crate::queries;
use crate::viewer::{RawUser, UserData, UserProfile, ViewerData};

pub struct Client {
    http: reqwest::Client,
    endpoint: String,
    token: Option<String>,
    page_size: i32,
}

impl Client {
    pub fn new(config: &ApiConfig) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(&config.user_agent)
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .context("failed to build HTTP client")?;
        Ok(Self {
            http,
            endpoint: config.endpoint.clone(),
            token: config.token.clone(),
            page_size: config.page_size,
        })
    }

    /// One page of a home row.
    pub async fn media_list(
        &self,
        media_type: MediaType,
        category: ListCategory,
        page: i32,
    ) -> Result<Vec<MediaCard>, FetchError> {
        let today = chrono::Local::now().date_naive();
        let variables = category.variables(media_type, page, self.page_size, today);
        debug!(
            "Client: fetching {} / {} (page {})",
            media_type.as_graphql(),
            category.title(),
            page
        );
        let data: PageData = self.graphql(queries::MEDIA_LIST, variables).await?;
        let media = data.page.map(|p| p.media).unwrap_or_default();
        Ok(media
            .into_iter()
            .flatten()
            .map(|m| m.into_card(media_type))
            .collect())
    }

    /// Full detail for one media page.
    pub async fn media_detail(
        &self,
        id: i32,
        media_type: MediaType,
    ) -> Result<MediaDetail, FetchError> {
        let variables = json!({ "id": id, "type": media_type.as_graphql() });
        let data: MediaData = self.graphql(queries::MEDIA_DETAIL, variables).await?;
        match data.media {
            Some(raw) => Ok(raw.into_detail()),
            None => Err(FetchError::NotFound(format!("media {} not found", id))),
        }
    }

    /// The authenticated account.  Requires a token in the config.
    pub async fn viewer(&self) -> Result<UserProfile, FetchError> {
        if self.token.is_none() {
            return Err(FetchError::Unknown(
                "viewer query requires an API token".into(),
            ));
        }
        let data: ViewerData = self.graphql(queries::VIEWER, json!({})).await?;
        data.viewer
            .map(RawUser::into_profile)
            .ok_or_else(|| FetchError::NotFound("viewer not available".into()))
    }

    /// A public profile by username.
    pub async fn user_by_name(&self, name: &str) -> Result<UserProfile, FetchError> {
        let data: UserData = self
            .graphql(queries::USER_BY_NAME, json!({ "name": name }))
            .await?;
        data.user
            .map(RawUser::into_profile)
            .ok_or_else(|| FetchError::NotFound(format!("user {} not found", name)))
    }

    async fn graphql<D: DeserializeOwned>(
        &self,
        document: &'static str,
        variables: serde_json::Value,
    ) -> Result<D, FetchError> {
        let body = json!({ "query": document, "variables": variables });
        let mut request = self.http.post(&self.endpoint).json(&body);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(classify)?;
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(FetchError::NotFound("API returned 404".into()));
        }
        if !status.is_success() {
            return Err(FetchError::Unknown(format!(
                "API returned status {}",
                status
            )));
        }

        let envelope: GraphQlResponse<D> = response.json().await.map_err(classify)?;
        if let Some(errors) = envelope.errors {
            if !errors.is_empty() {
                return Err(graphql_error(errors));
            }
        }
        envelope
            .data
            .ok_or_else(|| FetchError::Decode("response missing data".into()))
    }
}

#[derive(Debug, Deserialize)]
struct GraphQlResponse<D> {
    data: Option<D>,
    errors: Option<Vec<GraphQlError>>,
}

#[derive(Debug, Deserialize)]
struct GraphQlError {
    message: String,
    #[serde(default)]
    status: Option<u16>,
}

/// Map a transport error onto the failure taxonomy observers see.
pub fn classify(err: reqwest::Error) -> FetchError {
    if err.is_timeout() || err.is_connect() {
        FetchError::Network(err.to_string())
    } else if err.is_decode() {
        FetchError::Decode(err.to_string())
    } else if err.status() == Some(StatusCode::NOT_FOUND) {
        FetchError::NotFound(err.to_string())
    } else if err.is_request() || err.is_body() {
        FetchError::Network(err.to_string())
    } else {
        FetchError::Unknown(err.to_string())
    }
}

/// The API reports not-found through the error list with `status: 404`.
fn graphql_error(errors: Vec<GraphQlError>) -> FetchError {
    if let Some(not_found) = errors.iter().find(|e| e.status == Some(404)) {
        return FetchError::NotFound(not_found.message.clone());
    }
    let joined = errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ");
    FetchError::Unknown(joined)
}
