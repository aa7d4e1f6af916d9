//! Jira Agile REST client.

use std::collections::BTreeMap;

use async_trait::async_trait;
use reqwest::{RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::client::{ClientError, SprintSink, SprintSource};
use crate::config::AuthType;
use crate::sprint::{SprintPage, SprintSummary};

#[derive(Debug, Clone)]
pub struct JiraClient {
    http: reqwest::Client,
    server: String,
    login: Option<String>,
    token: Option<String>,
    auth_type: AuthType,
    debug: bool,
}

#[derive(Debug, Serialize)]
struct AddIssuesBody<'a> {
    issues: &'a [String],
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct JiraErrorBody {
    #[serde(default)]
    error_messages: Vec<String>,
    #[serde(default)]
    errors: BTreeMap<String, String>,
}

impl JiraClient {
    pub fn new(server: &str) -> Result<Self, ClientError> {
        let server = server.trim().trim_end_matches('/').to_string();
        if !(server.starts_with("http://") || server.starts_with("https://")) {
            return Err(ClientError::InvalidServer(server));
        }
        let http = reqwest::Client::builder()
            .user_agent(format!("sprintmesh/{}", crate::version()))
            .build()?;
        Ok(Self {
            http,
            server,
            login: None,
            token: None,
            auth_type: AuthType::Basic,
            debug: false,
        })
    }

    pub fn with_auth(
        mut self,
        auth_type: AuthType,
        login: Option<String>,
        token: Option<String>,
    ) -> Self {
        self.auth_type = auth_type;
        self.login = login.filter(|value| !value.trim().is_empty());
        self.token = token.filter(|value| !value.trim().is_empty());
        self
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn server(&self) -> &str {
        &self.server
    }

    fn agile_url(&self, path: &str) -> String {
        format!("{}/rest/agile/1.0/{}", self.server, path.trim_start_matches('/'))
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        let Some(token) = self.token.as_deref() else {
            return request;
        };
        match self.auth_type {
            AuthType::Bearer => request.bearer_auth(token),
            AuthType::Basic => {
                request.basic_auth(self.login.as_deref().unwrap_or_default(), Some(token))
            }
        }
    }

    async fn check(&self, response: Response) -> Result<Response, ClientError> {
        let status = response.status();
        if self.debug {
            debug!(status = status.as_u16(), url = %response.url(), "jira response");
        }
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        if self.debug {
            debug!(body = %body, "jira error body");
        }
        Err(ClientError::Status {
            status: status.as_u16(),
            message: error_message(&body, status.canonical_reason()),
        })
    }

    async fn read_json<T: DeserializeOwned>(&self, response: Response) -> Result<T, ClientError> {
        if !self.debug {
            return Ok(response.json().await?);
        }
        let body = response.text().await?;
        debug!(body = %body, "jira response body");
        serde_json::from_str(&body).map_err(ClientError::Decode)
    }

    /// Sprints of one board, in the order Jira returns them.
    pub async fn board_sprints(
        &self,
        board_id: u64,
        state: &str,
        limit: usize,
    ) -> Result<Vec<SprintSummary>, ClientError> {
        let url = self.agile_url(&format!("board/{board_id}/sprint"));
        let mut query = vec![
            ("startAt", "0".to_string()),
            ("maxResults", limit.to_string()),
        ];
        if !state.trim().is_empty() {
            query.push(("state", state.trim().to_string()));
        }
        if self.debug {
            debug!(method = "GET", url = %url, ?query, "jira request");
        }
        let response = self
            .authorize(self.http.get(&url).query(&query))
            .send()
            .await?;
        let response = self.check(response).await?;
        let page: SprintPage = self.read_json(response).await?;
        Ok(page.values)
    }
}

#[async_trait]
impl SprintSource for JiraClient {
    async fn sprints_in_boards(
        &self,
        board_ids: &[u64],
        state: &str,
        limit: usize,
    ) -> Result<Vec<SprintSummary>, ClientError> {
        let mut sprints = Vec::new();
        for board_id in board_ids {
            sprints.extend(self.board_sprints(*board_id, state, limit).await?);
        }
        sprints.truncate(limit);
        Ok(sprints)
    }
}

#[async_trait]
impl SprintSink for JiraClient {
    async fn add_issues(&self, sprint_id: &str, issue_keys: &[String]) -> Result<(), ClientError> {
        let url = self.agile_url(&format!("sprint/{}/issue", sprint_id.trim()));
        if self.debug {
            debug!(method = "POST", url = %url, issues = ?issue_keys, "jira request");
        }
        let response = self
            .authorize(
                self.http
                    .post(&url)
                    .json(&AddIssuesBody { issues: issue_keys }),
            )
            .send()
            .await?;
        let response = self.check(response).await?;
        if self.debug {
            let body = response.text().await?;
            if !body.trim().is_empty() {
                debug!(body = %body, "jira response body");
            }
        }
        Ok(())
    }
}

fn error_message(body: &str, reason: Option<&str>) -> String {
    let parsed: JiraErrorBody = serde_json::from_str(body).unwrap_or_default();
    let mut parts = parsed.error_messages;
    parts.extend(
        parsed
            .errors
            .into_iter()
            .map(|(field, message)| format!("{field}: {message}")),
    );
    if !parts.is_empty() {
        return parts.join("; ");
    }
    let body = body.trim();
    if !body.is_empty() {
        return body.to_string();
    }
    reason.unwrap_or("request failed").to_string()
}
