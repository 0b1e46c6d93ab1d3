//! Confluence REST client
//!
//! Talks to `{base}/rest/api/content` with bearer-token authentication:
//!
//! - lookup: `GET ?spaceKey=..&title=..&type=page&expand=version`, first result wins
//! - create: `POST` a page with `"status": "draft"` and a storage-format body,
//!   optionally with `"ancestors": [{"id": parent}]`

use super::{CreatedPage, DraftPage, PageStore};
use crate::error::PublishError;
use reqwest::blocking::{Client, Response};
use reqwest::header::CONTENT_TYPE;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Everything needed to reach one space on one Confluence site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientSettings {
    pub base_url: String,
    pub api_token: String,
    pub space_key: String,
    pub timeout: Duration,
}

impl ClientSettings {
    pub fn new(
        base_url: impl Into<String>,
        api_token: impl Into<String>,
        space_key: impl Into<String>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            api_token: api_token.into(),
            space_key: space_key.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Blocking [`PageStore`] backed by the Confluence REST API.
#[derive(Debug, Clone)]
pub struct RestClient {
    http: Client,
    base_url: String,
    api_token: String,
    space_key: String,
}

impl RestClient {
    /// Build a client. Fails if the site address does not parse as a URL.
    pub fn new(settings: ClientSettings) -> Result<Self, PublishError> {
        let base_url = settings.base_url.trim_end_matches('/').to_string();
        Url::parse(&base_url).map_err(|source| PublishError::InvalidUrl {
            url: settings.base_url.clone(),
            source,
        })?;

        let http = Client::builder()
            .user_agent(concat!("storage-babel/", env!("CARGO_PKG_VERSION")))
            .timeout(settings.timeout)
            .build()?;

        Ok(Self {
            http,
            base_url,
            api_token: settings.api_token,
            space_key: settings.space_key,
        })
    }

    /// Browser URL for a page id.
    pub fn page_url(&self, id: &str) -> String {
        format!("{}/pages/viewpage.action?pageId={id}", self.base_url)
    }

    fn content_url(&self) -> String {
        format!("{}/rest/api/content", self.base_url)
    }
}

impl PageStore for RestClient {
    fn find_page_id(&self, title: &str) -> Result<Option<String>, PublishError> {
        debug!(space = %self.space_key, title, "looking up page");
        let response = self
            .http
            .get(self.content_url())
            .bearer_auth(&self.api_token)
            .header(CONTENT_TYPE, "application/json")
            .query(&[
                ("spaceKey", self.space_key.as_str()),
                ("title", title),
                ("type", "page"),
                ("expand", "version"),
            ])
            .send()?;

        let found: SearchResponse = check_status(response)?.json()?;
        Ok(found.results.into_iter().next().map(|page| page.id))
    }

    fn create_draft(&self, draft: &DraftPage<'_>) -> Result<CreatedPage, PublishError> {
        let request = CreatePageRequest {
            kind: "page",
            title: draft.title,
            space: SpaceRef {
                key: &self.space_key,
            },
            status: "draft",
            body: PageBody {
                storage: StorageValue {
                    value: draft.body,
                    representation: "storage",
                },
            },
            ancestors: draft.parent_id.map(|id| vec![AncestorRef { id }]),
        };
        debug!(
            space = %self.space_key,
            title = draft.title,
            parent = ?draft.parent_id,
            bytes = draft.body.len(),
            "creating draft page"
        );

        let response = self
            .http
            .post(self.content_url())
            .bearer_auth(&self.api_token)
            .header(CONTENT_TYPE, "application/json")
            .json(&request)
            .send()?;

        let page: PageRef = check_status(response)?.json()?;
        Ok(CreatedPage {
            url: self.page_url(&page.id),
            title: page.title.unwrap_or_else(|| draft.title.to_string()),
            id: page.id,
        })
    }
}

fn check_status(response: Response) -> Result<Response, PublishError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = error_body(status.as_u16(), response.text());
    Err(PublishError::Status {
        status: status.as_u16(),
        body,
    })
}

// A body that cannot be read is reported in its place, never left blank.
fn error_body<E: std::fmt::Display>(status: u16, text: Result<String, E>) -> String {
    match text {
        Ok(body) => body,
        Err(err) => {
            warn!(status, error = %err, "failed to read error response body");
            format!("<unreadable response body: {err}>")
        }
    }
}

#[derive(Serialize)]
struct CreatePageRequest<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    title: &'a str,
    space: SpaceRef<'a>,
    status: &'static str,
    body: PageBody<'a>,
    #[serde(skip_serializing_if = "Option::is_none")]
    ancestors: Option<Vec<AncestorRef<'a>>>,
}

#[derive(Serialize)]
struct SpaceRef<'a> {
    key: &'a str,
}

#[derive(Serialize)]
struct PageBody<'a> {
    storage: StorageValue<'a>,
}

#[derive(Serialize)]
struct StorageValue<'a> {
    value: &'a str,
    representation: &'static str,
}

#[derive(Serialize)]
struct AncestorRef<'a> {
    id: &'a str,
}

#[derive(Deserialize)]
struct PageRef {
    id: String,
    #[serde(default)]
    title: Option<String>,
}

#[derive(Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<PageRef>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::{
        Method::{GET, POST},
        MockServer,
    };
    use serde_json::json;

    fn client_for(server: &MockServer) -> RestClient {
        RestClient::new(ClientSettings::new(server.base_url(), "secret", "DOCS")).unwrap()
    }

    #[test]
    fn rejects_invalid_base_url() {
        let result = RestClient::new(ClientSettings::new("not a url", "t", "S"));
        assert!(matches!(result, Err(PublishError::InvalidUrl { .. })));
    }

    #[test]
    fn page_url_ignores_trailing_slash() {
        let client =
            RestClient::new(ClientSettings::new("https://wiki.example.com/", "t", "S")).unwrap();
        assert_eq!(
            client.page_url("12"),
            "https://wiki.example.com/pages/viewpage.action?pageId=12"
        );
    }

    #[test]
    fn create_draft_posts_storage_body() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/rest/api/content")
                .header("Authorization", "Bearer secret")
                .json_body(json!({
                    "type": "page",
                    "title": "My Doc (Draft)",
                    "space": { "key": "DOCS" },
                    "status": "draft",
                    "body": { "storage": { "value": "<p>Hi</p>", "representation": "storage" } }
                }));
            then.status(200)
                .json_body(json!({ "id": "4242", "title": "My Doc (Draft)" }));
        });

        let client = client_for(&server);
        let page = client
            .create_draft(&DraftPage {
                title: "My Doc (Draft)",
                body: "<p>Hi</p>",
                parent_id: None,
            })
            .unwrap();

        mock.assert();
        assert_eq!(page.id, "4242");
        assert_eq!(page.title, "My Doc (Draft)");
        assert_eq!(
            page.url,
            format!("{}/pages/viewpage.action?pageId=4242", server.base_url())
        );
    }

    #[test]
    fn create_draft_sends_ancestor_for_parent() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST).path("/rest/api/content").json_body(json!({
                "type": "page",
                "title": "Child",
                "space": { "key": "DOCS" },
                "status": "draft",
                "body": { "storage": { "value": "", "representation": "storage" } },
                "ancestors": [{ "id": "99" }]
            }));
            then.status(200).json_body(json!({ "id": "100" }));
        });

        let page = client_for(&server)
            .create_draft(&DraftPage {
                title: "Child",
                body: "",
                parent_id: Some("99"),
            })
            .unwrap();

        mock.assert();
        assert_eq!(page.title, "Child");
    }

    #[test]
    fn create_draft_reports_status_and_body() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/rest/api/content");
            then.status(400).body("space does not exist");
        });

        let err = client_for(&server)
            .create_draft(&DraftPage {
                title: "Doc",
                body: "",
                parent_id: None,
            })
            .unwrap_err();

        match err {
            PublishError::Status { status, body } => {
                assert_eq!(status, 400);
                assert_eq!(body, "space does not exist");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn unreadable_error_body_is_reported() {
        let body = error_body(502, Err::<String, _>("connection reset"));
        assert_eq!(body, "<unreadable response body: connection reset>");
        assert_eq!(error_body(404, Ok::<_, String>("no such page".to_string())), "no such page");
    }

    #[test]
    fn find_page_id_returns_first_result() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/rest/api/content")
                .header("Authorization", "Bearer secret")
                .query_param("spaceKey", "DOCS")
                .query_param("title", "Team Home")
                .query_param("type", "page")
                .query_param("expand", "version");
            then.status(200)
                .json_body(json!({ "results": [{ "id": "7" }, { "id": "8" }] }));
        });

        let id = client_for(&server).find_page_id("Team Home").unwrap();
        mock.assert();
        assert_eq!(id.as_deref(), Some("7"));
    }

    #[test]
    fn find_page_id_without_results_is_none() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/rest/api/content");
            then.status(200).json_body(json!({ "results": [] }));
        });

        assert_eq!(client_for(&server).find_page_id("Missing").unwrap(), None);
    }

    #[test]
    fn find_page_id_surfaces_server_errors() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/rest/api/content");
            then.status(401).body("unauthorized");
        });

        let err = client_for(&server).find_page_id("Any").unwrap_err();
        assert!(matches!(err, PublishError::Status { status: 401, .. }));
    }
}
