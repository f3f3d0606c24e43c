//! HTTP discovery API.
//!
//! Stateless wrapper over the browser's `/json/*` endpoints: enumerate
//! debuggable targets, create new ones, and learn the WebSocket URL to
//! attach to. The control channel itself lives in [`crate::ws`].

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use url::Url;

use crate::error::Result;

const REQUEST_TIMEOUT_SECS: u64 = 10;
const CONNECT_TIMEOUT_SECS: u64 = 5;

/// `/json/version` response.
#[derive(Debug, Clone, Deserialize)]
pub struct VersionInfo {
    #[serde(rename = "Browser")]
    pub browser: String,
    #[serde(rename = "Protocol-Version")]
    pub protocol_version: String,
    #[serde(rename = "User-Agent")]
    pub user_agent: String,
    #[serde(rename = "V8-Version")]
    pub v8_version: String,
    #[serde(rename = "WebKit-Version")]
    pub webkit_version: String,
    #[serde(rename = "webSocketDebuggerUrl")]
    pub web_socket_debugger_url: String,
}

/// One entry of `/json/list`, also returned by `/json/new`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetDescriptor {
    pub description: String,
    pub devtools_frontend_url: String,
    pub id: String,
    pub title: String,
    #[serde(rename = "type")]
    pub target_type: String,
    pub url: String,
    pub web_socket_debugger_url: String,
}

/// Discovery client for one browser endpoint.
pub struct HttpClient {
    http: reqwest::Client,
    base: Url,
}

impl HttpClient {
    pub fn new(base_url: &str) -> Result<Self> {
        let base = Url::parse(base_url)?;
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .build()?;
        Ok(Self { http, base })
    }

    /// Browser build metadata, including the browser-level debugger URL.
    pub async fn version(&self) -> Result<VersionInfo> {
        self.get_json("/json/version").await
    }

    /// Targets currently open for debugging.
    pub async fn targets(&self) -> Result<Vec<TargetDescriptor>> {
        self.get_json("/json/list").await
    }

    /// Opens a new target (a blank tab) and returns its descriptor.
    pub async fn create_target(&self) -> Result<TargetDescriptor> {
        self.get_json("/json/new").await
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.base.join(path)?;
        tracing::debug!("GET {}", url);
        let response = self.http.get(url).send().await?.error_for_status()?;
        Ok(response.json().await?)
    }
}
