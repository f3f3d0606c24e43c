//! Client entry point.
//!
//! `DevTools` is configured with the browser's HTTP endpoint and hands out
//! connected sessions: the browser-wide channel via [`DevTools::browser`],
//! page channels via [`DevTools::new_tab`] / [`DevTools::attach`].

use std::time::Duration;

use crate::error::Result;
use crate::http::{HttpClient, TargetDescriptor, VersionInfo};
use crate::target::{Browser, Tab};
use crate::ws::Session;

/// Response deadline applied to every command unless overridden.
pub const DEFAULT_COMMAND_TIMEOUT: Duration = Duration::from_secs(10);

const DEFAULT_ENDPOINT: &str = "http://localhost:9222";

pub struct DevTools {
    http: HttpClient,
    timeout: Duration,
}

impl DevTools {
    /// Client for a browser listening on `http://localhost:9222`.
    pub fn new() -> Result<Self> {
        Self::with_url(DEFAULT_ENDPOINT)
    }

    /// Client for a browser at an arbitrary HTTP endpoint.
    pub fn with_url(url: &str) -> Result<Self> {
        Ok(Self {
            http: HttpClient::new(url)?,
            timeout: DEFAULT_COMMAND_TIMEOUT,
        })
    }

    /// Overrides the per-command response timeout for sessions created by
    /// this client.
    pub fn command_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Browser build metadata.
    pub async fn version(&self) -> Result<VersionInfo> {
        self.http.version().await
    }

    /// Descriptors of the currently debuggable targets.
    pub async fn targets(&self) -> Result<Vec<TargetDescriptor>> {
        self.http.targets().await
    }

    /// Connects to the browser-wide target.
    pub async fn browser(&self) -> Result<Browser> {
        let version = self.http.version().await?;
        let session = Session::connect(&version.web_socket_debugger_url, self.timeout).await?;
        Ok(Browser::new(session, version))
    }

    /// Opens a new tab and connects to it.
    pub async fn new_tab(&self) -> Result<Tab> {
        let descriptor = self.http.create_target().await?;
        Tab::attach(descriptor, self.timeout).await
    }

    /// Connects to an existing target.
    pub async fn attach(&self, descriptor: TargetDescriptor) -> Result<Tab> {
        Tab::attach(descriptor, self.timeout).await
    }
}
