//! Connected targets.
//!
//! High-level wrappers over a [`Session`]: `Browser` for the browser-wide
//! endpoint, `Tab` for a single page target. Each method is a typed shim
//! over [`Session::invoke`] - encode concrete parameters, decode the
//! opaque result into a concrete shape. Generated per-domain bindings
//! would sit at exactly this seam.

use std::sync::Arc;
use std::time::Duration;

use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::Result;
use crate::http::{TargetDescriptor, VersionInfo};
use crate::ws::Session;

/// Target metadata reported by `Target.getTargets`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetInfo {
    pub target_id: String,
    #[serde(rename = "type")]
    pub target_type: String,
    pub title: String,
    pub url: String,
    pub attached: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GetTargetsResult {
    target_infos: Vec<TargetInfo>,
}

#[derive(Debug, Deserialize)]
struct EvaluateResult {
    result: RemoteObject,
}

/// Subset of the protocol's remote object: only the by-value payload.
#[derive(Debug, Deserialize)]
struct RemoteObject {
    #[serde(default)]
    value: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct GetDocumentResult {
    root: DocumentNode,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DocumentNode {
    node_id: i64,
}

#[derive(Debug, Deserialize)]
struct GetOuterHtmlResult {
    #[serde(rename = "outerHTML")]
    outer_html: String,
}

/// Connection to the browser-wide target.
pub struct Browser {
    session: Arc<Session>,
    version: VersionInfo,
}

impl Browser {
    pub(crate) fn new(session: Arc<Session>, version: VersionInfo) -> Self {
        Self { session, version }
    }

    /// The underlying session, for commands this wrapper doesn't cover.
    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }

    /// Build metadata fetched at connect time.
    pub fn version(&self) -> &VersionInfo {
        &self.version
    }

    /// Targets currently known to the browser.
    pub async fn targets(&self) -> Result<Vec<TargetInfo>> {
        let result = self.session.invoke("Target", "getTargets", None).await?;
        let decoded: GetTargetsResult = serde_json::from_value(result)?;
        Ok(decoded.target_infos)
    }

    pub async fn close(&self) -> Result<()> {
        self.session.close().await
    }
}

/// Connection to one page target.
pub struct Tab {
    session: Arc<Session>,
    descriptor: TargetDescriptor,
}

impl Tab {
    /// Opens a control channel to the target described by `descriptor`.
    pub async fn attach(descriptor: TargetDescriptor, timeout: Duration) -> Result<Self> {
        let session = Session::connect(&descriptor.web_socket_debugger_url, timeout).await?;
        Ok(Self {
            session,
            descriptor,
        })
    }

    /// The underlying session, for commands this wrapper doesn't cover.
    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }

    pub fn descriptor(&self) -> &TargetDescriptor {
        &self.descriptor
    }

    /// Navigates to `url`. Does not wait for the page to load.
    pub async fn navigate(&self, url: &str) -> Result<()> {
        self.session
            .invoke("Page", "navigate", Some(json!({"url": url})))
            .await?;
        Ok(())
    }

    /// Evaluates a JavaScript expression and returns its value. Results
    /// the remote side cannot serialize come back as JSON null.
    pub async fn evaluate(&self, expression: &str) -> Result<Value> {
        let result = self
            .session
            .invoke(
                "Runtime",
                "evaluate",
                Some(json!({
                    "expression": expression,
                    "returnByValue": true,
                })),
            )
            .await?;
        let decoded: EvaluateResult = serde_json::from_value(result)?;
        Ok(decoded.result.value.unwrap_or(Value::Null))
    }

    /// Outer HTML of the current document.
    pub async fn outer_html(&self) -> Result<String> {
        let document = self.session.invoke("DOM", "getDocument", None).await?;
        let document: GetDocumentResult = serde_json::from_value(document)?;

        let html = self
            .session
            .invoke(
                "DOM",
                "getOuterHTML",
                Some(json!({"nodeId": document.root.node_id})),
            )
            .await?;
        let html: GetOuterHtmlResult = serde_json::from_value(html)?;
        Ok(html.outer_html)
    }

    /// Closes the tab itself (the remote target, not just this channel).
    pub async fn close_target(&self) -> Result<()> {
        self.session
            .invoke(
                "Target",
                "closeTarget",
                Some(json!({"targetId": self.descriptor.id})),
            )
            .await?;
        Ok(())
    }

    pub async fn close(&self) -> Result<()> {
        self.session.close().await
    }
}
