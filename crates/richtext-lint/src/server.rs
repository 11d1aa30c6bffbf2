//! MCP (Model Context Protocol) server implementation.
//!
//! Exposes document checks to AI assistants over stdio. The server is a
//! presentation layer over the core library: each `#[tool]` method parses
//! its input, delegates to `richtext_lint_core` and serializes the report.
//!
//! Link publication checks go through one [`LinkReconciler`] that lives as
//! long as the server, so repeated calls for the same document reuse
//! earlier lookups. Passing a different `document_id` drops them.

use std::sync::{Arc, Mutex};

use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{CallToolResult, Content, Implementation, ServerCapabilities, ServerInfo};
use rmcp::schemars;
use rmcp::{ErrorData as McpError, ServerHandler, tool, tool_handler, tool_router};

use richtext_lint_core::analysis::{AnalysisSettings, analyze_document};
use richtext_lint_core::config::{Config, DEFAULT_TITLE_LOCALE};
use richtext_lint_core::document::Node;
use richtext_lint_core::error::AnalysisResult;
use richtext_lint_core::lookup::StaticLookup;
use richtext_lint_core::reconcile::LinkReconciler;

/// Parameters for the `get_info` tool.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct GetInfoParams {
    /// Output format: "text" or "json"
    #[serde(default = "default_format")]
    pub format: String,
}

fn default_format() -> String {
    "text".to_string()
}

/// Parameters for the `analyze_document` tool.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct AnalyzeDocumentParams {
    /// Rich-text document: a JSON object with `nodeType: "document"` and
    /// nested `content`.
    pub document: serde_json::Value,
    /// Stable id of the document being edited. Cached link checks are
    /// discarded when it changes.
    pub document_id: Option<String>,
}

/// MCP server exposing document checks.
#[derive(Clone)]
pub struct ProjectServer {
    tool_router: rmcp::handler::server::router::tool::ToolRouter<Self>,
    settings: Arc<AnalysisSettings>,
    reconciler: Option<LinkReconciler<StaticLookup>>,
    current_document: Arc<Mutex<Option<String>>>,
    max_input: Option<usize>,
}

impl Default for ProjectServer {
    fn default() -> Self {
        Self::new(AnalysisSettings::default(), None, DEFAULT_TITLE_LOCALE, None)
    }
}

#[tool_router]
impl ProjectServer {
    /// Create a server. Without `lookup`, entry and asset links are not
    /// checked.
    pub fn new(
        settings: AnalysisSettings,
        lookup: Option<StaticLookup>,
        title_locale: &str,
        max_input: Option<usize>,
    ) -> Self {
        Self {
            tool_router: Self::tool_router(),
            settings: Arc::new(settings),
            reconciler: lookup.map(|l| LinkReconciler::new(Arc::new(l), title_locale)),
            current_document: Arc::new(Mutex::new(None)),
            max_input,
        }
    }

    /// Create a server from loaded configuration, reading the entity
    /// fixture if one is configured.
    pub fn from_config(config: &Config, max_input: Option<usize>) -> AnalysisResult<Self> {
        let settings = AnalysisSettings::from_config(config)?;
        let lookup = config
            .entities
            .as_deref()
            .map(StaticLookup::load)
            .transpose()?;
        Ok(Self::new(settings, lookup, config.title_locale(), max_input))
    }

    /// Get project information.
    #[tool(description = "Get project name, version, and description")]
    #[tracing::instrument(skip(self), fields(otel.kind = "server"))]
    fn get_info(
        &self,
        Parameters(params): Parameters<GetInfoParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!(tool = "get_info", format = %params.format, "executing MCP tool");

        let info = serde_json::json!({
            "name": env!("CARGO_PKG_NAME"),
            "version": env!("CARGO_PKG_VERSION"),
            "description": env!("CARGO_PKG_DESCRIPTION"),
            "link_checks": self.reconciler.is_some(),
        });

        let text = if params.format == "json" {
            serde_json::to_string_pretty(&info)
                .map_err(|e| McpError::internal_error(format!("serialization error: {e}"), None))?
        } else {
            format!(
                "{} v{}\n{}",
                env!("CARGO_PKG_NAME"),
                env!("CARGO_PKG_VERSION"),
                env!("CARGO_PKG_DESCRIPTION"),
            )
        };

        Ok(CallToolResult::success(vec![Content::text(text)]))
    }

    /// Analyze one rich-text document.
    #[tool(
        description = "Check a rich-text document: heading order, hard line breaks that should be paragraphs, link problems (own-site plain links, URL link text, unpublished entries and assets), word count, longest paragraph and sentence, and readability hints."
    )]
    #[tracing::instrument(skip(self, params), fields(otel.kind = "server", document_id = ?params.document_id))]
    async fn analyze_document(
        &self,
        Parameters(params): Parameters<AnalyzeDocumentParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!(tool = "analyze_document", "executing MCP tool");

        if let Some(max) = self.max_input {
            let size = params.document.to_string().len();
            if size > max {
                return Err(McpError::invalid_params(
                    format!("input too large: {size} bytes (limit: {max} bytes)"),
                    None,
                ));
            }
        }

        let document: Node = serde_json::from_value(params.document).map_err(|e| {
            McpError::invalid_params(format!("invalid rich-text document: {e}"), None)
        })?;
        self.switch_document(params.document_id.as_deref());

        let mut report = analyze_document(&document, &self.settings);
        match self.reconciler {
            Some(ref reconciler) => {
                report.link_warnings = reconciler.resolve(&report.link_warnings).await;
            }
            None => report.link_warnings.retain(|w| !w.reason.is_pending()),
        }

        let json = serde_json::to_string_pretty(&report)
            .map_err(|e| McpError::internal_error(format!("serialization error: {e}"), None))?;

        tracing::info!(
            tool = "analyze_document",
            words = report.word_count,
            warnings = report.has_warnings(),
            "MCP tool completed"
        );
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    /// Drop cached link checks when the caller moves to another document.
    fn switch_document(&self, document_id: Option<&str>) {
        let (Some(reconciler), Some(id)) = (self.reconciler.as_ref(), document_id) else {
            return;
        };
        let mut current = self
            .current_document
            .lock()
            .unwrap_or_else(|e| e.into_inner());
        if current.as_deref() != Some(id) {
            tracing::debug!(from = ?*current, to = id, "document changed");
            reconciler.reset();
            *current = Some(id.to_string());
        }
    }
}

#[tool_handler]
impl ServerHandler for ProjectServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: Default::default(),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: env!("CARGO_PKG_NAME").to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                ..Default::default()
            },
            instructions: Some(format!(
                "{} MCP server. Call analyze_document with a rich-text document to get authoring warnings.",
                env!("CARGO_PKG_NAME"),
            )),
        }
    }
}
