use anyhow::Result;
use rmcp::{
    ServerHandler, ServiceExt,
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{ServerCapabilities, ServerInfo},
    schemars, tool, tool_router,
};
use serde::{Deserialize, Serialize};

use crate::commands::info::page_count;
use crate::commands::split::split_to_dir;
use crate::error::SplitError;
use crate::selection::SplitParams;

// Request structs for tools

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct PathRequest {
    #[schemars(description = "Path to the PDF file")]
    pub path: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct PdfSplitRequest {
    #[schemars(description = "Path to the source PDF file")]
    pub path: String,
    #[schemars(description = "Split mode: 'ranges', 'fixed_range' or 'remove_pages'")]
    pub split_mode: String,
    #[schemars(description = "Pages to keep when split_mode is 'ranges' (e.g., '1,3,5-8')")]
    #[serde(default)]
    pub ranges: Option<String>,
    #[schemars(description = "Pages per output file when split_mode is 'fixed_range'")]
    #[serde(default)]
    pub fixed_range: Option<i64>,
    #[schemars(description = "Pages to drop when split_mode is 'remove_pages' (e.g., '2,4-6')")]
    #[serde(default)]
    pub remove_pages: Option<String>,
    #[schemars(description = "Directory to write the resulting PDF or zip into")]
    pub output_dir: String,
}

#[derive(Debug, Clone)]
pub struct PdfServer {
    #[allow(dead_code)]
    tool_router: ToolRouter<Self>,
}

impl PdfServer {
    pub fn new() -> Self {
        Self {
            tool_router: Self::tool_router(),
        }
    }
}

impl Default for PdfServer {
    fn default() -> Self {
        Self::new()
    }
}

fn error_message(e: &anyhow::Error) -> String {
    match e.downcast_ref::<SplitError>() {
        Some(split) if split.is_invalid_input() => format!("Error: invalid request: {}", split),
        _ => format!("Error: {:#}", e),
    }
}

#[tool_router]
impl PdfServer {
    #[tool(description = "Get the number of pages in a PDF")]
    fn pdf_page_count(&self, Parameters(PathRequest { path }): Parameters<PathRequest>) -> String {
        match page_count(&path) {
            Ok(page_count) => {
                let result = PageCountResult { path, page_count };
                serde_json::to_string_pretty(&result).unwrap_or_else(|e| format!("Error: {}", e))
            }
            Err(e) => error_message(&e),
        }
    }

    #[tool(description = "Split a PDF into a new PDF or a zip of PDFs. split_mode 'ranges' keeps the listed pages in the order given, 'remove_pages' keeps every page not listed, 'fixed_range' cuts the document into chunks of fixed_range pages. Page lists use syntax like '1,3,5-8'.")]
    fn pdf_split(&self, Parameters(req): Parameters<PdfSplitRequest>) -> String {
        let params = SplitParams {
            ranges_expr: req.ranges,
            remove_expr: req.remove_pages,
            window_size: req.fixed_range,
        };

        match split_to_dir(&req.path, &req.split_mode, &params, &req.output_dir) {
            Ok(summary) => {
                let result = SplitResult {
                    output_path: summary.output_path.display().to_string(),
                    source_page_count: summary.page_count,
                    content_type: summary.content_type.to_string(),
                    is_zip: summary.is_zip,
                    size: summary.size,
                };
                serde_json::to_string_pretty(&result).unwrap_or_else(|e| format!("Error: {}", e))
            }
            Err(e) => error_message(&e),
        }
    }
}

// Result types for MCP tools

#[derive(Debug, Serialize, Deserialize, schemars::JsonSchema)]
pub struct PageCountResult {
    pub path: String,
    pub page_count: u32,
}

#[derive(Debug, Serialize, Deserialize, schemars::JsonSchema)]
pub struct SplitResult {
    pub output_path: String,
    pub source_page_count: u32,
    pub content_type: String,
    pub is_zip: bool,
    pub size: usize,
}

impl ServerHandler for PdfServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "PDF splitting tools. Use pdf_page_count to see how many pages a document has, \
                 then pdf_split to extract page ranges, drop pages, or cut the document into \
                 fixed-size chunks. Multiple outputs are returned as a single zip archive."
                    .to_string(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

pub async fn run_server() -> Result<()> {
    let server = PdfServer::new();

    // Serve using stdin/stdout as a tuple
    let service = server.serve((tokio::io::stdin(), tokio::io::stdout())).await?;

    service.waiting().await?;

    Ok(())
}
