// Output formatting utilities, following the teacher's CLI output conventions

use crate::graph::{export, LabeledGraph};
use crate::result::ResultView;
use std::io::IsTerminal;

// Colors for terminal output (when supported)
pub const RED: &str = "\x1b[0;31m";
pub const GREEN: &str = "\x1b[0;32m";
pub const YELLOW: &str = "\x1b[1;33m";
pub const CYAN: &str = "\x1b[0;36m";
pub const BOLD: &str = "\x1b[1m";
pub const NC: &str = "\x1b[0m"; // No Color

/// Check if stdout is a terminal (for color output)
#[inline]
pub fn is_terminal() -> bool {
    std::io::stdout().is_terminal()
}

/// Print info message
pub fn info(msg: &str) {
    let color = if is_terminal() { GREEN } else { "" };
    let reset = if is_terminal() { NC } else { "" };
    println!("{}[INFO]{} {}", color, reset, msg);
}

/// Print warning message
pub fn warn(msg: &str) {
    let color = if is_terminal() { YELLOW } else { "" };
    let reset = if is_terminal() { NC } else { "" };
    eprintln!("{}[WARN]{} {}", color, reset, msg);
}

/// Print error message
pub fn error(msg: &str) {
    let color = if is_terminal() { RED } else { "" };
    let reset = if is_terminal() { NC } else { "" };
    eprintln!("{}[ERROR]{} {}", color, reset, msg);
}

/// Print success message
pub fn success(msg: &str) {
    let color = if is_terminal() { CYAN } else { "" };
    let reset = if is_terminal() { NC } else { "" };
    println!("{}[OK]{} {}", color, reset, msg);
}

/// Print section header
pub fn header(msg: &str) {
    let bold = if is_terminal() { BOLD } else { "" };
    let reset = if is_terminal() { NC } else { "" };
    println!("{}==>{} {}", bold, reset, msg);
}

/// Exit codes used by `main`.
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_USAGE: i32 = 1;
pub const EXIT_PARSE: i32 = 2;
pub const EXIT_IO: i32 = 3;

/// Exit with usage error
pub fn exit_usage(msg: &str) -> ! {
    error(msg);
    std::process::exit(EXIT_USAGE);
}

/// JSON output wrapper (following the teacher's response format)
#[derive(Debug, Clone, serde::Serialize)]
pub struct JsonResponse<T> {
    pub schema_version: String,
    pub tool: String,
    pub timestamp: String,
    pub data: T,
}

impl<T: serde::Serialize> JsonResponse<T> {
    pub fn new(data: T) -> Self {
        JsonResponse {
            schema_version: "1.0.0".to_string(),
            tool: "cflr".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            data,
        }
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }

    pub fn to_pretty_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }
}

/// Error response format for JSON mode
#[derive(Debug, Clone, serde::Serialize)]
pub struct JsonError {
    pub error: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remediation: Option<String>,
}

impl JsonError {
    pub fn new(category: &str, message: &str) -> Self {
        JsonError { error: category.to_string(), message: message.to_string(), remediation: None }
    }

    pub fn with_remediation(mut self, remediation: &str) -> Self {
        self.remediation = Some(remediation.to_string());
        self
    }

    pub fn parse_failed(detail: &str) -> Self {
        Self::new("ParseError", detail).with_remediation(
            "check the input against the bundled text grammar or JSON statement schema",
        )
    }

    pub fn io_failed(detail: &str) -> Self {
        Self::new("IoError", detail)
            .with_remediation("check that the input path exists and is readable")
    }
}

/// Render the points-to table for human-readable output.
pub fn render_points_to_human(view: &ResultView) -> String {
    let mut out = String::new();
    for (pointer, object) in view.points_to_sorted() {
        out.push_str(&format!("{pointer} -> {object}\n"));
    }
    out
}

/// Render the points-to table as a JSON array of `{pointer, object}` pairs.
pub fn render_points_to_json(view: &ResultView, pretty: bool) -> String {
    let pairs = export::points_to_json(&view.points_to_sorted());
    let response = JsonResponse::new(pairs);
    if pretty {
        response.to_pretty_json()
    } else {
        response.to_json()
    }
}

/// Render the full saturated graph as JSON.
pub fn render_graph_json(graph: &LabeledGraph, pretty: bool) -> String {
    let response = JsonResponse::new(export::export_json(graph));
    if pretty {
        response.to_pretty_json()
    } else {
        response.to_json()
    }
}

/// Render the full saturated graph as Graphviz DOT.
pub fn render_graph_dot(graph: &LabeledGraph) -> String {
    export::export_dot(graph)
}
