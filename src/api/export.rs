//! Document export: maps an output format to a backend conversion endpoint,
//! posts the content, and saves the converted bytes client-side.

use std::fmt;
use std::str::FromStr;

use super::error::ApiError;
use super::http;
use super::request::HttpRequest;
use crate::config;

const DOCX_MIME: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Html,
    Docx,
    Pdf,
    PlainText,
    Json,
    DocxFromHtml,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseKind {
    Text,
    Json,
    Binary,
}

/// How one format is exported: which `/utils/` endpoint to call, which body
/// field carries the content, how to read the response, and how to save it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportPlan {
    pub endpoint: &'static str,
    pub body_field: &'static str,
    pub response_kind: ResponseKind,
    pub extension: &'static str,
    pub mime_type: &'static str,
}

impl OutputFormat {
    pub const ALL: [OutputFormat; 6] = [
        OutputFormat::Html,
        OutputFormat::Docx,
        OutputFormat::Pdf,
        OutputFormat::PlainText,
        OutputFormat::Json,
        OutputFormat::DocxFromHtml,
    ];

    /// Stable id used as the value of the format selector.
    pub fn id(self) -> &'static str {
        match self {
            OutputFormat::Html => "html",
            OutputFormat::Docx => "docx",
            OutputFormat::Pdf => "pdf",
            OutputFormat::PlainText => "txt",
            OutputFormat::Json => "json",
            OutputFormat::DocxFromHtml => "docx-html",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            OutputFormat::Html => "HTML",
            OutputFormat::Docx => "DOCX",
            OutputFormat::Pdf => "PDF",
            OutputFormat::PlainText => "Plain text",
            OutputFormat::Json => "JSON",
            OutputFormat::DocxFromHtml => "DOCX (from HTML)",
        }
    }

    /// True when the backend expects HTML input for this format rather than
    /// Markdown.
    pub fn takes_html_input(self) -> bool {
        matches!(self, OutputFormat::Pdf | OutputFormat::DocxFromHtml)
    }

    pub fn plan(self) -> ExportPlan {
        match self {
            OutputFormat::Html => ExportPlan {
                endpoint: "to-html",
                body_field: "markdown",
                response_kind: ResponseKind::Text,
                extension: "html",
                mime_type: "text/html",
            },
            OutputFormat::Docx => ExportPlan {
                endpoint: "markdown-to-docx",
                body_field: "markdown",
                response_kind: ResponseKind::Binary,
                extension: "docx",
                mime_type: DOCX_MIME,
            },
            OutputFormat::Pdf => ExportPlan {
                endpoint: "html-to-pdf",
                body_field: "html",
                response_kind: ResponseKind::Binary,
                extension: "pdf",
                mime_type: "application/pdf",
            },
            OutputFormat::PlainText => ExportPlan {
                endpoint: "markdown-to-plain-text",
                body_field: "markdown",
                response_kind: ResponseKind::Text,
                extension: "txt",
                mime_type: "text/plain",
            },
            OutputFormat::Json => ExportPlan {
                endpoint: "to-json",
                body_field: "content",
                response_kind: ResponseKind::Json,
                extension: "json",
                mime_type: "application/json",
            },
            OutputFormat::DocxFromHtml => ExportPlan {
                endpoint: "html-to-docx",
                body_field: "html",
                response_kind: ResponseKind::Binary,
                extension: "docx",
                mime_type: DOCX_MIME,
            },
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for OutputFormat {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OutputFormat::ALL
            .into_iter()
            .find(|format| format.id() == s)
            .ok_or_else(|| ApiError::Invalid(format!("Unsupported export format: {}", s)))
    }
}

/// Which of the three generated documents is being exported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Resume,
    Portfolio,
    CoverLetter,
}

impl DocumentKind {
    pub const ALL: [DocumentKind; 3] = [
        DocumentKind::Resume,
        DocumentKind::Portfolio,
        DocumentKind::CoverLetter,
    ];

    pub fn label(self) -> &'static str {
        match self {
            DocumentKind::Resume => "Resume",
            DocumentKind::Portfolio => "Portfolio",
            DocumentKind::CoverLetter => "Cover letter",
        }
    }

    fn file_stem(self) -> &'static str {
        match self {
            DocumentKind::Resume => "resume",
            DocumentKind::Portfolio => "portfolio",
            DocumentKind::CoverLetter => "cover_letter",
        }
    }
}

/// Default filename for an export: the first word of the job description,
/// lowercased, joined to the document kind. Falls back to the bare kind when
/// no job description is set.
pub fn suggested_filename(job_description: &str, kind: DocumentKind) -> String {
    match job_description.split_whitespace().next() {
        Some(word) => format!("{}_{}", word.to_lowercase(), kind.file_stem()),
        None => kind.file_stem().to_string(),
    }
}

pub fn export_request(
    content: &str,
    format: OutputFormat,
    filename: &str,
) -> Result<HttpRequest, ApiError> {
    let plan = format.plan();

    let mut body = serde_json::Map::new();
    body.insert(
        plan.body_field.to_string(),
        serde_json::Value::String(content.to_string()),
    );
    let json = serde_json::Value::Object(body).to_string();

    let url = format!(
        "{}?filename={}",
        config::endpoint(&format!("/utils/{}", plan.endpoint)),
        encode_query_value(filename),
    );
    Ok(HttpRequest::post_json(url, json))
}

/// Percent-encodes a query string value, byte by byte for non-ASCII input.
fn encode_query_value(value: &str) -> String {
    let mut encoded = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                encoded.push(byte as char);
            }
            _ => encoded.push_str(&format!("%{:02X}", byte)),
        }
    }
    encoded
}

/// Converts and saves the content as `<filename>.<ext>` via a browser
/// download. The response is read as text or bytes depending on the format.
pub async fn export_document(
    content: &str,
    format: OutputFormat,
    filename: &str,
) -> Result<(), ApiError> {
    let plan = format.plan();
    let req = export_request(content, format, filename)?;
    let full_name = format!("{}.{}", filename, plan.extension);

    match plan.response_kind {
        ResponseKind::Binary => {
            let bytes = http::fetch_bytes(req).await?;
            http::save_file(&full_name, plan.mime_type, &bytes)
        }
        ResponseKind::Text | ResponseKind::Json => {
            let text = http::fetch_text(req).await?;
            http::save_file(&full_name, plan.mime_type, text.as_bytes())
        }
    }
}
