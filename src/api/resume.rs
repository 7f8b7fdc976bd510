//! Typed wrappers for the resume endpoints. Each operation has a pure request
//! builder plus an async function that performs the fetch and decodes the
//! response.

use serde::{Deserialize, Serialize};

use super::error::ApiError;
use super::http;
use super::request::{FileUpload, HttpRequest, MultipartForm};
use crate::config;

pub const MISSING_RESUME_SOURCE: &str =
    "Either a resume file or plain text resume content is required for optimization.";

// -- Response types matching backend structs --

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizationSuggestion {
    #[serde(rename = "type")]
    pub kind: String,
    pub recommendation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizationResult {
    pub optimization_score: f64,
    pub tailored_summary: String,
    #[serde(default)]
    pub suggestions: Vec<OptimizationSuggestion>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub improved_resume_section: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conversation_id: Option<String>,
}

// -- Request payloads --

/// Inputs for the optimize call. Exactly one resume source is sent: the file
/// wins when both are present, and neither present is a local error.
#[derive(Debug, Clone, Default)]
pub struct OptimizeInputs {
    pub resume_file: Option<FileUpload>,
    pub resume_content: Option<String>,
    pub job_description: String,
    pub conversation_id: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    pub prompt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_instruction: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conversation_id: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnhanceRequest {
    pub resume_content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section_to_enhance: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enhancement_goal: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conversation_id: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioRequest {
    pub resume_content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverLetterRequest {
    pub resume_content: String,
    pub job_description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
}

// -- Request builders --

pub fn parse_request(file: &FileUpload) -> HttpRequest {
    let mut form = MultipartForm::new();
    form.file("file", file);
    HttpRequest::post_multipart(config::endpoint("/resume/parse"), form)
}

pub fn optimize_request(inputs: &OptimizeInputs) -> Result<HttpRequest, ApiError> {
    let mut form = MultipartForm::new();

    let typed_content = inputs.resume_content.as_deref().filter(|c| !c.is_empty());
    if let Some(file) = &inputs.resume_file {
        form.file("resumeFile", file);
    } else if let Some(content) = typed_content {
        form.field("resumeContent", content);
    } else {
        return Err(ApiError::Invalid(MISSING_RESUME_SOURCE.into()));
    }

    form.field("jobDescription", &inputs.job_description);
    if let Some(id) = &inputs.conversation_id {
        form.field("conversationId", id);
    }

    Ok(HttpRequest::post_multipart(
        config::endpoint("/resume/optimize-from-file"),
        form,
    ))
}

fn json_request(path: &str, payload: &impl Serialize) -> Result<HttpRequest, ApiError> {
    let json = serde_json::to_string(payload).map_err(|e| ApiError::Encode(e.to_string()))?;
    Ok(HttpRequest::post_json(config::endpoint(path), json))
}

pub fn generate_request(payload: &GenerateRequest) -> Result<HttpRequest, ApiError> {
    json_request("/resume/generate-resume", payload)
}

pub fn enhance_request(payload: &EnhanceRequest) -> Result<HttpRequest, ApiError> {
    json_request("/resume/enhance-resume", payload)
}

pub fn portfolio_request(payload: &PortfolioRequest) -> Result<HttpRequest, ApiError> {
    json_request("/resume/generate-portfolio", payload)
}

pub fn cover_letter_request(payload: &CoverLetterRequest) -> Result<HttpRequest, ApiError> {
    json_request("/resume/generate-cover-letter", payload)
}

// -- Async operations --

/// Extract plain text from an uploaded resume file.
pub async fn parse_resume_file(file: &FileUpload) -> Result<String, ApiError> {
    http::fetch_text(parse_request(file)).await
}

/// Score and tailor the resume against a job description.
pub async fn optimize_resume(inputs: &OptimizeInputs) -> Result<OptimizationResult, ApiError> {
    http::fetch_json(optimize_request(inputs)?).await
}

/// Generate a resume in Markdown from a free-form prompt.
pub async fn generate_resume(payload: &GenerateRequest) -> Result<String, ApiError> {
    http::fetch_text(generate_request(payload)?).await
}

/// Rewrite the resume (or one section of it) toward a goal.
pub async fn enhance_resume(payload: &EnhanceRequest) -> Result<String, ApiError> {
    http::fetch_text(enhance_request(payload)?).await
}

/// Build a standalone portfolio page from the resume. Returns full HTML.
pub async fn generate_portfolio(payload: &PortfolioRequest) -> Result<String, ApiError> {
    http::fetch_text(portfolio_request(payload)?).await
}

/// Write a cover letter from the resume and job description.
pub async fn generate_cover_letter(payload: &CoverLetterRequest) -> Result<String, ApiError> {
    http::fetch_text(cover_letter_request(payload)?).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::request::Body;

    fn multipart_text(req: &HttpRequest) -> String {
        match &req.body {
            Body::MultipartFormData { bytes, .. } => String::from_utf8_lossy(bytes).into_owned(),
            other => panic!("expected multipart body, got {:?}", other),
        }
    }

    fn sample_file() -> FileUpload {
        FileUpload {
            filename: "resume.pdf".into(),
            mime_type: "application/pdf".into(),
            bytes: b"%PDF-1.4 resume".to_vec(),
        }
    }

    #[test]
    fn parse_posts_single_file_part() {
        let req = parse_request(&sample_file());
        assert_eq!(req.method, "POST");
        assert!(req.url.ends_with("/resume/parse"));

        let text = multipart_text(&req);
        assert!(text.contains("name=\"file\"; filename=\"resume.pdf\""));
    }

    #[test]
    fn optimize_prefers_file_over_typed_content() {
        let req = optimize_request(&OptimizeInputs {
            resume_file: Some(sample_file()),
            resume_content: Some("typed resume".into()),
            job_description: "Build CLIs in Rust".into(),
            conversation_id: None,
        })
        .unwrap();

        let text = multipart_text(&req);
        assert!(text.contains("name=\"resumeFile\""));
        assert!(!text.contains("name=\"resumeContent\""));
        assert!(text.contains("name=\"jobDescription\""));
        assert!(text.contains("Build CLIs in Rust"));
    }

    #[test]
    fn optimize_sends_typed_content_when_no_file() {
        let req = optimize_request(&OptimizeInputs {
            resume_file: None,
            resume_content: Some("typed resume".into()),
            job_description: "jd".into(),
            conversation_id: Some("conv-7".into()),
        })
        .unwrap();

        let text = multipart_text(&req);
        assert!(text.contains("name=\"resumeContent\""));
        assert!(text.contains("typed resume"));
        assert!(!text.contains("name=\"resumeFile\""));
        assert!(text.contains("name=\"conversationId\""));
        assert!(text.contains("conv-7"));
    }

    #[test]
    fn optimize_without_any_source_is_a_local_error() {
        let err = optimize_request(&OptimizeInputs {
            resume_file: None,
            resume_content: Some(String::new()),
            job_description: "jd".into(),
            conversation_id: None,
        })
        .unwrap_err();

        assert_eq!(err, ApiError::Invalid(MISSING_RESUME_SOURCE.into()));
    }

    #[test]
    fn generate_body_is_camel_case_and_skips_absent_options() {
        let req = generate_request(&GenerateRequest {
            prompt: "junior dev resume".into(),
            system_instruction: None,
            conversation_id: None,
        })
        .unwrap();

        assert!(req.url.ends_with("/resume/generate-resume"));
        match &req.body {
            Body::Json(json) => {
                assert_eq!(json, r#"{"prompt":"junior dev resume"}"#);
            }
            other => panic!("expected json body, got {:?}", other),
        }
    }

    #[test]
    fn enhance_body_includes_present_options_in_camel_case() {
        let req = enhance_request(&EnhanceRequest {
            resume_content: "content".into(),
            section_to_enhance: Some("Experience".into()),
            enhancement_goal: None,
            conversation_id: Some("conv-1".into()),
        })
        .unwrap();

        match &req.body {
            Body::Json(json) => {
                assert!(json.contains("\"resumeContent\":\"content\""));
                assert!(json.contains("\"sectionToEnhance\":\"Experience\""));
                assert!(json.contains("\"conversationId\":\"conv-1\""));
                assert!(!json.contains("enhancementGoal"));
            }
            other => panic!("expected json body, got {:?}", other),
        }
    }

    #[test]
    fn cover_letter_body_carries_both_context_fields() {
        let req = cover_letter_request(&CoverLetterRequest {
            resume_content: "resume".into(),
            job_description: "jd".into(),
            prompt: Some("emphasize leadership".into()),
        })
        .unwrap();

        assert!(req.url.ends_with("/resume/generate-cover-letter"));
        match &req.body {
            Body::Json(json) => {
                assert!(json.contains("\"resumeContent\":\"resume\""));
                assert!(json.contains("\"jobDescription\":\"jd\""));
                assert!(json.contains("\"prompt\":\"emphasize leadership\""));
            }
            other => panic!("expected json body, got {:?}", other),
        }
    }

    #[test]
    fn optimization_result_decodes_backend_shape() {
        let result: OptimizationResult = serde_json::from_str(
            r###"{
                "optimizationScore": 82,
                "tailoredSummary": "Strong match",
                "suggestions": [
                    {"type": "keywords", "recommendation": "Add Rust", "details": ["tokio", "serde"]},
                    {"type": "format", "recommendation": "Shorten summary"}
                ],
                "improvedResumeSection": "## Summary",
                "conversationId": "conv-9"
            }"###,
        )
        .unwrap();

        assert_eq!(result.optimization_score, 82.0);
        assert_eq!(result.suggestions.len(), 2);
        assert_eq!(result.suggestions[0].kind, "keywords");
        assert_eq!(
            result.suggestions[0].details.as_deref(),
            Some(&["tokio".to_string(), "serde".to_string()][..])
        );
        assert_eq!(result.suggestions[1].details, None);
        assert_eq!(result.conversation_id.as_deref(), Some("conv-9"));
    }

    #[test]
    fn optimization_result_tolerates_minimal_payload() {
        let result: OptimizationResult =
            serde_json::from_str(r#"{"optimizationScore": 55, "tailoredSummary": "ok"}"#).unwrap();
        assert!(result.suggestions.is_empty());
        assert_eq!(result.improved_resume_section, None);
        assert_eq!(result.conversation_id, None);
    }
}
