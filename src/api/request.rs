//! Plain request descriptions, built synchronously and handed to the fetch
//! executor in `http.rs`. Keeping construction free of browser types lets the
//! builders and their multipart encoding be tested natively.

use uuid::Uuid;

#[derive(Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: String,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Body,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Body {
    Empty,
    Json(String),
    MultipartFormData { boundary: String, bytes: Vec<u8> },
}

impl HttpRequest {
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            method: "GET".into(),
            url: url.into(),
            headers: Vec::new(),
            body: Body::Empty,
        }
    }

    pub fn post_empty(url: impl Into<String>) -> Self {
        Self {
            method: "POST".into(),
            url: url.into(),
            headers: Vec::new(),
            body: Body::Empty,
        }
    }

    pub fn post_json(url: impl Into<String>, json: String) -> Self {
        Self {
            method: "POST".into(),
            url: url.into(),
            headers: vec![("Content-Type".into(), "application/json".into())],
            body: Body::Json(json),
        }
    }

    pub fn post_multipart(url: impl Into<String>, form: MultipartForm) -> Self {
        let (boundary, bytes) = form.finish();
        Self {
            method: "POST".into(),
            url: url.into(),
            headers: vec![(
                "Content-Type".into(),
                format!("multipart/form-data; boundary={}", boundary),
            )],
            body: Body::MultipartFormData { boundary, bytes },
        }
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

impl std::fmt::Debug for HttpRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let body_summary = match &self.body {
            Body::Empty => "Empty".to_string(),
            Body::Json(s) => format!("Json(len={})", s.len()),
            Body::MultipartFormData { boundary, bytes } => {
                format!("MultipartFormData(boundary={}, bytes_len={})", boundary, bytes.len())
            }
        };

        f.debug_struct("HttpRequest")
            .field("method", &self.method)
            .field("url", &self.url)
            .field("headers", &self.headers)
            .field("body", &body_summary)
            .finish()
    }
}

/// Contents of a file chosen in the browser, already read into memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileUpload {
    pub filename: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

/// Incremental multipart/form-data encoder with a random boundary.
pub struct MultipartForm {
    boundary: String,
    bytes: Vec<u8>,
}

impl MultipartForm {
    pub fn new() -> Self {
        Self {
            boundary: format!("Boundary-{}", Uuid::new_v4()),
            bytes: Vec::new(),
        }
    }

    pub fn field(&mut self, name: &str, value: &str) {
        self.bytes
            .extend_from_slice(format!("--{}\r\n", self.boundary).as_bytes());
        self.bytes.extend_from_slice(
            format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n", name).as_bytes(),
        );
        self.bytes.extend_from_slice(value.as_bytes());
        self.bytes.extend_from_slice(b"\r\n");
    }

    pub fn file(&mut self, name: &str, file: &FileUpload) {
        let mime = if file.mime_type.is_empty() {
            "application/octet-stream"
        } else {
            &file.mime_type
        };
        self.bytes
            .extend_from_slice(format!("--{}\r\n", self.boundary).as_bytes());
        self.bytes.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
                name, file.filename
            )
            .as_bytes(),
        );
        self.bytes
            .extend_from_slice(format!("Content-Type: {}\r\n\r\n", mime).as_bytes());
        self.bytes.extend_from_slice(&file.bytes);
        self.bytes.extend_from_slice(b"\r\n");
    }

    /// Appends the closing boundary and returns the encoded form.
    fn finish(mut self) -> (String, Vec<u8>) {
        self.bytes
            .extend_from_slice(format!("--{}--\r\n", self.boundary).as_bytes());
        (self.boundary, self.bytes)
    }
}

impl Default for MultipartForm {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body_text(req: &HttpRequest) -> (String, String) {
        match &req.body {
            Body::MultipartFormData { boundary, bytes } => {
                (boundary.clone(), String::from_utf8_lossy(bytes).into_owned())
            }
            other => panic!("expected multipart body, got {:?}", other),
        }
    }

    #[test]
    fn header_lookup_is_case_insensitive() {
        let req = HttpRequest::post_json("https://example.com".to_string(), "{}".into());
        assert_eq!(req.header("content-type"), Some("application/json"));
        assert_eq!(req.header("CONTENT-TYPE"), Some("application/json"));
        assert_eq!(req.header("accept"), None);
    }

    #[test]
    fn multipart_encodes_text_fields() {
        let mut form = MultipartForm::new();
        form.field("jobDescription", "Senior Rust developer");
        let req = HttpRequest::post_multipart("https://example.com", form);

        let (boundary, text) = body_text(&req);
        assert!(text.contains(&format!("--{}\r\n", boundary)));
        assert!(text.contains("Content-Disposition: form-data; name=\"jobDescription\"\r\n\r\n"));
        assert!(text.contains("Senior Rust developer\r\n"));
        assert!(text.ends_with(&format!("--{}--\r\n", boundary)));
    }

    #[test]
    fn multipart_encodes_file_parts_with_mime_and_filename() {
        let mut form = MultipartForm::new();
        form.file(
            "resumeFile",
            &FileUpload {
                filename: "resume.pdf".into(),
                mime_type: "application/pdf".into(),
                bytes: b"%PDF-1.4".to_vec(),
            },
        );
        let req = HttpRequest::post_multipart("https://example.com", form);

        let (boundary, text) = body_text(&req);
        assert!(text.contains(
            "Content-Disposition: form-data; name=\"resumeFile\"; filename=\"resume.pdf\"\r\n"
        ));
        assert!(text.contains("Content-Type: application/pdf\r\n\r\n%PDF-1.4\r\n"));
        assert_eq!(
            req.header("content-type"),
            Some(format!("multipart/form-data; boundary={}", boundary).as_str())
        );
    }

    #[test]
    fn multipart_defaults_missing_mime_type() {
        let mut form = MultipartForm::new();
        form.file(
            "file",
            &FileUpload {
                filename: "resume.txt".into(),
                mime_type: String::new(),
                bytes: b"plain".to_vec(),
            },
        );
        let req = HttpRequest::post_multipart("https://example.com", form);

        let (_, text) = body_text(&req);
        assert!(text.contains("Content-Type: application/octet-stream\r\n"));
    }

    #[test]
    fn debug_summarizes_body_instead_of_dumping_bytes() {
        let mut form = MultipartForm::new();
        form.field("a", "b");
        let req = HttpRequest::post_multipart("https://example.com", form);

        let s = format!("{:?}", req);
        assert!(s.contains("MultipartFormData(boundary="));
        assert!(!s.contains("Content-Disposition"));
    }
}
