//! Fetch executor for `HttpRequest` descriptions, plus the browser-side file
//! save used by exports. This is the only API layer that touches `web_sys`.

use serde::de::DeserializeOwned;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{
    Blob, BlobPropertyBag, Headers, Request, RequestCredentials, RequestInit, Response, Url,
};

use super::error::ApiError;
use super::request::{Body, HttpRequest};

/// Performs the fetch. Cookies are always included so the backend session
/// travels with every call.
pub async fn send(req: HttpRequest) -> Result<Response, ApiError> {
    let opts = RequestInit::new();
    opts.set_method(&req.method);
    opts.set_credentials(RequestCredentials::Include);

    let headers = Headers::new().map_err(|_| ApiError::Network)?;
    for (name, value) in &req.headers {
        headers.append(name, value).map_err(|_| ApiError::Network)?;
    }
    opts.set_headers(&headers);

    match &req.body {
        Body::Empty => {}
        Body::Json(json) => opts.set_body(&JsValue::from_str(json)),
        Body::MultipartFormData { bytes, .. } => {
            opts.set_body(&js_sys::Uint8Array::from(bytes.as_slice()));
        }
    }

    let request =
        Request::new_with_str_and_init(&req.url, &opts).map_err(|_| ApiError::Network)?;
    let window = web_sys::window().ok_or(ApiError::Network)?;

    JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(|_| ApiError::Network)?
        .dyn_into::<Response>()
        .map_err(|_| ApiError::Network)
}

/// Turns a non-2xx response into the structured `ApiError`.
pub async fn ensure_success(response: &Response) -> Result<(), ApiError> {
    if response.ok() {
        return Ok(());
    }
    let status = response.status();
    let body = response_text(response).await.unwrap_or_default();
    Err(ApiError::from_error_body(status, &body))
}

pub async fn response_text(response: &Response) -> Result<String, ApiError> {
    let promise = response
        .text()
        .map_err(|e| ApiError::Decode(describe_js(&e)))?;
    let value = JsFuture::from(promise)
        .await
        .map_err(|e| ApiError::Decode(describe_js(&e)))?;
    Ok(value.as_string().unwrap_or_default())
}

pub async fn response_json(response: &Response) -> Result<JsValue, ApiError> {
    let promise = response
        .json()
        .map_err(|e| ApiError::Decode(describe_js(&e)))?;
    JsFuture::from(promise)
        .await
        .map_err(|e| ApiError::Decode(describe_js(&e)))
}

pub async fn response_bytes(response: &Response) -> Result<Vec<u8>, ApiError> {
    let promise = response
        .array_buffer()
        .map_err(|e| ApiError::Decode(describe_js(&e)))?;
    let buffer = JsFuture::from(promise)
        .await
        .map_err(|e| ApiError::Decode(describe_js(&e)))?;
    Ok(js_sys::Uint8Array::new(&buffer).to_vec())
}

/// Sends the request and reads the body as text.
pub async fn fetch_text(req: HttpRequest) -> Result<String, ApiError> {
    let response = send(req).await?;
    ensure_success(&response).await?;
    response_text(&response).await
}

/// Sends the request and decodes a JSON body into `T`.
pub async fn fetch_json<T: DeserializeOwned>(req: HttpRequest) -> Result<T, ApiError> {
    let response = send(req).await?;
    ensure_success(&response).await?;
    let value = response_json(&response).await?;
    serde_wasm_bindgen::from_value(value).map_err(|e| ApiError::Decode(e.to_string()))
}

/// Sends the request and reads the body as raw bytes.
pub async fn fetch_bytes(req: HttpRequest) -> Result<Vec<u8>, ApiError> {
    let response = send(req).await?;
    ensure_success(&response).await?;
    response_bytes(&response).await
}

/// Saves bytes as a local file through a Blob object URL and a synthetic
/// anchor click.
pub fn save_file(filename: &str, mime_type: &str, bytes: &[u8]) -> Result<(), ApiError> {
    let parts = js_sys::Array::new();
    parts.push(&js_sys::Uint8Array::from(bytes));

    let props = BlobPropertyBag::new();
    props.set_type(mime_type);
    let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &props)
        .map_err(|e| ApiError::Download(describe_js(&e)))?;
    let url = Url::create_object_url_with_blob(&blob)
        .map_err(|e| ApiError::Download(describe_js(&e)))?;

    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| ApiError::Download("no document".into()))?;
    let anchor: web_sys::HtmlAnchorElement = document
        .create_element("a")
        .map_err(|e| ApiError::Download(describe_js(&e)))?
        .dyn_into()
        .map_err(|_| ApiError::Download("anchor element unavailable".into()))?;
    anchor.set_href(&url);
    anchor.set_download(filename);

    // The anchor must be in the DOM for the click to download in all browsers.
    if let Some(body) = document.body() {
        let _ = body.append_child(&anchor);
        anchor.click();
        let _ = body.remove_child(&anchor);
    } else {
        anchor.click();
    }

    let _ = Url::revoke_object_url(&url);
    Ok(())
}

fn describe_js(value: &JsValue) -> String {
    value
        .as_string()
        .unwrap_or_else(|| format!("{:?}", value))
}
