//! Fetch Transport
//!
//! Sends `ApiRequest`s with gloo-net. JSON bodies are serialized here; multipart bodies are
//! rebuilt as a `FormData` so the browser sets the boundary itself.

use async_trait::async_trait;
use gloo_net::http::{Request, RequestBuilder};
use wasm_bindgen::JsValue;
use web_sys::{FormData, RequestCredentials};

use crm_core::api::{ApiRequest, ApiResponse, Method, MultipartPart, PartValue, RequestBody, Transport, TransportError};

use super::files::bytes_to_blob;

#[derive(Debug, Clone, Copy, Default)]
pub struct FetchTransport;

fn builder(method: Method, url: &str) -> RequestBuilder {
    match method {
        Method::Get => Request::get(url),
        Method::Post => Request::post(url),
        Method::Put => Request::put(url),
        Method::Delete => Request::delete(url),
    }
}

fn request_error(err: gloo_net::Error) -> TransportError {
    match err {
        // fetch() rejects with a TypeError when the server can't be reached
        gloo_net::Error::JsError(e) => TransportError::Network(e.to_string()),
        other => TransportError::Request(other.to_string()),
    }
}

fn js_error(value: JsValue) -> TransportError {
    TransportError::Request(format!("{:?}", value))
}

fn form_data(parts: &[MultipartPart]) -> Result<FormData, TransportError> {
    let form = FormData::new().map_err(js_error)?;
    for part in parts {
        match &part.value {
            PartValue::Text(text) => form.append_with_str(&part.name, text).map_err(js_error)?,
            PartValue::File { file_name, content_type, bytes } => {
                let blob = bytes_to_blob(bytes, content_type.as_deref()).map_err(js_error)?;
                form.append_with_blob_and_filename(&part.name, &blob, file_name)
                    .map_err(js_error)?
            }
        }
    }
    Ok(form)
}

#[async_trait(?Send)]
impl Transport for FetchTransport {
    async fn send(&self, url: &str, request: &ApiRequest, token: Option<&str>) -> Result<ApiResponse, TransportError> {
        let mut builder = builder(request.method, url).credentials(RequestCredentials::Include);
        if let Some(token) = token {
            builder = builder.header("Authorization", &format!("Bearer {}", token));
        }

        let prepared = match &request.body {
            RequestBody::Empty => builder.header("Content-Type", "application/json").build(),
            RequestBody::Json(value) => {
                let text = serde_json::to_string(value).map_err(|e| TransportError::Request(e.to_string()))?;
                builder
                    .header("Content-Type", "application/json")
                    .body(JsValue::from_str(&text))
            }
            RequestBody::Multipart(parts) => builder.body(form_data(parts)?),
        }
        .map_err(request_error)?;

        let response = prepared.send().await.map_err(request_error)?;
        let status = response.status();
        let content_type = response.headers().get("content-type");
        let body = response.binary().await.map_err(request_error)?;

        Ok(ApiResponse { status, content_type, body })
    }
}
