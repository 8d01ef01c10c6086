//! `gloo-net` implementation of [`HttpTransport`].
//!
//! Client-side (hydrate): real HTTP calls through `fetch`.
//! Server-side (SSR): every request fails with a transport error since the
//! API is only called from the browser.

#[cfg(test)]
#[path = "transport_test.rs"]
mod transport_test;

use helenite::net::ApiError;
use helenite::net::transport::{ApiRequest, ApiResponse, HttpTransport};
#[cfg(feature = "hydrate")]
use helenite::net::transport::Method;
#[cfg(any(test, feature = "hydrate"))]
use helenite::net::transport::{FormValue, RequestBody};

#[derive(Clone, Copy, Debug, Default)]
pub struct GlooTransport;

#[cfg(any(test, feature = "hydrate"))]
fn bearer_header(token: &str) -> String {
    format!("Bearer {token}")
}

/// Multipart bodies let the browser pick the boundary, so only JSON sets a
/// content type.
#[cfg(any(test, feature = "hydrate"))]
fn content_type(body: &RequestBody) -> Option<&'static str> {
    match body {
        RequestBody::Json(_) => Some("application/json"),
        RequestBody::Empty | RequestBody::Multipart(_) => None,
    }
}

#[cfg(any(test, feature = "hydrate"))]
fn text_fields(body: &RequestBody) -> Vec<(&str, &str)> {
    let RequestBody::Multipart(parts) = body else {
        return Vec::new();
    };
    parts
        .iter()
        .filter_map(|p| match &p.value {
            FormValue::Text(text) => Some((p.name.as_str(), text.as_str())),
            FormValue::File(_) => None,
        })
        .collect()
}

#[cfg(feature = "hydrate")]
fn gloo_method(method: Method) -> gloo_net::http::Method {
    match method {
        Method::Get => gloo_net::http::Method::GET,
        Method::Post => gloo_net::http::Method::POST,
        Method::Put => gloo_net::http::Method::PUT,
        Method::Patch => gloo_net::http::Method::PATCH,
        Method::Delete => gloo_net::http::Method::DELETE,
    }
}

#[cfg(feature = "hydrate")]
fn js_error(err: &wasm_bindgen::JsValue) -> ApiError {
    ApiError::Transport(format!("{err:?}"))
}

#[cfg(feature = "hydrate")]
fn form_data(body: &RequestBody) -> Result<web_sys::FormData, ApiError> {
    let form = web_sys::FormData::new().map_err(|e| js_error(&e))?;
    for (name, value) in text_fields(body) {
        form.append_with_str(name, value).map_err(|e| js_error(&e))?;
    }
    if let RequestBody::Multipart(parts) = body {
        for part in parts {
            let FormValue::File(upload) = &part.value else {
                continue;
            };
            let bytes = js_sys::Uint8Array::from(upload.bytes.as_slice());
            let options = web_sys::BlobPropertyBag::new();
            options.set_type(&upload.content_type);
            let blob = web_sys::Blob::new_with_u8_array_sequence_and_options(&js_sys::Array::of1(&bytes), &options)
                .map_err(|e| js_error(&e))?;
            form.append_with_blob_and_filename(&part.name, &blob, &upload.file_name)
                .map_err(|e| js_error(&e))?;
        }
    }
    Ok(form)
}

#[async_trait::async_trait(?Send)]
impl HttpTransport for GlooTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        #[cfg(feature = "hydrate")]
        {
            use gloo_net::http::RequestBuilder;

            let mut builder = RequestBuilder::new(&request.url).method(gloo_method(request.method));
            if let Some(token) = &request.bearer {
                builder = builder.header("Authorization", &bearer_header(token));
            }
            if let Some(kind) = content_type(&request.body) {
                builder = builder.header("Content-Type", kind);
            }
            let built = match &request.body {
                RequestBody::Empty => builder.build(),
                RequestBody::Json(value) => builder.json(value),
                RequestBody::Multipart(_) => builder.body(form_data(&request.body)?),
            }
            .map_err(|e| ApiError::Transport(e.to_string()))?;

            let response = built.send().await.map_err(|e| ApiError::Transport(e.to_string()))?;
            let status = response.status();
            let body = response.binary().await.map_err(|e| ApiError::Transport(e.to_string()))?;
            Ok(ApiResponse::new(status, body))
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = request;
            Err(ApiError::Transport("not available on server".to_owned()))
        }
    }
}
