//! Reading `<input type="file">` selections into uploads.

#[cfg(test)]
#[path = "files_test.rs"]
mod files_test;

use helenite::net::transport::FileUpload;

/// MIME type for an upload whose browser-reported type is blank.
pub fn guess_content_type(file_name: &str) -> &'static str {
    let extension = file_name.rsplit_once('.').map(|(_, ext)| ext.to_ascii_lowercase());
    match extension.as_deref() {
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("png") => "image/png",
        _ => "application/octet-stream",
    }
}

pub fn upload(file_name: String, content_type: String, bytes: Vec<u8>) -> FileUpload {
    let content_type = if content_type.is_empty() {
        guess_content_type(&file_name).to_owned()
    } else {
        content_type
    };
    FileUpload { file_name, content_type, bytes }
}

/// First file selected in `input`, read fully into memory.
#[cfg(feature = "hydrate")]
pub async fn read_selected(input: &web_sys::HtmlInputElement) -> Option<FileUpload> {
    let file = input.files()?.get(0)?;
    let buffer = wasm_bindgen_futures::JsFuture::from(file.array_buffer()).await.ok()?;
    let bytes = js_sys::Uint8Array::new(&buffer).to_vec();
    Some(upload(file.name(), file.type_(), bytes))
}
