//! File helpers: picked files into memory, response bytes out as downloads

use crm_core::api::UploadFile;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Blob, BlobPropertyBag, File, FileList, HtmlAnchorElement, Url};

pub(crate) fn bytes_to_blob(bytes: &[u8], content_type: Option<&str>) -> Result<Blob, JsValue> {
    let array = js_sys::Uint8Array::from(bytes);
    let parts = js_sys::Array::of1(&array);
    let options = BlobPropertyBag::new();
    if let Some(content_type) = content_type {
        options.set_type(content_type);
    }
    Blob::new_with_u8_array_sequence_and_options(&parts, &options)
}

pub async fn read_file(file: &File) -> Result<UploadFile, JsValue> {
    let buffer = JsFuture::from(file.array_buffer()).await?;
    let bytes = js_sys::Uint8Array::new(&buffer).to_vec();
    let content_type = Some(file.type_()).filter(|t| !t.is_empty());
    Ok(UploadFile { name: file.name(), content_type, bytes })
}

/// Read every file of an `<input type="file">` or drop event
pub async fn read_file_list(list: &FileList) -> Result<Vec<UploadFile>, JsValue> {
    let mut files = Vec::with_capacity(list.length() as usize);
    for index in 0..list.length() {
        if let Some(file) = list.get(index) {
            files.push(read_file(&file).await?);
        }
    }
    Ok(files)
}

/// Hand bytes to the browser as a file download
pub fn save_download(bytes: &[u8], content_type: Option<&str>, file_name: &str) -> Result<(), JsValue> {
    let blob = bytes_to_blob(bytes, content_type)?;
    let url = Url::create_object_url_with_blob(&blob)?;

    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let anchor: HtmlAnchorElement = document.create_element("a")?.dyn_into()?;
    anchor.set_href(&url);
    anchor.set_download(file_name);
    anchor.click();

    Url::revoke_object_url(&url)
}
