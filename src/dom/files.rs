// ============================================================================
// FILES - Lectura de ficheros del usuario y descargas
// ============================================================================

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Blob, BlobPropertyBag, FileList, HtmlElement, Url};

use crate::dom::{document, ElementBuilder};
use crate::models::UploadFile;

/// Copia el contenido de cada fichero a memoria para el multipart
pub async fn read_upload_files(list: &FileList) -> Result<Vec<UploadFile>, JsValue> {
    let mut files = Vec::with_capacity(list.length() as usize);
    for index in 0..list.length() {
        let Some(file) = list.get(index) else {
            continue;
        };
        let buffer = JsFuture::from(file.array_buffer()).await?;
        files.push(UploadFile {
            name: file.name(),
            content_type: file.type_(),
            bytes: js_sys::Uint8Array::new(&buffer).to_vec(),
        });
    }
    Ok(files)
}

/// Descarga `content` como fichero vía Blob + object URL + `<a download>`
pub fn download_text(filename: &str, content: &str, mime: &str) -> Result<(), JsValue> {
    let parts = js_sys::Array::of1(&JsValue::from_str(content));
    let options = BlobPropertyBag::new();
    options.set_type(mime);
    let blob = Blob::new_with_str_sequence_and_options(&parts, &options)?;
    let url = Url::create_object_url_with_blob(&blob)?;

    let body = document()
        .and_then(|doc| doc.body())
        .ok_or_else(|| JsValue::from_str("No body"))?;
    let anchor = ElementBuilder::new("a")?
        .attr("href", &url)?
        .attr("download", filename)?
        .build();
    body.append_child(&anchor)?;
    if let Some(link) = anchor.dyn_ref::<HtmlElement>() {
        link.click();
    }
    anchor.remove();
    Url::revoke_object_url(&url)?;

    log::info!("💾 [FILES] Descargado {}", filename);
    Ok(())
}
