// ============================================================================
// HTTP - Descriptor de petición y transporte
// ============================================================================
// El transporte solo mueve bytes: no interpreta status ni añade headers.
// ============================================================================

use async_trait::async_trait;
use serde_json::Value;

use crate::error::ClientResult;
use crate::models::UploadFile;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Method {
    #[default]
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

/// Campo de un formulario multipart
#[derive(Clone, Debug, PartialEq)]
pub enum FormField {
    Text { name: String, value: String },
    File { name: String, file: UploadFile },
}

#[derive(Clone, Debug, PartialEq, Default)]
pub struct MultipartForm {
    pub fields: Vec<FormField>,
}

impl MultipartForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, name: &str, value: impl Into<String>) -> Self {
        self.fields.push(FormField::Text {
            name: name.to_string(),
            value: value.into(),
        });
        self
    }

    pub fn file(mut self, name: &str, file: UploadFile) -> Self {
        self.fields.push(FormField::File {
            name: name.to_string(),
            file,
        });
        self
    }

    pub fn text_value(&self, name: &str) -> Option<&str> {
        self.fields.iter().find_map(|field| match field {
            FormField::Text { name: n, value } if n == name => Some(value.as_str()),
            _ => None,
        })
    }

    pub fn file_names(&self) -> Vec<&str> {
        self.fields
            .iter()
            .filter_map(|field| match field {
                FormField::File { file, .. } => Some(file.name.as_str()),
                _ => None,
            })
            .collect()
    }
}

/// Cuerpo de la petición: un único modo de codificación
#[derive(Clone, Debug, PartialEq)]
pub enum RequestBody {
    Json(Value),
    Multipart(MultipartForm),
}

#[derive(Clone, Debug, PartialEq)]
pub struct HttpRequest {
    pub url: String,
    pub method: Method,
    pub headers: Vec<(String, String)>,
    pub body: Option<RequestBody>,
}

impl HttpRequest {
    /// Valor de un header (nombre sin distinguir mayúsculas)
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Envío de peticiones HTTP (fetch en el navegador)
#[async_trait(?Send)]
pub trait Transport {
    async fn send(&self, request: HttpRequest) -> ClientResult<HttpResponse>;
}

#[cfg(target_arch = "wasm32")]
mod fetch {
    use super::*;
    use crate::error::ClientError;
    use gloo_net::http::RequestBuilder;
    use wasm_bindgen::JsValue;
    use web_sys::{Blob, BlobPropertyBag, FormData};

    /// `window.fetch` vía gloo-net
    #[derive(Clone, Default)]
    pub struct FetchTransport;

    impl FetchTransport {
        pub fn new() -> Self {
            Self
        }
    }

    fn js_err(e: JsValue) -> ClientError {
        ClientError::RequestBuild(format!("{:?}", e))
    }

    fn form_data(form: &MultipartForm) -> ClientResult<FormData> {
        let data = FormData::new().map_err(js_err)?;
        for field in &form.fields {
            match field {
                FormField::Text { name, value } => {
                    data.append_with_str(name, value).map_err(js_err)?;
                }
                FormField::File { name, file } => {
                    let bytes = js_sys::Uint8Array::from(file.bytes.as_slice());
                    let parts = js_sys::Array::of1(&bytes);
                    let options = BlobPropertyBag::new();
                    options.set_type(&file.content_type);
                    let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &options)
                        .map_err(js_err)?;
                    data.append_with_blob_and_filename(name, &blob, &file.name)
                        .map_err(js_err)?;
                }
            }
        }
        Ok(data)
    }

    #[async_trait(?Send)]
    impl Transport for FetchTransport {
        async fn send(&self, request: HttpRequest) -> ClientResult<HttpResponse> {
            let method = match request.method {
                Method::Get => gloo_net::http::Method::GET,
                Method::Post => gloo_net::http::Method::POST,
                Method::Put => gloo_net::http::Method::PUT,
                Method::Delete => gloo_net::http::Method::DELETE,
            };

            let mut builder = RequestBuilder::new(&request.url).method(method);
            for (name, value) in &request.headers {
                builder = builder.header(name, value);
            }

            let built = match &request.body {
                None => builder.build(),
                Some(RequestBody::Json(value)) => builder.body(value.to_string()),
                Some(RequestBody::Multipart(form)) => builder.body(form_data(form)?),
            }
            .map_err(|e| ClientError::RequestBuild(e.to_string()))?;

            let response = built
                .send()
                .await
                .map_err(|e| ClientError::Network(e.to_string()))?;
            let status = response.status();
            let body = response
                .text()
                .await
                .map_err(|e| ClientError::Network(e.to_string()))?;

            Ok(HttpResponse { status, body })
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use fetch::FetchTransport;
