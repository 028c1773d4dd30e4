// ============================================================================
// SERVICES - SOLO comunicación con el backend
// ============================================================================

pub mod api_client;
pub mod http;

pub use api_client::{ApiClient, RequestOptions};
#[cfg(target_arch = "wasm32")]
pub use http::FetchTransport;
pub use http::{HttpRequest, HttpResponse, Method, MultipartForm, RequestBody, Transport};
