// ============================================================================
// API CLIENT - Punto único de salida hacia el backend
// ============================================================================
// - Añade el Bearer token si existe
// - JSON salvo multipart (fetch pone el boundary)
// - Normaliza todo a {success, error, ...payload}
// - 401/422 → limpia la sesión y emite SessionExpired
// Nunca devuelve Err: los fallos son respuestas uniformes.
// ============================================================================

use std::rc::Rc;

use serde::Serialize;
use serde_json::Value;

use crate::config::CONFIG;
use crate::error::ClientError;
use crate::models::*;
use crate::router::Screen;
use crate::services::http::{HttpRequest, HttpResponse, Method, MultipartForm, RequestBody, Transport};
use crate::state::{AppContext, AppEvent, EventBus, NavigationState};
use crate::stores::SessionStore;
use crate::utils::{NETWORK_ERROR_MESSAGE, NOT_FOUND_MESSAGE, SESSION_EXPIRED_MESSAGE};

/// Opciones de `ApiClient::request`
#[derive(Clone, Debug, Default)]
pub struct RequestOptions {
    pub method: Method,
    pub body: Option<RequestBody>,
    pub headers: Vec<(String, String)>,
    /// Fallo al serializar el body JSON; la petición no se envía
    body_error: Option<String>,
}

impl RequestOptions {
    pub fn get() -> Self {
        Self::default()
    }

    pub fn method(method: Method) -> Self {
        Self {
            method,
            ..Self::default()
        }
    }

    pub fn post() -> Self {
        Self::method(Method::Post)
    }

    pub fn put() -> Self {
        Self::method(Method::Put)
    }

    pub fn delete() -> Self {
        Self::method(Method::Delete)
    }

    pub fn json<T: Serialize>(mut self, body: &T) -> Self {
        match serde_json::to_value(body) {
            Ok(value) => self.body = Some(RequestBody::Json(value)),
            Err(e) => self.body_error = Some(ClientError::RequestBuild(e.to_string()).to_string()),
        }
        self
    }

    pub fn multipart(mut self, form: MultipartForm) -> Self {
        self.body = Some(RequestBody::Multipart(form));
        self
    }

    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }
}

#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    transport: Rc<dyn Transport>,
    session: SessionStore,
    navigation: NavigationState,
    events: EventBus,
}

impl ApiClient {
    pub fn new(ctx: &AppContext, transport: Rc<dyn Transport>) -> Self {
        Self::with_base_url(ctx, transport, &CONFIG.api_base_url)
    }

    pub fn with_base_url(ctx: &AppContext, transport: Rc<dyn Transport>, base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            transport,
            session: ctx.session.clone(),
            navigation: ctx.navigation.clone(),
            events: ctx.events.clone(),
        }
    }

    fn build_request(&self, endpoint: &str, options: RequestOptions) -> HttpRequest {
        let mut headers = options.headers;

        if !matches!(options.body, Some(RequestBody::Multipart(_))) {
            headers.retain(|(k, _)| !k.eq_ignore_ascii_case("Content-Type"));
            headers.push(("Content-Type".to_string(), "application/json".to_string()));
        } else {
            // El boundary lo calcula fetch: un Content-Type manual lo rompería
            headers.retain(|(k, _)| !k.eq_ignore_ascii_case("Content-Type"));
        }

        if let Some(token) = self.session.get_token() {
            headers.retain(|(k, _)| !k.eq_ignore_ascii_case("Authorization"));
            headers.push(("Authorization".to_string(), format!("Bearer {}", token)));
        }

        HttpRequest {
            url: format!("{}{}", self.base_url, endpoint),
            method: options.method,
            headers,
            body: options.body,
        }
    }

    /// Petición genérica con la respuesta normalizada
    pub async fn request(&self, endpoint: &str, options: RequestOptions) -> ApiResponse {
        if let Some(error) = &options.body_error {
            log::error!("❌ [API] Body inválido para {}: {}", endpoint, error);
            return ApiResponse::failure(error.clone());
        }
        let request = self.build_request(endpoint, options);
        log::debug!("📤 [API] {} {}", request.method.as_str(), request.url);

        match self.transport.send(request).await {
            Ok(response) => self.classify(endpoint, response),
            Err(e) => {
                log::error!("❌ [API NETWORK ERROR] {}: {}", endpoint, e);
                ApiResponse::failure(NETWORK_ERROR_MESSAGE)
            }
        }
    }

    fn classify(&self, endpoint: &str, response: HttpResponse) -> ApiResponse {
        if response.status == 401 || response.status == 422 {
            log::warn!("⚠️ [API ERROR] Sesión expirada o inválida ({}). Logout.", response.status);
            self.session.clear();
            if !self.navigation.is_on(Screen::Auth) {
                self.events.emit(AppEvent::SessionExpired);
            }
            return ApiResponse::failure(SESSION_EXPIRED_MESSAGE);
        }

        let parsed = serde_json::from_str::<Value>(&response.body);

        if response.status == 404 {
            log::error!("❌ [API ERROR] Ruta no encontrada (404): {}", endpoint);
            let message = parsed
                .ok()
                .and_then(|body| body_message(&body, "error").or_else(|| body_message(&body, "msg")))
                .unwrap_or_else(|| NOT_FOUND_MESSAGE.to_string());
            return ApiResponse::failure(message);
        }

        let body = match parsed {
            Ok(body) => body,
            Err(e) => {
                log::error!("❌ [API NETWORK ERROR] Respuesta no JSON de {}: {}", endpoint, e);
                return ApiResponse::failure(NETWORK_ERROR_MESSAGE);
            }
        };

        if !response.ok() {
            if let Some(msg) = body_message(&body, "msg") {
                return ApiResponse::failure(msg);
            }
        }

        ApiResponse::from_body(body).unwrap_or_else(|| {
            log::error!("❌ [API] Respuesta de {} no es un objeto JSON", endpoint);
            ApiResponse::failure(NETWORK_ERROR_MESSAGE)
        })
    }

    // ------------------------------------------------------------------
    // Auth
    // ------------------------------------------------------------------

    pub async fn login(&self, login_identifier: &str, password: &str) -> ApiResponse {
        let body = LoginRequest {
            login_identifier: login_identifier.to_string(),
            password: password.to_string(),
        };
        self.request("/api/login", RequestOptions::post().json(&body)).await
    }

    pub async fn register(&self, request: &RegisterRequest) -> ApiResponse {
        self.request("/api/register", RequestOptions::post().json(request)).await
    }

    pub async fn auth_status(&self) -> ApiResponse {
        self.request("/api/auth/status", RequestOptions::get()).await
    }

    pub async fn logout(&self) -> ApiResponse {
        self.request("/api/logout", RequestOptions::post()).await
    }

    // ------------------------------------------------------------------
    // Workspaces
    // ------------------------------------------------------------------

    pub async fn list_databases(&self) -> ApiResponse {
        self.request("/api/databases", RequestOptions::get()).await
    }

    pub async fn create_database(&self, name: &str) -> ApiResponse {
        let body = NameRequest { name: name.to_string() };
        self.request("/api/databases", RequestOptions::post().json(&body)).await
    }

    pub async fn rename_database(&self, id: i64, name: &str) -> ApiResponse {
        let body = NameRequest { name: name.to_string() };
        self.request(&format!("/api/databases/{}", id), RequestOptions::put().json(&body))
            .await
    }

    pub async fn delete_database(&self, id: i64) -> ApiResponse {
        self.request(&format!("/api/databases/{}", id), RequestOptions::delete())
            .await
    }

    pub async fn select_database(&self, id: i64) -> ApiResponse {
        let body = SelectDatabaseRequest { id };
        self.request("/api/databases/select", RequestOptions::post().json(&body))
            .await
    }

    // ------------------------------------------------------------------
    // Datos
    // ------------------------------------------------------------------

    pub async fn upload_files(&self, project_id: i64, files: Vec<UploadFile>) -> ApiResponse {
        let form = files.into_iter().fold(
            MultipartForm::new().text("project_id", project_id.to_string()),
            |form, file| form.file("files", file),
        );
        self.request("/api/upload", RequestOptions::post().multipart(form)).await
    }

    pub async fn detect_relationships(&self, project_id: Option<i64>) -> ApiResponse {
        let body = ProjectRequest { project_id };
        self.request("/api/detect-relationships", RequestOptions::post().json(&body))
            .await
    }

    pub async fn rename_table(&self, id: i64, name: &str) -> ApiResponse {
        let body = NameRequest { name: name.to_string() };
        self.request(&format!("/api/tables/{}", id), RequestOptions::put().json(&body))
            .await
    }

    pub async fn delete_table(&self, id: i64) -> ApiResponse {
        self.request(&format!("/api/tables/{}", id), RequestOptions::delete())
            .await
    }

    // ------------------------------------------------------------------
    // Chat
    // ------------------------------------------------------------------

    /// Siempre devuelve una respuesta decodificada; fallos del cliente → `Error`
    pub async fn chat(&self, query: &str, project_id: Option<i64>) -> ChatReply {
        let body = ChatRequest {
            query: query.to_string(),
            project_id,
        };
        let response = self.request("/api/chat", RequestOptions::post().json(&body)).await;

        if !response.success && !response.payload.contains_key("type") {
            if let Some(error) = response.error {
                return ChatReply::Error { message: error };
            }
        }
        ChatReply::from_body(&response.payload)
    }
}

fn body_message(body: &Value, field: &str) -> Option<String> {
    body.get(field)?.as_str().map(str::to_string)
}
