// ============================================================================
// AUTH VIEWMODEL - Login, registro, comprobación de sesión y logout
// ============================================================================
// Devuelve valores o mensajes de error; la View decide cómo mostrarlos.
// ============================================================================

use crate::models::{AuthStatus, LoginResponse, RegisterForm, RegisterRequest, UserProfile};
use crate::router::{Router, Screen};
use crate::services::ApiClient;
use crate::state::AppContext;
use crate::utils::{SESSION_EXPIRED_BANNER, UNEXPECTED_RESPONSE_MESSAGE};

pub const LOGIN_REQUIRED_MESSAGE: &str = "Please enter your email/username and password.";
pub const FIELDS_REQUIRED_MESSAGE: &str = "All fields are required.";
pub const PASSWORD_MISMATCH_MESSAGE: &str = "Passwords do not match.";
pub const TERMS_REQUIRED_MESSAGE: &str = "You must agree to the Terms of Service.";
pub const REGISTER_SUCCESS_MESSAGE: &str = "Account created successfully! Please log in.";

#[derive(Clone)]
pub struct AuthViewModel {
    ctx: AppContext,
    api: ApiClient,
    router: Router,
}

impl AuthViewModel {
    pub fn new(ctx: AppContext, api: ApiClient, router: Router) -> Self {
        Self { ctx, api, router }
    }

    /// Login: guarda token + perfil y va al dashboard
    pub async fn login(&self, identifier: &str, password: &str) -> Result<Option<UserProfile>, String> {
        let identifier = identifier.trim();
        if identifier.is_empty() || password.is_empty() {
            return Err(LOGIN_REQUIRED_MESSAGE.to_string());
        }

        log::info!("🔐 [AUTH] Login de {}", identifier);
        let response = self.api.login(identifier, password).await;
        let LoginResponse { token, user } = response.into_result(UNEXPECTED_RESPONSE_MESSAGE)?;

        self.ctx
            .session
            .store(&token, user.as_ref())
            .map_err(|e| e.to_string())?;

        log::info!("✅ [AUTH] Login correcto");
        self.router.navigate(Screen::Dashboard);
        Ok(user)
    }

    /// Validación del formulario de registro, en el orden en que se muestran los errores
    pub fn validate_registration(form: &RegisterForm) -> Result<RegisterRequest, String> {
        let full_name = form.full_name.trim();
        let username = form.username.trim();
        let email = form.email.trim();

        if full_name.is_empty() || username.is_empty() || email.is_empty() || form.password.is_empty() {
            return Err(FIELDS_REQUIRED_MESSAGE.to_string());
        }
        if form.password != form.confirm_password {
            return Err(PASSWORD_MISMATCH_MESSAGE.to_string());
        }
        if !form.accepted_terms {
            return Err(TERMS_REQUIRED_MESSAGE.to_string());
        }

        Ok(RegisterRequest {
            full_name: full_name.to_string(),
            username: username.to_string(),
            email: email.to_string(),
            password: form.password.clone(),
        })
    }

    pub async fn register(&self, form: &RegisterForm) -> Result<(), String> {
        let request = Self::validate_registration(form)?;
        log::info!("📝 [AUTH] Registro de {}", request.username);
        self.api
            .register(&request)
            .await
            .into_unit(UNEXPECTED_RESPONSE_MESSAGE)
    }

    /// Arranque: si hay token, validar contra el backend y restaurar la pantalla.
    /// Devuelve si la sesión sigue viva.
    pub async fn check_session(&self) -> bool {
        if !self.ctx.session.is_authenticated() {
            log::info!("ℹ️ [AUTH] Sin token guardado");
            return false;
        }

        let response = self.api.auth_status().await;
        let status: AuthStatus = match serde_json::from_value(serde_json::Value::Object(response.to_body())) {
            Ok(status) => status,
            Err(e) => {
                log::warn!("⚠️ [AUTH] Estado de sesión ilegible: {}", e);
                AuthStatus {
                    is_logged_in: false,
                    user: None,
                }
            }
        };

        if !status.is_logged_in {
            log::warn!("⚠️ [AUTH] Token rechazado, eliminándolo");
            if let Err(e) = self.ctx.session.remove_token() {
                log::error!("❌ [AUTH] Error eliminando token: {}", e);
            }
            return false;
        }

        if let Some(user) = &status.user {
            if let Err(e) = self.ctx.session.set_user(user) {
                log::error!("❌ [AUTH] Error guardando perfil: {}", e);
            }
        }

        let target = match self.router.fragment_screen() {
            Some(screen) if !screen.is_public() => screen,
            _ => Screen::Dashboard,
        };
        log::info!("✅ [AUTH] Sesión válida, restaurando #{}", target);
        self.router.navigate(target);
        true
    }

    /// Logout explícito (la confirmación la pide la View)
    pub async fn logout(&self) {
        log::info!("🚪 [AUTH] Logout");
        let response = self.api.logout().await;
        if !response.success {
            log::debug!("🚪 [AUTH] /api/logout sin éxito: {:?}", response.error);
        }
        self.ctx.session.clear();
        self.ctx.workspace.reset();
        self.router.navigate(Screen::Auth);
    }

    /// Reacción a `AppEvent::SessionExpired`: vuelve a auth y devuelve el mensaje del banner
    pub fn on_session_expired(&self) -> &'static str {
        self.ctx.workspace.reset();
        self.router.navigate(Screen::Auth);
        SESSION_EXPIRED_BANNER
    }
}
