// ============================================================================
// APP - Aplicación principal: conecta DOM, router y ViewModels
// ============================================================================
// Todos los listeners se registran una vez en `start()`. El contenido
// dinámico (tarjetas, mensajes) se atiende con un único listener delegado
// que despacha `UiAction`.
// ============================================================================

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Element, FileList, HtmlElement, HtmlInputElement, KeyboardEvent, PopStateEvent};

use crate::config::CONFIG;
use crate::dom::*;
use crate::models::{ChatReply, RegisterForm, Row};
use crate::router::{Router, Screen};
use crate::services::{ApiClient, FetchTransport};
use crate::state::{AppContext, AppEvent};
use crate::utils::storage::browser_storage;
use crate::utils::{
    rows_to_csv, CSV_EXPORT_FILENAME, IMAGE_MODAL_ID, MODAL_DOWNLOAD_LINK_ID, MODAL_IMAGE_ID,
};
use crate::viewmodels::auth_viewmodel::REGISTER_SUCCESS_MESSAGE;
use crate::viewmodels::{AuthViewModel, ChatViewModel, WorkspaceViewModel};
use crate::views::*;

const DROP_HIGHLIGHT: [&str; 2] = ["border-sky-500", "bg-sky-50"];

/// Aplicación principal
#[derive(Clone)]
pub struct App {
    ctx: AppContext,
    router: Router,
    auth: AuthViewModel,
    workspace: WorkspaceViewModel,
    chat: ChatViewModel,
    /// Filas de cada respuesta tabular del chat (para "Export CSV").
    /// Crece con cada tabla y vive lo que vive la página: el botón de
    /// exportar de cualquier mensaje anterior debe seguir funcionando.
    chat_tables: Rc<RefCell<HashMap<String, Vec<Row>>>>,
    message_seq: Rc<Cell<u32>>,
}

impl App {
    /// Crear nueva aplicación
    pub fn new() -> Result<Self, JsValue> {
        let ctx = AppContext::new(browser_storage());
        let router = Router::new(Rc::new(DomViewHost::new()), ctx.navigation.clone());
        let api = ApiClient::new(&ctx, Rc::new(FetchTransport::new()));

        Ok(Self {
            auth: AuthViewModel::new(ctx.clone(), api.clone(), router.clone()),
            workspace: WorkspaceViewModel::new(ctx.clone(), api.clone(), router.clone()),
            chat: ChatViewModel::new(ctx.clone(), api),
            ctx,
            router,
            chat_tables: Rc::new(RefCell::new(HashMap::new())),
            message_seq: Rc::new(Cell::new(0)),
        })
    }

    /// Registrar listeners y comprobar la sesión guardada
    pub fn start(&self) -> Result<(), JsValue> {
        log::info!("🎬 [APP] Arrancando");

        // Pantalla inicial: la del markup/fragmento, sin transición forzada
        let initial = self.router.fragment_screen().unwrap_or(Screen::Landing);
        self.router.adopt_initial(initial);

        self.bind_session_events();
        self.bind_history()?;
        self.bind_auth()?;
        self.bind_workspace()?;
        self.bind_upload()?;
        self.bind_chat()?;
        self.bind_actions()?;

        let app = self.clone();
        spawn_local(async move {
            if app.auth.check_session().await {
                app.load_databases().await;
            }
        });
        Ok(())
    }

    fn next_message_id(&self) -> String {
        let seq = self.message_seq.get() + 1;
        self.message_seq.set(seq);
        format!("msg-{}", seq)
    }

    // ========================================================================
    // Sesión y navegación
    // ========================================================================

    fn bind_session_events(&self) {
        let app = self.clone();
        self.ctx.events.subscribe(move |event| match event {
            AppEvent::SessionExpired => {
                log::warn!("🔒 [APP] Sesión expirada, volviendo a auth");
                let message = app.auth.on_session_expired();
                show_auth_error(message);
            }
        });
    }

    fn bind_history(&self) -> Result<(), JsValue> {
        let router = self.router.clone();
        on_window_event("popstate", move |event| {
            let state = event
                .dyn_ref::<PopStateEvent>()
                .and_then(|e| DomViewHost::screen_from_state(&e.state()));
            router.handle_pop_state(state.as_deref());
        })
    }

    // ========================================================================
    // Auth
    // ========================================================================

    fn bind_auth(&self) -> Result<(), JsValue> {
        let app = self.clone();
        on_click_id("btn-login", move |event| {
            event.prevent_default();
            let app = app.clone();
            spawn_local(async move { app.handle_login().await });
        })?;

        let app = self.clone();
        on_click_id("btn-register", move |event| {
            event.prevent_default();
            let app = app.clone();
            spawn_local(async move { app.handle_register().await });
        })
    }

    async fn handle_login(&self) {
        let identifier = input_value("login-identifier").unwrap_or_default();
        let password = input_value("login-password").unwrap_or_default();

        set_loading("btn-login", true);
        let result = self.auth.login(&identifier, &password).await;
        set_loading("btn-login", false);

        match result {
            Ok(_) => self.load_databases().await,
            Err(message) => show_auth_error(&message),
        }
    }

    async fn handle_register(&self) {
        let form = RegisterForm {
            full_name: input_value("reg-fullname").unwrap_or_default(),
            username: input_value("reg-username").unwrap_or_default(),
            email: input_value("reg-email").unwrap_or_default(),
            password: input_value("reg-password").unwrap_or_default(),
            confirm_password: input_value("reg-confirm-password").unwrap_or_default(),
            accepted_terms: is_checked("reg-terms"),
        };

        set_loading("btn-register", true);
        let result = self.auth.register(&form).await;
        set_loading("btn-register", false);

        match result {
            Ok(()) => {
                alert(REGISTER_SUCCESS_MESSAGE);
                toggle_auth_mode(true);
            }
            Err(message) => show_auth_error(&message),
        }
    }

    // ========================================================================
    // Workspaces
    // ========================================================================

    fn bind_workspace(&self) -> Result<(), JsValue> {
        let app = self.clone();
        on_click_id("btn-create-db", move |event| {
            event.prevent_default();
            let app = app.clone();
            spawn_local(async move { app.handle_create_database().await });
        })
    }

    async fn load_databases(&self) {
        match self.workspace.load_databases().await {
            Ok(databases) => {
                set_html_by_id("db-list", &render_database_cards(&databases));
                refresh_icons();
            }
            Err(e) => log::error!("❌ [APP] No se pudieron cargar los workspaces: {}", e),
        }
    }

    async fn handle_create_database(&self) {
        let name = input_value("new-db-name").unwrap_or_default();
        match self.workspace.create_database(&name).await {
            Ok(()) => {
                set_input_value("new-db-name", "");
                set_visible_by_id("modal-create-db", false);
                self.load_databases().await;
            }
            Err(message) => alert(&message),
        }
    }

    async fn handle_select_database(&self, id: i64) {
        match self.workspace.select_database(id).await {
            Ok(name) => {
                set_text_by_id("active-db-name", &name);
                self.render_architecture();
            }
            Err(e) => log::warn!("⚠️ [APP] Selección de workspace {} fallida: {}", id, e),
        }
    }

    fn render_architecture(&self) {
        set_html_by_id("file-list", &render_schema_cards(&self.workspace.tables()));
        refresh_icons();
    }

    async fn handle_table_change(&self, result: Result<bool, String>) {
        match result {
            Ok(true) => {
                if let Some(name) = self.workspace.active_name() {
                    set_text_by_id("active-db-name", &name);
                }
                self.render_architecture();
            }
            Ok(false) => {}
            Err(message) => alert(&message),
        }
    }

    // ========================================================================
    // Upload
    // ========================================================================

    fn bind_upload(&self) -> Result<(), JsValue> {
        let (Some(drop_zone), Some(file_input)) =
            (get_element_by_id("drop-zone"), get_element_by_id("file-upload"))
        else {
            return Ok(());
        };

        {
            let file_input = file_input.clone();
            on_click(&drop_zone, move |_| {
                if let Some(input) = file_input.dyn_ref::<HtmlElement>() {
                    input.click();
                }
            })?;
        }

        {
            let zone = drop_zone.clone();
            on_drag(&drop_zone, "dragover", move |event| {
                event.prevent_default();
                highlight_drop_zone(&zone, true);
            })?;
        }

        {
            let zone = drop_zone.clone();
            on_drag(&drop_zone, "dragleave", move |event| {
                event.prevent_default();
                highlight_drop_zone(&zone, false);
            })?;
        }

        {
            let zone = drop_zone.clone();
            let app = self.clone();
            on_drag(&drop_zone, "drop", move |event| {
                event.prevent_default();
                highlight_drop_zone(&zone, false);
                if let Some(files) = event.data_transfer().and_then(|dt| dt.files()) {
                    app.spawn_upload(files);
                }
            })?;
        }

        let app = self.clone();
        on_event::<web_sys::Event, _>(&file_input, "change", move |event| {
            let files = event
                .target()
                .and_then(|t| t.dyn_into::<HtmlInputElement>().ok())
                .and_then(|input| input.files());
            if let Some(files) = files {
                app.spawn_upload(files);
            }
        })
    }

    fn spawn_upload(&self, files: FileList) {
        let app = self.clone();
        spawn_local(async move { app.handle_upload(files).await });
    }

    async fn handle_upload(&self, list: FileList) {
        if list.length() == 0 {
            return;
        }
        let files = match read_upload_files(&list).await {
            Ok(files) => files,
            Err(e) => {
                log::error!("❌ [APP] No se pudieron leer los ficheros: {:?}", e);
                return;
            }
        };

        set_visible_by_id("loading-overlay", true);
        set_text_by_id("integrity-status-text", "Analyzing...");
        let result = self.workspace.upload(files).await;
        set_visible_by_id("loading-overlay", false);

        match result {
            Ok(Some(outcome)) => {
                set_html_by_id("file-list", &render_schema_cards(&outcome.tables));
                if let Ok(relationships) = &outcome.relationships {
                    set_html_by_id("relationship-list", &render_relationships(relationships));
                    set_text_by_id("integrity-status-text", "Verified");
                }
                refresh_icons();
            }
            Ok(None) => {}
            Err(message) => alert(&format!("Upload failed: {}", message)),
        }
    }

    // ========================================================================
    // Chat
    // ========================================================================

    fn bind_chat(&self) -> Result<(), JsValue> {
        let app = self.clone();
        on_click_id("chat-send", move |_| app.send_message())?;

        if let Some(input) = get_element_by_id("chat-input") {
            let app = self.clone();
            on_keydown(&input, move |event: KeyboardEvent| {
                if event.key() == "Enter" && !event.shift_key() {
                    event.prevent_default();
                    app.send_message();
                }
            })?;
        }
        Ok(())
    }

    fn send_message(&self) {
        let text = input_value("chat-input").unwrap_or_default();
        if text.trim().is_empty() {
            return;
        }
        let Some(thread) = get_element_by_id("chat-thread") else {
            log::warn!("⚠️ [APP] #chat-thread no existe");
            return;
        };

        set_input_value("chat-input", "");
        let thinking_id = self.next_message_id();
        let rendered = append_html(&thread, &render_user_message(text.trim()))
            .and_then(|_| append_html(&thread, &render_thinking(&thinking_id)));
        if let Err(e) = rendered {
            log::error!("❌ [APP] Error pintando el chat: {:?}", e);
        }
        refresh_icons();

        let app = self.clone();
        spawn_local(async move {
            let reply = app.chat.send(&text).await;
            if let Some(indicator) = get_element_by_id(&thinking_id) {
                indicator.remove();
            }
            if let Some(reply) = reply {
                app.append_reply(&thread, reply);
            }
        });
    }

    fn append_reply(&self, thread: &Element, reply: ChatReply) {
        let message_id = self.next_message_id();
        let html = render_assistant_reply(&message_id, &reply);
        if let ChatReply::Table { rows, .. } = reply {
            self.chat_tables.borrow_mut().insert(message_id, rows);
        }
        if let Err(e) = append_html(thread, &html) {
            log::error!("❌ [APP] Error pintando respuesta: {:?}", e);
        }
        refresh_icons();
    }

    fn export_csv(&self, message_id: &str) {
        let csv = self
            .chat_tables
            .borrow()
            .get(message_id)
            .and_then(|rows| rows_to_csv(rows));
        match csv {
            Some(csv) => {
                if let Err(e) = download_text(CSV_EXPORT_FILENAME, &csv, "text/csv;charset=utf-8;") {
                    log::error!("❌ [APP] Exportación CSV fallida: {:?}", e);
                }
            }
            None => log::warn!("⚠️ [APP] Sin filas para exportar en {}", message_id),
        }
    }

    // ========================================================================
    // Acciones delegadas
    // ========================================================================

    fn bind_actions(&self) -> Result<(), JsValue> {
        let root = document()
            .and_then(|doc| doc.body())
            .ok_or_else(|| JsValue::from_str("No body"))?;
        let app = self.clone();
        delegate_actions(&root, move |action, source| app.dispatch(action, source))
    }

    fn dispatch(&self, action: UiAction, source: Element) {
        let app = self.clone();
        match action {
            UiAction::Navigate(screen) => self.router.navigate(screen),
            UiAction::Logout => {
                if confirm("Are you sure you want to log out?") {
                    spawn_local(async move { app.auth.logout().await });
                }
            }
            UiAction::ShowLogin => toggle_auth_mode(true),
            UiAction::ShowRegister => toggle_auth_mode(false),
            UiAction::CreateDb => spawn_local(async move { app.handle_create_database().await }),
            UiAction::SelectDb(id) => spawn_local(async move { app.handle_select_database(id).await }),
            UiAction::RenameDb { id, name } => {
                let Some(new_name) = prompt("Rename Workspace:", &name) else {
                    return;
                };
                spawn_local(async move {
                    match app.workspace.rename_database(id, &name, &new_name).await {
                        Ok(true) => app.load_databases().await,
                        Ok(false) => {}
                        Err(message) => alert(&message),
                    }
                });
            }
            UiAction::DeleteDb(id) => {
                if !confirm("Are you sure you want to delete this workspace? This action cannot be undone.") {
                    return;
                }
                spawn_local(async move {
                    match app.workspace.delete_database(id).await {
                        Ok(()) => app.load_databases().await,
                        Err(message) => alert(&message),
                    }
                });
            }
            UiAction::PreviewTable(name) => alert(&format!("Preview for {} (Backend route pending)", name)),
            UiAction::RenameTable { id, name } => {
                let Some(new_name) = prompt("Rename table:", &name) else {
                    return;
                };
                spawn_local(async move {
                    let result = app.workspace.rename_table(id, &new_name).await;
                    app.handle_table_change(result).await;
                });
            }
            UiAction::DeleteTable(id) => {
                if !confirm("Are you sure? This cannot be undone.") {
                    return;
                }
                spawn_local(async move {
                    let result = app.workspace.delete_table(id).await.map(|_| true);
                    app.handle_table_change(result).await;
                });
            }
            UiAction::ExportSchema => match self.workspace.export_schema() {
                Ok(export) => {
                    if let Err(e) = download_text(&export.filename, &export.json, "application/json") {
                        log::error!("❌ [APP] Exportación de esquema fallida: {:?}", e);
                    }
                }
                Err(message) => alert(&message),
            },
            UiAction::ExportCsv(message_id) => self.export_csv(&message_id),
            UiAction::OpenImage(url) => open_image_modal(&url),
            UiAction::CloseImage => set_visible_by_id(IMAGE_MODAL_ID, false),
            UiAction::ToggleQuery => {
                if let Some(block) = source.next_element_sibling() {
                    if let Err(e) = block.class_list().toggle(HIDDEN_CLASS) {
                        log::error!("❌ [APP] toggle query: {:?}", e);
                    }
                }
            }
        }
    }
}

/// Banner de error de auth; se oculta solo tras `auth_error_timeout_ms`
fn show_auth_error(message: &str) {
    let Some(banner) = get_element_by_id("auth-error") else {
        alert(message);
        return;
    };
    set_text_by_id("auth-error-msg", message);
    if let Err(e) = set_visible(&banner, true) {
        log::error!("❌ [APP] Banner de auth: {:?}", e);
    }
    Timeout::new(CONFIG.auth_error_timeout_ms, move || {
        if let Err(e) = set_visible(&banner, false) {
            log::error!("❌ [APP] Banner de auth: {:?}", e);
        }
    })
    .forget();
}

/// Pestañas login / registro
fn toggle_auth_mode(login: bool) {
    set_visible_by_id("form-login", login);
    set_visible_by_id("form-register", !login);
}

fn highlight_drop_zone(zone: &Element, on: bool) {
    for class in DROP_HIGHLIGHT {
        let result = if on {
            add_class(zone, class)
        } else {
            remove_class(zone, class)
        };
        if let Err(e) = result {
            log::error!("❌ [APP] drop-zone: {:?}", e);
        }
    }
}

fn open_image_modal(url: &str) {
    for (id, attr) in [(MODAL_IMAGE_ID, "src"), (MODAL_DOWNLOAD_LINK_ID, "href")] {
        if let Some(el) = get_element_by_id(id) {
            if let Err(e) = el.set_attribute(attr, url) {
                log::error!("❌ [APP] #{}: {:?}", id, e);
                return;
            }
        }
    }
    set_visible_by_id(IMAGE_MODAL_ID, true);
}
