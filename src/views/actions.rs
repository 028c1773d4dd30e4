// ============================================================================
// UI ACTIONS - Acciones tipadas leídas de los atributos data-*
// ============================================================================
// El markup declara `data-action="delete-db" data-id="3"`; un único listener
// delegado traduce el elemento pulsado a un `UiAction` y lo despacha.
// ============================================================================

use crate::router::Screen;

#[derive(Debug, Clone, PartialEq)]
pub enum UiAction {
    Navigate(Screen),
    Logout,
    ShowLogin,
    ShowRegister,
    CreateDb,
    SelectDb(i64),
    RenameDb { id: i64, name: String },
    DeleteDb(i64),
    PreviewTable(String),
    RenameTable { id: i64, name: String },
    DeleteTable(i64),
    ExportSchema,
    /// Exportar a CSV la tabla del mensaje indicado
    ExportCsv(String),
    OpenImage(String),
    CloseImage,
    /// Mostrar/ocultar el bloque de query que sigue al botón
    ToggleQuery,
}

impl UiAction {
    /// Nombre usado en `data-action`
    pub fn name(&self) -> &'static str {
        match self {
            UiAction::Navigate(_) => "navigate",
            UiAction::Logout => "logout",
            UiAction::ShowLogin => "show-login",
            UiAction::ShowRegister => "show-register",
            UiAction::CreateDb => "create-db",
            UiAction::SelectDb(_) => "select-db",
            UiAction::RenameDb { .. } => "rename-db",
            UiAction::DeleteDb(_) => "delete-db",
            UiAction::PreviewTable(_) => "preview-table",
            UiAction::RenameTable { .. } => "rename-table",
            UiAction::DeleteTable(_) => "delete-table",
            UiAction::ExportSchema => "export-schema",
            UiAction::ExportCsv(_) => "export-csv",
            UiAction::OpenImage(_) => "open-image",
            UiAction::CloseImage => "close-image",
            UiAction::ToggleQuery => "toggle-query",
        }
    }

    /// Construye la acción a partir de `data-action` y un lector de los demás
    /// atributos `data-*` (clave sin prefijo: "id", "name", "url", "screen").
    /// Acciones desconocidas o con atributos inválidos → `None`.
    pub fn from_attributes<F>(action: &str, data: F) -> Option<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let id = || data("id")?.trim().parse::<i64>().ok();
        let name = || data("name").unwrap_or_default();

        let parsed = match action {
            "navigate" => UiAction::Navigate(data("screen")?.parse().ok()?),
            "logout" => UiAction::Logout,
            "show-login" => UiAction::ShowLogin,
            "show-register" => UiAction::ShowRegister,
            "create-db" => UiAction::CreateDb,
            "select-db" => UiAction::SelectDb(id()?),
            "rename-db" => UiAction::RenameDb { id: id()?, name: name() },
            "delete-db" => UiAction::DeleteDb(id()?),
            "preview-table" => UiAction::PreviewTable(name()),
            "rename-table" => UiAction::RenameTable { id: id()?, name: name() },
            "delete-table" => UiAction::DeleteTable(id()?),
            "export-schema" => UiAction::ExportSchema,
            "export-csv" => UiAction::ExportCsv(data("id")?),
            "open-image" => UiAction::OpenImage(data("url")?),
            "close-image" => UiAction::CloseImage,
            "toggle-query" => UiAction::ToggleQuery,
            other => {
                log::warn!("⚠️ [ACTIONS] data-action desconocida: {}", other);
                return None;
            }
        };
        Some(parsed)
    }
}
