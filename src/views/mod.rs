// ============================================================================
// VIEWS - Renderizado (sin lógica de negocio)
// ============================================================================

pub mod actions;
pub mod chat_view;
pub mod workspace_view;

pub use actions::UiAction;
pub use chat_view::*;
pub use workspace_view::*;
