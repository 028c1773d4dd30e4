// ============================================================================
// VIEWMODELS - Estado + lógica de UI (sin DOM)
// ============================================================================

pub mod auth_viewmodel;
pub mod chat_viewmodel;
pub mod workspace_viewmodel;

pub use auth_viewmodel::AuthViewModel;
pub use chat_viewmodel::ChatViewModel;
pub use workspace_viewmodel::{SchemaExport, UploadOutcome, WorkspaceViewModel};
