// ============================================================================
// DOM MODULE - Helpers para manipulación DOM (solo wasm32)
// ============================================================================

pub mod builder;
pub mod element;
pub mod events;
pub mod files;
pub mod view_host;

pub use builder::*;
pub use element::*;
pub use events::*;
pub use files::*;
pub use view_host::DomViewHost;
