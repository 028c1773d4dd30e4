// ============================================================================
// AISTORA FRONTEND - MVVM (RUST PURO + WASM)
// ============================================================================
// Arquitectura:
// - Views: Funciones que renderizan HTML (sin lógica)
// - ViewModels: Lógica UI, devuelven valores o mensajes de error
// - Services: SOLO comunicación API
// - State / Stores: AppContext con Rc<RefCell> + sesión persistida
// - Models: Estructuras compartidas con backend
// Todo lo que toca el DOM vive en `dom` y `app` (solo wasm32); el resto se
// prueba con `cargo test` nativo.
// ============================================================================

pub mod config;
pub mod error;
pub mod models;
pub mod router;
pub mod services;
pub mod state;
pub mod stores;
pub mod utils;
pub mod viewmodels;
pub mod views;

#[cfg(target_arch = "wasm32")]
mod app;
#[cfg(target_arch = "wasm32")]
mod dom;

#[cfg(test)]
mod test_support;

#[cfg(target_arch = "wasm32")]
mod entry {
    use std::cell::RefCell;

    use wasm_bindgen::prelude::*;

    use crate::app::App;
    use crate::config::CONFIG;

    // Instancia global de App (mantiene vivos los closures que captura)
    thread_local! {
        static APP: RefCell<Option<App>> = RefCell::new(None);
    }

    #[wasm_bindgen(start)]
    pub fn main() -> Result<(), JsValue> {
        // Inicializar panic hook para mejor debugging
        console_error_panic_hook::set_once();

        if CONFIG.is_logging_enabled() {
            wasm_logger::init(wasm_logger::Config::new(CONFIG.log_level()));
        }
        log::info!("🚀 AIStora - Rust Puro + MVVM ({})", CONFIG.environment);

        let app = App::new()?;
        app.start()?;

        APP.with(|cell| {
            *cell.borrow_mut() = Some(app);
        });
        Ok(())
    }
}
