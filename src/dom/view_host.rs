// ============================================================================
// DOM VIEW HOST - El router sobre el documento real
// ============================================================================
// Regiones `screen-<id>` (clase `.screen`), barra `global-nav`,
// history.pushState({screen}, "", "#<id>").
// ============================================================================

use wasm_bindgen::JsValue;

use crate::dom::{set_visible_by_id, window};
use crate::router::{Screen, ViewHost};

pub const GLOBAL_NAV_ID: &str = "global-nav";

#[derive(Clone, Default)]
pub struct DomViewHost;

impl DomViewHost {
    pub fn new() -> Self {
        Self
    }

    /// `{screen: "<id>"}` para history.state
    fn history_state(screen: Screen) -> Result<JsValue, JsValue> {
        let state = js_sys::Object::new();
        js_sys::Reflect::set(&state, &JsValue::from_str("screen"), &JsValue::from_str(screen.id()))?;
        Ok(state.into())
    }

    /// Lee `state.screen` de un evento popstate
    pub fn screen_from_state(state: &JsValue) -> Option<String> {
        if state.is_null() || state.is_undefined() {
            return None;
        }
        js_sys::Reflect::get(state, &JsValue::from_str("screen"))
            .ok()?
            .as_string()
    }
}

impl ViewHost for DomViewHost {
    fn set_screen_visible(&self, screen: Screen, visible: bool) {
        set_visible_by_id(&format!("screen-{}", screen.id()), visible);
    }

    fn set_nav_visible(&self, visible: bool) {
        set_visible_by_id(GLOBAL_NAV_ID, visible);
    }

    fn push_history(&self, screen: Screen) {
        let Some(history) = window().and_then(|w| w.history().ok()) else {
            log::warn!("⚠️ [ROUTER] history no disponible");
            return;
        };
        let result = Self::history_state(screen).and_then(|state| {
            history.push_state_with_url(&state, "", Some(&format!("#{}", screen.id())))
        });
        if let Err(e) = result {
            log::error!("❌ [ROUTER] pushState falló: {:?}", e);
        }
    }

    fn location_fragment(&self) -> String {
        window()
            .and_then(|w| w.location().hash().ok())
            .map(|hash| hash.trim_start_matches('#').to_string())
            .unwrap_or_default()
    }
}
