// ============================================================================
// EVENT HANDLING - Sistema de eventos
// ============================================================================
// GESTIÓN DE MEMORY LEAKS:
// - Todos los listeners se registran UNA VEZ al arrancar, sobre elementos que
//   viven toda la sesión (el contenido dinámico usa delegación), así que
//   closure.forget() no acumula closures.
// ============================================================================

use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{DragEvent, Element, Event, EventTarget, KeyboardEvent, MouseEvent};

use crate::views::UiAction;

/// Listener genérico
pub fn on_event<E, F>(target: &EventTarget, event_type: &str, handler: F) -> Result<(), JsValue>
where
    E: JsCast + 'static,
    F: FnMut(E) + 'static,
{
    let mut handler = handler;
    let closure = Closure::wrap(Box::new(move |event: Event| match event.dyn_into::<E>() {
        Ok(event) => handler(event),
        Err(_) => log::warn!("⚠️ [EVENTS] Tipo de evento inesperado"),
    }) as Box<dyn FnMut(Event)>);
    target.add_event_listener_with_callback(event_type, closure.as_ref().unchecked_ref())?;
    // Nota: closure.forget() es necesario para mantener el closure vivo en Rust WASM
    closure.forget();
    Ok(())
}

/// Helper para crear click handler simple
pub fn on_click<F>(element: &Element, handler: F) -> Result<(), JsValue>
where
    F: FnMut(MouseEvent) + 'static,
{
    on_event::<MouseEvent, _>(element, "click", handler)
}

/// Click por ID; si el elemento no existe en esta página no se registra nada
pub fn on_click_id<F>(id: &str, handler: F) -> Result<(), JsValue>
where
    F: FnMut(MouseEvent) + 'static,
{
    match crate::dom::get_element_by_id(id) {
        Some(el) => on_click(&el, handler),
        None => {
            log::debug!("🔍 [EVENTS] #{} no existe, listener omitido", id);
            Ok(())
        }
    }
}

pub fn on_keydown<F>(element: &Element, handler: F) -> Result<(), JsValue>
where
    F: FnMut(KeyboardEvent) + 'static,
{
    on_event::<KeyboardEvent, _>(element, "keydown", handler)
}

/// dragover / dragleave / drop
pub fn on_drag<F>(element: &Element, event_type: &str, handler: F) -> Result<(), JsValue>
where
    F: FnMut(DragEvent) + 'static,
{
    on_event::<DragEvent, _>(element, event_type, handler)
}

/// Listener global en window (registrar una sola vez)
pub fn on_window_event<F>(event_type: &str, handler: F) -> Result<(), JsValue>
where
    F: FnMut(Event) + 'static,
{
    let win = crate::dom::window().ok_or_else(|| JsValue::from_str("No window"))?;
    on_event::<Event, _>(&win, event_type, handler)
}

/// Delegación: un único listener de click en `root` que traduce el elemento
/// `[data-action]` más cercano al objetivo en un `UiAction`.
/// El handler recibe también el elemento que declara la acción.
pub fn delegate_actions<F>(root: &Element, handler: F) -> Result<(), JsValue>
where
    F: FnMut(UiAction, Element) + 'static,
{
    let mut handler = handler;
    on_click(root, move |event: MouseEvent| {
        let Some(target) = event.target().and_then(|t| t.dyn_into::<Element>().ok()) else {
            return;
        };
        let Ok(Some(source)) = target.closest("[data-action]") else {
            return;
        };
        let Some(action_name) = source.get_attribute("data-action") else {
            return;
        };

        let action = UiAction::from_attributes(&action_name, |key| {
            source.get_attribute(&format!("data-{}", key))
        });
        if let Some(action) = action {
            log::debug!("👆 [EVENTS] {:?}", action);
            event.prevent_default();
            handler(action, source);
        }
    })
}
