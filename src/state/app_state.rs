// ============================================================================
// APP STATE - Contexto de la aplicación (se pasa explícitamente)
// ============================================================================

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::models::Schema;
use crate::router::Screen;
use crate::state::EventBus;
use crate::stores::SessionStore;
use crate::utils::KeyValueStore;

/// Pantalla actual (solo memoria; el fragmento de la URL es el espejo)
#[derive(Clone, Default)]
pub struct NavigationState {
    current: Rc<Cell<Option<Screen>>>,
}

impl NavigationState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<Screen> {
        self.current.get()
    }

    pub fn set_current(&self, screen: Screen) {
        self.current.set(Some(screen));
    }

    pub fn is_on(&self, screen: Screen) -> bool {
        self.current() == Some(screen)
    }
}

/// Workspace activo y su esquema
#[derive(Clone, Default)]
pub struct WorkspaceState {
    pub active_db_id: Rc<Cell<Option<i64>>>,
    pub active_name: Rc<RefCell<Option<String>>>,
    pub schema: Rc<RefCell<Schema>>,
}

impl WorkspaceState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active_id(&self) -> Option<i64> {
        self.active_db_id.get()
    }

    pub fn activate(&self, id: i64, name: String, schema: Schema) {
        self.active_db_id.set(Some(id));
        *self.active_name.borrow_mut() = Some(name);
        *self.schema.borrow_mut() = schema;
    }

    pub fn set_schema(&self, schema: Schema) {
        *self.schema.borrow_mut() = schema;
    }

    pub fn schema(&self) -> Schema {
        self.schema.borrow().clone()
    }

    pub fn name(&self) -> Option<String> {
        self.active_name.borrow().clone()
    }

    /// Logout: olvidar el workspace activo
    pub fn reset(&self) {
        self.active_db_id.set(None);
        *self.active_name.borrow_mut() = None;
        self.schema.borrow_mut().clear();
    }
}

/// Estado global de la aplicación; clonar es barato (todo Rc)
#[derive(Clone)]
pub struct AppContext {
    pub session: SessionStore,
    pub workspace: WorkspaceState,
    pub navigation: NavigationState,
    pub events: EventBus,
}

impl AppContext {
    pub fn new(storage: Rc<dyn KeyValueStore>) -> Self {
        Self {
            session: SessionStore::new(storage),
            workspace: WorkspaceState::new(),
            navigation: NavigationState::new(),
            events: EventBus::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::MemoryStorage;
    use serde_json::json;

    #[test]
    fn workspace_activate_and_reset() {
        let ws = WorkspaceState::new();
        let schema: Schema = serde_json::from_value(json!({"orders": {"id": 1}})).unwrap();
        ws.activate(4, "Sales".to_string(), schema.clone());

        assert_eq!(ws.active_id(), Some(4));
        assert_eq!(ws.name().as_deref(), Some("Sales"));
        assert_eq!(ws.schema(), schema);

        ws.reset();
        assert_eq!(ws.active_id(), None);
        assert!(ws.schema().is_empty());
    }

    #[test]
    fn context_clones_share_state() {
        let ctx = AppContext::new(Rc::new(MemoryStorage::new()));
        let other = ctx.clone();

        ctx.navigation.set_current(Screen::Chat);
        ctx.session.set_token("t1").unwrap();

        assert!(other.navigation.is_on(Screen::Chat));
        assert_eq!(other.session.get_token().as_deref(), Some("t1"));
    }
}
