// ============================================================================
// TEST SUPPORT - Dobles de prueba para transporte y navegador
// ============================================================================

use std::cell::{Cell, RefCell};
use std::collections::{HashSet, VecDeque};
use std::rc::Rc;

use async_trait::async_trait;

use crate::error::{ClientError, ClientResult};
use crate::router::{Router, Screen, ViewHost};
use crate::services::{ApiClient, HttpRequest, HttpResponse, Transport};
use crate::state::AppContext;
use crate::utils::MemoryStorage;

pub use futures::executor::block_on;

pub fn test_context() -> AppContext {
    AppContext::new(Rc::new(MemoryStorage::new()))
}

/// Contexto + api + router sobre dobles de prueba
pub struct Harness {
    pub ctx: AppContext,
    pub api: ApiClient,
    pub router: Router,
    pub transport: Rc<MockTransport>,
    pub host: Rc<RecordingHost>,
}

impl Harness {
    pub fn new() -> Self {
        let ctx = test_context();
        let transport = Rc::new(MockTransport::new());
        let host = Rc::new(RecordingHost::new());
        let api = ApiClient::with_base_url(&ctx, transport.clone(), "");
        let router = Router::new(host.clone(), ctx.navigation.clone());
        Self {
            ctx,
            api,
            router,
            transport,
            host,
        }
    }
}

/// Respuestas en cola; registra cada petición enviada
#[derive(Default)]
pub struct MockTransport {
    responses: RefCell<VecDeque<ClientResult<HttpResponse>>>,
    requests: RefCell<Vec<HttpRequest>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(&self, status: u16, body: &str) {
        self.responses
            .borrow_mut()
            .push_back(Ok(HttpResponse::new(status, body)));
    }

    pub fn fail(&self, message: &str) {
        self.responses
            .borrow_mut()
            .push_back(Err(ClientError::Network(message.to_string())));
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.borrow().clone()
    }

    pub fn last_request(&self) -> Option<HttpRequest> {
        self.requests.borrow().last().cloned()
    }

    pub fn urls(&self) -> Vec<String> {
        self.requests.borrow().iter().map(|r| r.url.clone()).collect()
    }
}

#[async_trait(?Send)]
impl Transport for MockTransport {
    async fn send(&self, request: HttpRequest) -> ClientResult<HttpResponse> {
        self.requests.borrow_mut().push(request);
        self.responses
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(ClientError::Network("no response queued".to_string())))
    }
}

/// Navegador simulado: regiones visibles, barra global e historial con cursor
#[derive(Default)]
pub struct RecordingHost {
    visible: RefCell<HashSet<Screen>>,
    nav: Cell<Option<bool>>,
    entries: RefCell<Vec<Screen>>,
    cursor: Cell<Option<usize>>,
    fragment: RefCell<String>,
    visibility_calls: Cell<usize>,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arranque con un fragmento ya presente en la URL
    pub fn with_fragment(fragment: &str) -> Self {
        let host = Self::default();
        *host.fragment.borrow_mut() = fragment.to_string();
        host
    }

    pub fn visible_screens(&self) -> Vec<Screen> {
        let visible = self.visible.borrow();
        Screen::ALL
            .into_iter()
            .filter(|screen| visible.contains(screen))
            .collect()
    }

    pub fn history(&self) -> Vec<Screen> {
        self.entries.borrow().clone()
    }

    pub fn nav_visible(&self) -> Option<bool> {
        self.nav.get()
    }

    pub fn visibility_calls(&self) -> usize {
        self.visibility_calls.get()
    }

    /// Botón "atrás": mueve el cursor y devuelve el estado de la entrada
    pub fn back(&self) -> Option<String> {
        let cursor = self.cursor.get()?;
        if cursor == 0 {
            return None;
        }
        let screen = self.entries.borrow()[cursor - 1];
        self.cursor.set(Some(cursor - 1));
        *self.fragment.borrow_mut() = screen.id().to_string();
        Some(screen.id().to_string())
    }
}

impl ViewHost for RecordingHost {
    fn set_screen_visible(&self, screen: Screen, visible: bool) {
        self.visibility_calls.set(self.visibility_calls.get() + 1);
        if visible {
            self.visible.borrow_mut().insert(screen);
        } else {
            self.visible.borrow_mut().remove(&screen);
        }
    }

    fn set_nav_visible(&self, visible: bool) {
        self.nav.set(Some(visible));
    }

    fn push_history(&self, screen: Screen) {
        let mut entries = self.entries.borrow_mut();
        if let Some(cursor) = self.cursor.get() {
            entries.truncate(cursor + 1);
        }
        entries.push(screen);
        self.cursor.set(Some(entries.len() - 1));
        *self.fragment.borrow_mut() = screen.id().to_string();
    }

    fn location_fragment(&self) -> String {
        self.fragment.borrow().clone()
    }
}
