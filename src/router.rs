// ============================================================================
// ROUTER - Navegación entre pantallas sin recargar la página
// ============================================================================
// `navigate` = `show` + entrada nueva en el historial + #fragmento.
// `show` no toca el historial: lo usan navigate y popstate (back/forward),
// así recorrer el historial no crea entradas nuevas.
// ============================================================================

use std::fmt;
use std::rc::Rc;
use std::str::FromStr;

use crate::state::NavigationState;

/// Pantallas lógicas (conjunto cerrado)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Screen {
    Landing,
    Auth,
    Dashboard,
    Uploader,
    Chat,
}

impl Screen {
    pub const ALL: [Screen; 5] = [
        Screen::Landing,
        Screen::Auth,
        Screen::Dashboard,
        Screen::Uploader,
        Screen::Chat,
    ];

    /// Identificador usado en el fragmento (`#db`) y en el markup (`screen-db`)
    pub fn id(self) -> &'static str {
        match self {
            Screen::Landing => "landing",
            Screen::Auth => "auth",
            Screen::Dashboard => "db",
            Screen::Uploader => "uploader",
            Screen::Chat => "chat",
        }
    }

    /// Pantallas accesibles sin sesión: sin barra de navegación global
    pub fn is_public(self) -> bool {
        matches!(self, Screen::Landing | Screen::Auth)
    }

    /// Pantalla codificada en un fragmento (`#chat`, `chat` o vacío)
    pub fn from_fragment(fragment: &str) -> Option<Self> {
        fragment.trim_start_matches('#').parse().ok()
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownScreen(pub String);

impl fmt::Display for UnknownScreen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown screen '{}'", self.0)
    }
}

impl FromStr for Screen {
    type Err = UnknownScreen;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Screen::ALL
            .into_iter()
            .find(|screen| screen.id() == s)
            .ok_or_else(|| UnknownScreen(s.to_string()))
    }
}

/// Lo que el router necesita del navegador
pub trait ViewHost {
    /// Mostrar u ocultar la región `screen-<id>`
    fn set_screen_visible(&self, screen: Screen, visible: bool);
    /// Mostrar u ocultar la barra de navegación global
    fn set_nav_visible(&self, visible: bool);
    /// `history.pushState({screen}, "", "#<id>")`
    fn push_history(&self, screen: Screen);
    /// Fragmento actual de la URL, sin `#`
    fn location_fragment(&self) -> String;
}

#[derive(Clone)]
pub struct Router {
    host: Rc<dyn ViewHost>,
    navigation: NavigationState,
}

impl Router {
    pub fn new(host: Rc<dyn ViewHost>, navigation: NavigationState) -> Self {
        Self { host, navigation }
    }

    pub fn current(&self) -> Option<Screen> {
        self.navigation.current()
    }

    /// Cambiar de pantalla y registrar la entrada en el historial
    pub fn navigate(&self, screen: Screen) {
        log::info!("🧭 [ROUTER] navigate → {}", screen);
        self.show(screen);
        self.host.push_history(screen);
    }

    /// Cambiar de pantalla sin tocar el historial
    pub fn show(&self, screen: Screen) {
        for other in Screen::ALL {
            if other != screen {
                self.host.set_screen_visible(other, false);
            }
        }
        self.host.set_screen_visible(screen, true);
        self.host.set_nav_visible(!screen.is_public());
        self.navigation.set_current(screen);
    }

    /// `show` por identificador; identificadores desconocidos no cambian nada
    pub fn show_id(&self, id: &str) -> bool {
        match id.parse::<Screen>() {
            Ok(screen) => {
                self.show(screen);
                true
            }
            Err(e) => {
                log::warn!("⚠️ [ROUTER] {}", e);
                false
            }
        }
    }

    /// popstate (back/forward): estado ausente o desconocido se ignora
    pub fn handle_pop_state(&self, state: Option<&str>) {
        match state {
            Some(id) => {
                log::info!("🧭 [ROUTER] popstate → {}", id);
                self.show_id(id);
            }
            None => log::debug!("🧭 [ROUTER] popstate sin estado, ignorado"),
        }
    }

    /// Pantalla del fragmento actual, si es conocida
    pub fn fragment_screen(&self) -> Option<Screen> {
        Screen::from_fragment(&self.host.location_fragment())
    }

    /// Registra la pantalla inicial (markup del servidor) sin transición
    pub fn adopt_initial(&self, screen: Screen) {
        self.navigation.set_current(screen);
    }
}
