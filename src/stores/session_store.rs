// ============================================================================
// SESSION STORE - Token + perfil persistidos en localStorage
// ============================================================================
// Dos claves independientes (jwt_token, user_info). `session()` da la vista
// conjunta: sin token no hay sesión aunque quede un perfil huérfano.
// ============================================================================

use std::rc::Rc;

use crate::error::ClientResult;
use crate::models::{Session, UserProfile};
use crate::utils::storage::{load_json, save_json, KeyValueStore};
use crate::utils::{TOKEN_STORAGE_KEY, USER_STORAGE_KEY};

#[derive(Clone)]
pub struct SessionStore {
    storage: Rc<dyn KeyValueStore>,
}

impl SessionStore {
    pub fn new(storage: Rc<dyn KeyValueStore>) -> Self {
        Self { storage }
    }

    pub fn set_token(&self, token: &str) -> ClientResult<()> {
        self.storage.set_item(TOKEN_STORAGE_KEY, token)
    }

    pub fn get_token(&self) -> Option<String> {
        self.storage.get_item(TOKEN_STORAGE_KEY)
    }

    pub fn remove_token(&self) -> ClientResult<()> {
        self.storage.remove_item(TOKEN_STORAGE_KEY)
    }

    pub fn set_user(&self, user: &UserProfile) -> ClientResult<()> {
        save_json(self.storage.as_ref(), USER_STORAGE_KEY, user)
    }

    /// Ausente o ilegible → `None`, nunca error
    pub fn get_user(&self) -> Option<UserProfile> {
        load_json(self.storage.as_ref(), USER_STORAGE_KEY)
    }

    pub fn remove_user(&self) -> ClientResult<()> {
        self.storage.remove_item(USER_STORAGE_KEY)
    }

    pub fn session(&self) -> Option<Session> {
        let token = self.get_token()?;
        Some(Session {
            token,
            user: self.get_user(),
        })
    }

    pub fn is_authenticated(&self) -> bool {
        self.get_token().is_some()
    }

    /// Guarda token y perfil tras un login correcto
    pub fn store(&self, token: &str, user: Option<&UserProfile>) -> ClientResult<()> {
        self.set_token(token)?;
        match user {
            Some(user) => self.set_user(user),
            None => self.remove_user(),
        }
    }

    /// Borra ambas claves; un fallo en una no impide borrar la otra
    pub fn clear(&self) {
        if let Err(e) = self.remove_token() {
            log::error!("❌ [SESSION] Error eliminando token: {}", e);
        }
        if let Err(e) = self.remove_user() {
            log::error!("❌ [SESSION] Error eliminando perfil: {}", e);
        }
        log::info!("🗑️ [SESSION] Sesión limpiada");
    }
}
