// ============================================================================
// STORAGE - Almacén clave/valor persistente
// ============================================================================
// En el navegador: localStorage. Fuera del navegador (tests, o si el usuario
// bloquea el storage): memoria.
// ============================================================================

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use serde::{de::DeserializeOwned, Serialize};

use crate::error::ClientResult;

/// Almacén clave/valor de texto con la semántica de `window.localStorage`
pub trait KeyValueStore {
    fn get_item(&self, key: &str) -> Option<String>;
    fn set_item(&self, key: &str, value: &str) -> ClientResult<()>;
    fn remove_item(&self, key: &str) -> ClientResult<()>;
}

/// Almacén en memoria (no sobrevive a una recarga)
#[derive(Clone, Default)]
pub struct MemoryStorage {
    items: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.borrow().is_empty()
    }
}

impl KeyValueStore for MemoryStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.borrow().get(key).cloned()
    }

    fn set_item(&self, key: &str, value: &str) -> ClientResult<()> {
        self.items.borrow_mut().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> ClientResult<()> {
        self.items.borrow_mut().remove(key);
        Ok(())
    }
}

pub fn save_json<T: Serialize>(store: &dyn KeyValueStore, key: &str, value: &T) -> ClientResult<()> {
    let json = serde_json::to_string(value)?;
    store.set_item(key, &json)
}

/// Lee y parsea un valor JSON; ausente o corrupto → `None`
pub fn load_json<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> Option<T> {
    let json = store.get_item(key)?;
    match serde_json::from_str(&json) {
        Ok(value) => Some(value),
        Err(e) => {
            log::warn!("⚠️ [STORAGE] Valor corrupto en '{}': {}", key, e);
            None
        }
    }
}

#[cfg(target_arch = "wasm32")]
mod browser {
    use super::*;
    use crate::error::ClientError;
    use web_sys::{window, Storage};

    /// `window.localStorage`
    pub struct LocalStorage {
        storage: Storage,
    }

    impl LocalStorage {
        pub fn open() -> Option<Self> {
            let storage = window()?.local_storage().ok()??;
            Some(Self { storage })
        }
    }

    impl KeyValueStore for LocalStorage {
        fn get_item(&self, key: &str) -> Option<String> {
            self.storage.get_item(key).ok().flatten()
        }

        fn set_item(&self, key: &str, value: &str) -> ClientResult<()> {
            self.storage
                .set_item(key, value)
                .map_err(|e| ClientError::Storage(format!("{:?}", e)))
        }

        fn remove_item(&self, key: &str) -> ClientResult<()> {
            self.storage
                .remove_item(key)
                .map_err(|e| ClientError::Storage(format!("{:?}", e)))
        }
    }

    /// localStorage si está disponible, memoria en caso contrario
    pub fn browser_storage() -> Rc<dyn KeyValueStore> {
        match LocalStorage::open() {
            Some(storage) => Rc::new(storage),
            None => {
                log::warn!("⚠️ [STORAGE] localStorage no disponible, usando memoria (la sesión no sobrevivirá a una recarga)");
                Rc::new(MemoryStorage::new())
            }
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use browser::{browser_storage, LocalStorage};
