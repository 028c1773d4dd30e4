// ============================================================================
// REACTIVITY - Bus de eventos de la aplicación
// ============================================================================
// Sustituye al evento global de window: el ApiClient emite, la App escucha.
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

/// Eventos globales de la aplicación
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AppEvent {
    /// El backend rechazó la credencial (401/422); la sesión ya se limpió
    SessionExpired,
}

type Callback = Rc<dyn Fn(AppEvent)>;

/// Bus de eventos con subscribers; los clones comparten subscribers
#[derive(Clone, Default)]
pub struct EventBus {
    subscribers: Rc<RefCell<Vec<Callback>>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Suscribirse a todos los eventos
    pub fn subscribe<F>(&self, callback: F)
    where
        F: Fn(AppEvent) + 'static,
    {
        self.subscribers.borrow_mut().push(Rc::new(callback));
    }

    /// Notificar a todos los subscribers.
    /// Se itera sobre una copia: un subscriber puede suscribir o emitir a su vez.
    pub fn emit(&self, event: AppEvent) {
        let subscribers: Vec<Callback> = self.subscribers.borrow().clone();
        log::debug!("📣 [EVENTS] {:?} → {} subscribers", event, subscribers.len());
        for callback in subscribers {
            callback(event);
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.borrow().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn emit_reaches_every_subscriber() {
        let bus = EventBus::new();
        let hits = Rc::new(Cell::new(0));
        for _ in 0..2 {
            let hits = hits.clone();
            bus.subscribe(move |event| {
                assert_eq!(event, AppEvent::SessionExpired);
                hits.set(hits.get() + 1);
            });
        }

        bus.clone().emit(AppEvent::SessionExpired);
        assert_eq!(hits.get(), 2);
    }

    #[test]
    fn subscribers_may_subscribe_while_handling() {
        let bus = EventBus::new();
        let inner = bus.clone();
        bus.subscribe(move |_| inner.subscribe(|_| {}));

        bus.emit(AppEvent::SessionExpired);
        assert_eq!(bus.subscriber_count(), 2);
    }
}
