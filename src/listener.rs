//! Serial event fan-out.
//!
//! A reader publishes raw chunks, connection state changes, and errors;
//! subscribers are notified synchronously, in subscription order, on the
//! thread that owns the [`Listeners`] list.

use std::cell::RefCell;
use std::rc::Rc;

/// Connection state reported by a serial reader.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    /// No port is open.
    Disconnected,
    /// A port is being opened.
    Connecting,
    /// The port is open and streaming.
    Connected,
    /// The port failed.
    Error,
}

/// Receiver of serial reader events.
pub trait SerialListener {
    /// A raw chunk of received text, not necessarily line-aligned.
    fn on_data(&mut self, chunk: &str);

    /// The connection state changed.
    fn on_status(&mut self, state: ConnectionState);

    /// The reader reported an error.
    fn on_error(&mut self, message: &str);
}

impl<L: SerialListener + ?Sized> SerialListener for Rc<RefCell<L>> {
    fn on_data(&mut self, chunk: &str) {
        self.borrow_mut().on_data(chunk);
    }

    fn on_status(&mut self, state: ConnectionState) {
        self.borrow_mut().on_status(state);
    }

    fn on_error(&mut self, message: &str) {
        self.borrow_mut().on_error(message);
    }
}

/// Handle returned by [`Listeners::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Ordered list of subscribers.
#[derive(Default)]
pub struct Listeners {
    subscribers: Vec<(ListenerId, Box<dyn SerialListener>)>,
    next_id: u64,
}

impl Listeners {
    /// Create an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a subscriber at the end of the list.
    pub fn subscribe(&mut self, listener: impl SerialListener + 'static) -> ListenerId {
        self.next_id = self.next_id.wrapping_add(1);
        let id = ListenerId(self.next_id);
        self.subscribers.push((id, Box::new(listener)));
        id
    }

    /// Remove a subscriber. Returns false if it was not subscribed.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(existing, _)| *existing != id);
        self.subscribers.len() != before
    }

    /// Number of subscribers.
    pub fn len(&self) -> usize {
        self.subscribers.len()
    }

    /// Check whether there are no subscribers.
    pub fn is_empty(&self) -> bool {
        self.subscribers.is_empty()
    }
}

impl SerialListener for Listeners {
    fn on_data(&mut self, chunk: &str) {
        for (_, listener) in &mut self.subscribers {
            listener.on_data(chunk);
        }
    }

    fn on_status(&mut self, state: ConnectionState) {
        for (_, listener) in &mut self.subscribers {
            listener.on_status(state);
        }
    }

    fn on_error(&mut self, message: &str) {
        for (_, listener) in &mut self.subscribers {
            listener.on_error(message);
        }
    }
}

impl std::fmt::Debug for Listeners {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Listeners")
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    #[derive(Debug, Default)]
    pub(crate) struct Recorder {
        pub(crate) events: Vec<String>,
    }

    impl SerialListener for Recorder {
        fn on_data(&mut self, chunk: &str) {
            self.events.push(format!("data:{chunk}"));
        }

        fn on_status(&mut self, state: ConnectionState) {
            self.events.push(format!("status:{state:?}"));
        }

        fn on_error(&mut self, message: &str) {
            self.events.push(format!("error:{message}"));
        }
    }

    #[test]
    fn notifies_in_subscription_order() {
        let log = Rc::new(RefCell::new(Recorder::default()));
        let mut listeners = Listeners::new();
        listeners.subscribe(Rc::clone(&log));
        listeners.subscribe(Rc::clone(&log));

        listeners.on_data("a:1\n");
        listeners.on_status(ConnectionState::Connected);
        listeners.on_error("boom");

        assert_eq!(
            log.borrow().events,
            vec![
                "data:a:1\n",
                "data:a:1\n",
                "status:Connected",
                "status:Connected",
                "error:boom",
                "error:boom",
            ]
        );
    }

    #[test]
    fn unsubscribe_stops_delivery() {
        let log = Rc::new(RefCell::new(Recorder::default()));
        let mut listeners = Listeners::new();
        let id = listeners.subscribe(Rc::clone(&log));
        assert_eq!(listeners.len(), 1);
        assert!(listeners.unsubscribe(id));
        assert!(!listeners.unsubscribe(id));
        assert!(listeners.is_empty());

        listeners.on_data("ignored");
        assert!(log.borrow().events.is_empty());
    }
}
