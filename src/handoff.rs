//! Reader-thread to owner-thread event handoff.
//!
//! The serial reader runs on its own thread and owns an [`EventSender`];
//! the thread owning the plotter periodically drains the [`EventQueue`]
//! into its listeners. Nothing in the store or viewport is locked, so this
//! channel is the only way data should cross threads.

use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};

use crate::error::HandoffError;
use crate::listener::{ConnectionState, SerialListener};

/// One event produced by a serial reader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SerialEvent {
    /// Raw received text.
    Data(String),
    /// Connection state change.
    Status(ConnectionState),
    /// Reader error message.
    Error(String),
}

impl SerialEvent {
    /// Deliver the event to a listener.
    pub fn dispatch(&self, listener: &mut impl SerialListener) {
        match self {
            Self::Data(chunk) => listener.on_data(chunk),
            Self::Status(state) => listener.on_status(*state),
            Self::Error(message) => listener.on_error(message),
        }
    }
}

/// Create a connected sender/queue pair.
pub fn channel() -> (EventSender, EventQueue) {
    let (sender, receiver) = mpsc::channel();
    (EventSender { sender }, EventQueue { receiver })
}

/// Sending half, cloneable across reader threads.
#[derive(Debug, Clone)]
pub struct EventSender {
    sender: Sender<SerialEvent>,
}

impl EventSender {
    /// Queue an event.
    pub fn send(&self, event: SerialEvent) -> Result<(), HandoffError> {
        self.sender
            .send(event)
            .map_err(|_| HandoffError::Disconnected)
    }

    /// Queue a raw text chunk.
    pub fn send_data(&self, chunk: impl Into<String>) -> Result<(), HandoffError> {
        self.send(SerialEvent::Data(chunk.into()))
    }

    /// Queue a connection state change.
    pub fn send_status(&self, state: ConnectionState) -> Result<(), HandoffError> {
        self.send(SerialEvent::Status(state))
    }

    /// Queue an error message.
    pub fn send_error(&self, message: impl Into<String>) -> Result<(), HandoffError> {
        self.send(SerialEvent::Error(message.into()))
    }
}

/// Receiving half, owned by the plotter's thread.
#[derive(Debug)]
pub struct EventQueue {
    receiver: Receiver<SerialEvent>,
}

impl EventQueue {
    /// Take the next queued event without blocking.
    ///
    /// Returns `Ok(None)` when the queue is empty and an error once every
    /// sender is gone and the queue has been emptied.
    pub fn try_next(&self) -> Result<Option<SerialEvent>, HandoffError> {
        match self.receiver.try_recv() {
            Ok(event) => Ok(Some(event)),
            Err(TryRecvError::Empty) => Ok(None),
            Err(TryRecvError::Disconnected) => Err(HandoffError::Disconnected),
        }
    }

    /// Deliver every queued event to `listener` and return how many were delivered.
    pub fn drain(&self, listener: &mut impl SerialListener) -> usize {
        let mut delivered = 0;
        while let Ok(Some(event)) = self.try_next() {
            event.dispatch(listener);
            delivered += 1;
        }
        delivered
    }
}
