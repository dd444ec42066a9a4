//! Confirmation and progress prompts as explicit publish/subscribe.
//!
//! Views that need the user to confirm something, or that want a progress
//! overlay, publish on a [`DialogBus`]; the dialog components subscribe to it.

use std::fmt;
use std::sync::Arc;

type ConfirmAction = Arc<dyn Fn() + Send + Sync>;
type Handler = Box<dyn Fn(&DialogEvent) + Send + Sync>;

/// A request for the user to confirm an action.
#[derive(Clone)]
pub struct ConfirmRequest {
    pub title: String,
    pub message: String,
    on_confirm: ConfirmAction,
}

impl ConfirmRequest {
    /// Run the action the request was raised for.
    pub fn accept(&self) {
        (self.on_confirm)()
    }
}

impl fmt::Debug for ConfirmRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfirmRequest")
            .field("title", &self.title)
            .field("message", &self.message)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone)]
pub enum DialogEvent {
    Confirm(ConfirmRequest),
    ShowProgress { message: String },
    CloseProgress,
}

/// Delivers every published event to every subscriber, in subscription order.
#[derive(Default)]
pub struct DialogBus {
    handlers: Vec<Handler>,
}

impl DialogBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, handler: impl Fn(&DialogEvent) + Send + Sync + 'static) {
        self.handlers.push(Box::new(handler));
    }

    pub fn subscriber_count(&self) -> usize {
        self.handlers.len()
    }

    pub fn publish(&self, event: DialogEvent) {
        tracing::debug!(?event, subscribers = self.handlers.len(), "dialog event");
        for handler in &self.handlers {
            handler(&event);
        }
    }

    pub fn confirm(
        &self,
        title: impl Into<String>,
        message: impl Into<String>,
        on_confirm: impl Fn() + Send + Sync + 'static,
    ) {
        self.publish(DialogEvent::Confirm(ConfirmRequest {
            title: title.into(),
            message: message.into(),
            on_confirm: Arc::new(on_confirm),
        }));
    }

    pub fn show_progress(&self, message: impl Into<String>) {
        self.publish(DialogEvent::ShowProgress {
            message: message.into(),
        });
    }

    pub fn close_progress(&self) {
        self.publish(DialogEvent::CloseProgress);
    }
}

impl fmt::Debug for DialogBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DialogBus")
            .field("subscribers", &self.handlers.len())
            .finish()
    }
}
