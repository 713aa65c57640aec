use yoda_types::Score;

use crate::{ChatMessage, RoundDisplay};

/// A change to the page model that views must mirror.
#[derive(Debug, Clone, PartialEq)]
pub enum PageEvent {
    ScoreUpdated(Score),
    GameLoading(bool),
    GameError(Option<String>),
    RoundShown(RoundDisplay),
    RoundCleared,
    ChatMessageAppended(ChatMessage),
    ChatInputCleared,
    ChatControlsEnabled(bool),
    ChatInputFocused,
    ChatLoading(bool),
    ChatError(Option<String>),
    RulesVisibility { visible: bool },
}

impl PageEvent {
    pub fn is_game_event(&self) -> bool {
        matches!(
            self,
            PageEvent::GameLoading(_)
                | PageEvent::GameError(_)
                | PageEvent::RoundShown(_)
                | PageEvent::RoundCleared
        )
    }

    pub fn is_chat_event(&self) -> bool {
        matches!(
            self,
            PageEvent::ChatMessageAppended(_)
                | PageEvent::ChatInputCleared
                | PageEvent::ChatControlsEnabled(_)
                | PageEvent::ChatInputFocused
                | PageEvent::ChatLoading(_)
                | PageEvent::ChatError(_)
        )
    }
}

/// Event handler trait for views of the page
pub trait PageEventHandler {
    fn handle_event(&mut self, event: PageEvent);
}

/// Simple event bus for distributing page events
pub struct PageEventBus {
    handlers: Vec<Box<dyn PageEventHandler>>,
}

impl PageEventBus {
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }

    pub fn add_handler(&mut self, handler: Box<dyn PageEventHandler>) {
        self.handlers.push(handler);
    }

    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }

    pub fn publish(&mut self, event: PageEvent) {
        for handler in &mut self.handlers {
            handler.handle_event(event.clone());
        }
    }
}

impl Default for PageEventBus {
    fn default() -> Self {
        Self::new()
    }
}
