//! Per-chat conversation state.
//!
//! Flows live only in memory; a restart drops whatever was in progress.

use std::collections::HashMap;
use std::sync::Mutex;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Step {
    #[default]
    Idle,
    AwaitingName,
    AwaitingService,
    AwaitingDuration,
    AwaitingEditName,
    AwaitingEditService,
    AwaitingEditDuration,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Conversation {
    pub step: Step,
    pub name: Option<String>,
    pub service: Option<String>,
    pub edit_target: Option<i64>,
}

impl Conversation {
    pub fn at(step: Step) -> Conversation {
        Conversation {
            step,
            ..Default::default()
        }
    }

    pub fn editing(id: i64) -> Conversation {
        Conversation {
            step: Step::AwaitingEditName,
            edit_target: Some(id),
            ..Default::default()
        }
    }
}

/// Conversation state keyed by chat id. A missing entry means the chat is idle.
#[derive(Debug, Default)]
pub struct ConversationStore {
    chats: Mutex<HashMap<i64, Conversation>>,
}

impl ConversationStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, chat_id: i64) -> Option<Conversation> {
        self.lock().get(&chat_id).cloned()
    }

    /// Returns the state of the chat, `Idle` if nothing is in progress.
    pub fn current(&self, chat_id: i64) -> Conversation {
        self.get(chat_id).unwrap_or_default()
    }

    pub fn replace(&self, chat_id: i64, conversation: Conversation) {
        self.lock().insert(chat_id, conversation);
    }

    pub fn clear(&self, chat_id: i64) {
        self.lock().remove(&chat_id);
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<i64, Conversation>> {
        // Entries are replaced whole, so a poisoned map is still consistent.
        self.chats
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
