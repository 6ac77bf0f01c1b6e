//! DI "Interfaces"

use async_trait::async_trait;
use chrono::{Local, NaiveDate};

/// Source of the current calendar date.
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

/// Uses the local date of the host.
pub struct LocalClock;

impl Clock for LocalClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Outbound side of the chat transport, used for messages nobody asked for.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Sends a plain text message to a chat.
    async fn notify(&self, chat_id: i64, text: String) -> anyhow::Result<()>;
}
