//! Shared fixtures for the integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{NaiveDate, TimeDelta};
use di::Ref;
use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;
use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use subscription_reminder_bot::core::engine::SubscriptionEngine;
use subscription_reminder_bot::core::events::{ChatEvent, Inbound, Reply};
use subscription_reminder_bot::core::messages::Language;
use subscription_reminder_bot::core::progress::BarStyle;
use subscription_reminder_bot::core::traits::{Clock, Notifier};
use subscription_reminder_bot::infrastructure::database::DatabaseConnection;
use subscription_reminder_bot::infrastructure::entities::{
    NewSubscription, Reminder, Subscription, SubscriptionUpdate,
};
use subscription_reminder_bot::infrastructure::errors::StoreError;
use subscription_reminder_bot::infrastructure::repositories::DbSubscriptionRepository;
use subscription_reminder_bot::infrastructure::traits::SubscriptionRepository;

pub const OWNER: i64 = 1001;
pub const STRANGER: i64 = 2002;
pub const CHAT: i64 = 5005;

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// In-memory database with migrations applied.
///
/// A single connection, so every query sees the same in-memory database.
pub async fn setup_test_db() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    sqlx::migrate!().run(&pool).await.unwrap();
    pool
}

pub async fn repository() -> Arc<DbSubscriptionRepository> {
    let connection = DatabaseConnection::from_pool(setup_test_db().await);
    Arc::new(DbSubscriptionRepository::new(Ref::new(connection)))
}

pub fn new_subscription(name: &str, start: NaiveDate, days: i64, chat_id: i64) -> NewSubscription {
    let end = start + TimeDelta::days(days);
    NewSubscription {
        name: Some(name.to_owned()),
        service: Some(format!("{name} service")),
        start_date: start,
        end_date: end,
        remind_date: end - TimeDelta::days(2),
        chat_id,
    }
}

pub struct FixedClock {
    today: Mutex<NaiveDate>,
}

impl FixedClock {
    pub fn new(today: NaiveDate) -> Arc<FixedClock> {
        Arc::new(FixedClock {
            today: Mutex::new(today),
        })
    }

    pub fn set(&self, today: NaiveDate) {
        *self.today.lock().unwrap() = today;
    }
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        *self.today.lock().unwrap()
    }
}

/// Records sent messages; chats listed in `unreachable` fail.
#[derive(Default)]
pub struct RecordingNotifier {
    pub sent: Mutex<Vec<(i64, String)>>,
    pub unreachable: HashSet<i64>,
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn notify(&self, chat_id: i64, text: String) -> anyhow::Result<()> {
        if self.unreachable.contains(&chat_id) {
            anyhow::bail!("chat {chat_id} blocked the bot");
        }
        self.sent.lock().unwrap().push((chat_id, text));
        Ok(())
    }
}

/// A store whose every operation fails.
pub struct BrokenRepository;

#[async_trait]
impl SubscriptionRepository for BrokenRepository {
    async fn create(&self, _: NewSubscription) -> Result<i64, StoreError> {
        Err(sqlx::Error::PoolClosed.into())
    }

    async fn get(&self, _: i64) -> Result<Option<Subscription>, StoreError> {
        Err(sqlx::Error::PoolClosed.into())
    }

    async fn list_ordered_by_end(&self) -> Result<Vec<Subscription>, StoreError> {
        Err(sqlx::Error::PoolClosed.into())
    }

    async fn update(&self, _: i64, _: SubscriptionUpdate) -> Result<(), StoreError> {
        Err(sqlx::Error::PoolClosed.into())
    }

    async fn delete(&self, _: i64) -> Result<(), StoreError> {
        Err(sqlx::Error::PoolClosed.into())
    }

    async fn find_by_remind_date(&self, _: NaiveDate) -> Result<Vec<Reminder>, StoreError> {
        Err(sqlx::Error::PoolClosed.into())
    }
}

pub fn engine(repo: Ref<dyn SubscriptionRepository>, clock: Arc<FixedClock>) -> SubscriptionEngine {
    SubscriptionEngine::new(repo, clock, OWNER, Language::English, BarStyle::Plain)
}

pub async fn press(engine: &SubscriptionEngine, tag: &str) -> Vec<Reply> {
    engine
        .handle(Inbound::new(CHAT, OWNER, ChatEvent::Button(tag.to_owned())))
        .await
}

pub async fn say(engine: &SubscriptionEngine, text: &str) -> Vec<Reply> {
    engine
        .handle(Inbound::new(CHAT, OWNER, ChatEvent::Text(text.to_owned())))
        .await
}

pub fn tags(reply: &Reply) -> Vec<&str> {
    reply
        .choices
        .iter()
        .flatten()
        .map(|choice| choice.tag.as_str())
        .collect()
}
