//! Subscription reminder bot
//!
//! (c) Softlandia 2025

use subscription_reminder_bot::api;
use subscription_reminder_bot::config::Settings;
use subscription_reminder_bot::core::engine::SubscriptionEngine;
use subscription_reminder_bot::core::scheduler::reminder_task;
use subscription_reminder_bot::core::traits::{Clock, LocalClock, Notifier};
use subscription_reminder_bot::infrastructure::database::DatabaseConnection;
use subscription_reminder_bot::infrastructure::repositories::DbSubscriptionRepository;
use subscription_reminder_bot::infrastructure::traits::SubscriptionRepository;
use subscription_reminder_bot::telegram::{self, TelegramNotifier};

use anyhow::anyhow;
use di::{Injectable, ServiceCollection, existing_as_self};
use log::info;
use std::sync::Arc;
use teloxide::Bot;
use tokio::runtime::{Builder, Runtime};

fn main() -> anyhow::Result<()> {
    // initialize tracing
    tracing_subscriber::fmt::init();

    let settings = Settings::from_env()?;

    let runtime: Runtime = Builder::new_multi_thread().enable_all().build()?;
    runtime.block_on(run(settings))
}

async fn run(settings: Settings) -> anyhow::Result<()> {
    let connection = DatabaseConnection::connect(&settings.database_url)?;
    let provider = ServiceCollection::new()
        .add(existing_as_self(connection))
        .add(DbSubscriptionRepository::singleton())
        .build_provider()
        .map_err(|e| anyhow!("invalid service registrations: {e}"))?;

    provider
        .get_required::<DatabaseConnection>()
        .migrate()
        .await?;
    let repository = provider.get_required::<dyn SubscriptionRepository>();

    let clock: Arc<dyn Clock> = Arc::new(LocalClock);
    let engine = Arc::new(SubscriptionEngine::new(
        repository,
        clock,
        settings.owner_id,
        settings.language,
        settings.bar_style,
    ));

    let bot = Bot::new(settings.bot_token.clone());
    let notifier: Arc<dyn Notifier> = Arc::new(TelegramNotifier::new(bot.clone()));

    // background task for the daily reminder scan
    let reminder_handle = tokio::spawn(reminder_task(
        engine.clone(),
        notifier,
        settings.reminder_time,
    ));
    let web_task_handle = tokio::spawn(api::web_server_task(settings.port));

    tokio::select! {
        result = telegram::run_bot(bot, engine) => result?,
        result = web_task_handle => result??,
        result = reminder_handle => result?,
    }

    info!("Shutting down...");
    Ok(())
}
