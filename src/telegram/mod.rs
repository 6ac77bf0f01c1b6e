//! Telegram transport for the subscription engine.

use crate::core::engine::SubscriptionEngine;
use crate::core::traits::Notifier;
use anyhow::Context;
use async_trait::async_trait;
use log::{debug, info};
use std::sync::Arc;
use teloxide::dptree;
use teloxide::prelude::*;
use teloxide::types::Update;

pub mod handlers;

pub struct TelegramNotifier {
    bot: Bot,
}

impl TelegramNotifier {
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    async fn notify(&self, chat_id: i64, text: String) -> anyhow::Result<()> {
        self.bot.send_message(ChatId(chat_id), text).await?;
        Ok(())
    }
}

/// Runs the update dispatcher. Updates of one chat are handled in arrival order.
pub async fn run_bot(bot: Bot, engine: Arc<SubscriptionEngine>) -> anyhow::Result<()> {
    let me = bot
        .get_me()
        .await
        .context("bot failed to connect to Telegram")?;
    info!(
        "Bot connected as @{}",
        me.username.clone().unwrap_or_else(|| "unknown".into())
    );

    let handler = dptree::entry()
        .branch(Update::filter_message().endpoint(handlers::message_handler))
        .branch(Update::filter_callback_query().endpoint(handlers::callback_handler));

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![engine])
        .default_handler(|upd: Arc<Update>| async move {
            debug!("Unhandled update: {:?}", upd.id);
        })
        .build()
        .dispatch()
        .await;

    info!("Bot dispatcher exited");
    Ok(())
}
