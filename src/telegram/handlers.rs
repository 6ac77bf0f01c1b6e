//! Update handlers: translate Telegram updates into engine events and render the replies.

use crate::core::engine::SubscriptionEngine;
use crate::core::events::{ChatEvent, Choice, Inbound, Reply};
use log::warn;
use std::sync::Arc;
use teloxide::prelude::*;
use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup};

pub async fn message_handler(
    bot: Bot,
    msg: Message,
    engine: Arc<SubscriptionEngine>,
) -> ResponseResult<()> {
    let (Some(user), Some(text)) = (msg.from.as_ref(), msg.text()) else {
        return Ok(());
    };

    let event = if is_start_command(text) {
        ChatEvent::Start
    } else {
        ChatEvent::Text(text.to_owned())
    };

    let replies = engine
        .handle(Inbound::new(msg.chat.id.0, user.id.0 as i64, event))
        .await;
    send_replies(&bot, msg.chat.id, replies).await
}

pub async fn callback_handler(
    bot: Bot,
    q: CallbackQuery,
    engine: Arc<SubscriptionEngine>,
) -> ResponseResult<()> {
    if let Err(e) = bot.answer_callback_query(q.id.clone()).await {
        warn!("Failed to answer callback query: {e}");
    }

    let (Some(data), Some(message)) = (q.data.as_ref(), q.message.as_ref()) else {
        return Ok(());
    };
    let chat_id = message.chat().id;

    let replies = engine
        .handle(Inbound::new(
            chat_id.0,
            q.from.id.0 as i64,
            ChatEvent::Button(data.clone()),
        ))
        .await;
    send_replies(&bot, chat_id, replies).await
}

async fn send_replies(bot: &Bot, chat_id: ChatId, replies: Vec<Reply>) -> ResponseResult<()> {
    for reply in replies {
        let request = bot.send_message(chat_id, reply.text);
        if reply.choices.is_empty() {
            request.await?;
        } else {
            request.reply_markup(keyboard(&reply.choices)).await?;
        }
    }
    Ok(())
}

/// `/start`, also in the `/start@botname` form used in groups.
pub fn is_start_command(text: &str) -> bool {
    let command = text.split_whitespace().next().unwrap_or_default();
    command == "/start" || command.starts_with("/start@")
}

pub fn keyboard(choices: &[Vec<Choice>]) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(choices.iter().map(|row| {
        row.iter()
            .map(|choice| InlineKeyboardButton::callback(choice.label.clone(), choice.tag.clone()))
            .collect::<Vec<_>>()
    }))
}
