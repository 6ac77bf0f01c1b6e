//! Subscription lifecycle: the add/edit conversation flows, listing, deletion and the daily
//! reminder scan.
//!
//! Every inbound event is handled to completion by [`SubscriptionEngine::handle`], which turns
//! any error into a reply for that chat. Nothing escapes a single event.

use crate::core::conversation::{Conversation, ConversationStore, Step};
use crate::core::errors::EngineError;
use crate::core::events::{Action, ChatEvent, Choice, Inbound, Reply};
use crate::core::messages::{Language, Messages};
use crate::core::plan::{PlanLength, Term};
use crate::core::progress::{BarStyle, Progress};
use crate::core::traits::{Clock, Notifier};
use crate::infrastructure::entities::{NewSubscription, Subscription, SubscriptionUpdate};
use crate::infrastructure::errors::StoreError;
use crate::infrastructure::traits::SubscriptionRepository;
use chrono::NaiveDate;
use di::Ref;
use log::{error, info, warn};
use std::sync::Arc;

/// Texts accepted instead of a new value while editing.
const SKIP_WORDS: [&str; 2] = ["-", "/skip"];

/// Outcome of one reminder scan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReminderReport {
    pub sent: usize,
    pub failed: usize,
}

pub struct SubscriptionEngine {
    repo: Ref<dyn SubscriptionRepository>,
    clock: Arc<dyn Clock>,
    owner_id: i64,
    messages: &'static Messages,
    bar_style: BarStyle,
    conversations: ConversationStore,
}

impl SubscriptionEngine {
    pub fn new(
        repo: Ref<dyn SubscriptionRepository>,
        clock: Arc<dyn Clock>,
        owner_id: i64,
        language: Language,
        bar_style: BarStyle,
    ) -> Self {
        Self {
            repo,
            clock,
            owner_id,
            messages: language.messages(),
            bar_style,
            conversations: ConversationStore::new(),
        }
    }

    /// The flow in progress for a chat, `None` when the chat is idle.
    pub fn conversation(&self, chat_id: i64) -> Option<Conversation> {
        self.conversations.get(chat_id)
    }

    /// Handles one inbound event and returns the replies for its chat.
    pub async fn handle(&self, inbound: Inbound) -> Vec<Reply> {
        match self.dispatch(&inbound).await {
            Ok(replies) => replies,
            Err(e) => {
                match &e {
                    EngineError::Unauthorized(_) => {
                        warn!("Rejected {:?} in chat {}: {e}", inbound.event, inbound.chat_id)
                    }
                    EngineError::Store(_) => error!("Chat {}: {e}", inbound.chat_id),
                    _ => info!("Chat {}: {e}", inbound.chat_id),
                }
                vec![Reply::text(self.error_text(&e))]
            }
        }
    }

    async fn dispatch(&self, inbound: &Inbound) -> Result<Vec<Reply>, EngineError> {
        if inbound.sender_id != self.owner_id {
            return Err(EngineError::Unauthorized(inbound.sender_id));
        }

        let chat_id = inbound.chat_id;
        match &inbound.event {
            ChatEvent::Start => Ok(vec![self.start(chat_id)]),
            ChatEvent::Text(text) => Ok(vec![self.text(chat_id, text)?]),
            ChatEvent::Button(tag) => match Action::parse(tag)? {
                Action::Add => Ok(vec![self.begin_add(chat_id)]),
                Action::View => self.view().await,
                Action::Duration(months) => Ok(vec![self.finish_add(chat_id, months).await?]),
                Action::Edit(id) => Ok(vec![self.begin_edit(chat_id, id).await?]),
                Action::EditDuration(months) => {
                    Ok(vec![self.finish_edit(chat_id, months).await?])
                }
                Action::Delete(id) => Ok(vec![self.delete(id).await?]),
            },
        }
    }

    fn start(&self, chat_id: i64) -> Reply {
        self.conversations.clear(chat_id);

        Reply::with_choices(
            self.messages.title,
            vec![
                vec![Choice::new(self.messages.add_button, Action::Add.tag())],
                vec![Choice::new(self.messages.view_button, Action::View.tag())],
            ],
        )
    }

    fn begin_add(&self, chat_id: i64) -> Reply {
        self.conversations
            .replace(chat_id, Conversation::at(Step::AwaitingName));
        Reply::text(self.messages.ask_name)
    }

    fn text(&self, chat_id: i64, text: &str) -> Result<Reply, EngineError> {
        let mut conversation = self.conversations.current(chat_id);
        let text = text.trim();

        let reply = match conversation.step {
            Step::Idle => return Ok(Reply::text(self.messages.use_menu)),
            Step::AwaitingDuration | Step::AwaitingEditDuration => {
                return Ok(Reply::text(self.messages.pick_duration));
            }
            _ if text.is_empty() => return Err(EngineError::Validation("empty text")),
            Step::AwaitingName => {
                conversation.name = Some(text.to_owned());
                conversation.step = Step::AwaitingService;
                Reply::text(self.messages.ask_service)
            }
            Step::AwaitingService => {
                conversation.service = Some(text.to_owned());
                conversation.step = Step::AwaitingDuration;
                self.duration_choice(self.messages.ask_duration, Action::Duration)
            }
            Step::AwaitingEditName => {
                conversation.name = replacement(text);
                conversation.step = Step::AwaitingEditService;
                Reply::text(self.messages.ask_new_service)
            }
            Step::AwaitingEditService => {
                conversation.service = replacement(text);
                conversation.step = Step::AwaitingEditDuration;
                self.duration_choice(self.messages.ask_new_duration, Action::EditDuration)
            }
        };

        self.conversations.replace(chat_id, conversation);
        Ok(reply)
    }

    fn duration_choice(&self, prompt: &str, action: fn(u32) -> Action) -> Reply {
        let rows = PlanLength::ALL
            .iter()
            .map(|length| {
                vec![Choice::new(
                    self.messages.duration_label(*length),
                    action(length.months()).tag(),
                )]
            })
            .collect();

        Reply::with_choices(prompt, rows)
    }

    fn term(&self, months: u32) -> Result<Term, EngineError> {
        let length =
            PlanLength::from_months(months).ok_or(EngineError::Validation("unsupported duration"))?;
        Term::starting(self.clock.today(), length)
            .ok_or(EngineError::Validation("date out of range"))
    }

    async fn finish_add(&self, chat_id: i64, months: u32) -> Result<Reply, EngineError> {
        let conversation = self.conversations.current(chat_id);
        let (Step::AwaitingDuration, Some(name), Some(service)) =
            (conversation.step, conversation.name, conversation.service)
        else {
            return Err(EngineError::NothingPending);
        };
        let term = self.term(months)?;

        let id = self
            .repo
            .create(NewSubscription {
                name: Some(name),
                service: Some(service),
                start_date: term.start,
                end_date: term.end,
                remind_date: term.remind,
                chat_id,
            })
            .await?;

        self.conversations.clear(chat_id);
        info!("Added subscription #{id}, ends {}", term.end);

        Ok(Reply::text(format!(
            "{}\n{}: {}",
            self.messages.added, self.messages.ends, term.end
        )))
    }

    async fn view(&self) -> Result<Vec<Reply>, EngineError> {
        let subscriptions = self.repo.list_ordered_by_end().await?;
        if subscriptions.is_empty() {
            return Ok(vec![Reply::text(self.messages.empty_list)]);
        }

        let today = self.clock.today();
        Ok(subscriptions
            .iter()
            .map(|subscription| {
                Reply::with_choices(
                    self.render(subscription, today),
                    vec![vec![
                        Choice::new(self.messages.edit_button, Action::Edit(subscription.id).tag()),
                        Choice::new(
                            self.messages.delete_button,
                            Action::Delete(subscription.id).tag(),
                        ),
                    ]],
                )
            })
            .collect())
    }

    fn render(&self, subscription: &Subscription, today: NaiveDate) -> String {
        let progress = Progress::compute(subscription.start_date, subscription.end_date, today);

        format!(
            "#{} | {} – {}\n{}: {}\n{} {}%",
            subscription.id,
            subscription.name.as_deref().unwrap_or(self.messages.no_name),
            subscription.service.as_deref().unwrap_or(self.messages.no_name),
            self.messages.ends,
            subscription.end_date,
            progress.bar(self.bar_style),
            progress.percent,
        )
    }

    async fn begin_edit(&self, chat_id: i64, id: i64) -> Result<Reply, EngineError> {
        if self.repo.get(id).await?.is_none() {
            return Err(EngineError::NotFound(id));
        }

        self.conversations.replace(chat_id, Conversation::editing(id));
        Ok(Reply::text(self.messages.ask_new_name))
    }

    async fn finish_edit(&self, chat_id: i64, months: u32) -> Result<Reply, EngineError> {
        let conversation = self.conversations.current(chat_id);
        let (Step::AwaitingEditDuration, Some(id)) = (conversation.step, conversation.edit_target)
        else {
            return Err(EngineError::NothingPending);
        };
        let term = self.term(months)?;

        let update = SubscriptionUpdate {
            name: conversation.name,
            service: conversation.service,
            start_date: term.start,
            end_date: term.end,
            remind_date: term.remind,
        };
        match self.repo.update(id, update).await {
            Ok(()) => {}
            Err(StoreError::NotFound(id)) => {
                // Deleted while being edited, the flow cannot be completed.
                self.conversations.clear(chat_id);
                return Err(EngineError::NotFound(id));
            }
            Err(e) => return Err(e.into()),
        }

        self.conversations.clear(chat_id);
        info!("Updated subscription #{id}, ends {}", term.end);

        Ok(Reply::text(format!(
            "{}\n{}: {}",
            self.messages.updated, self.messages.ends, term.end
        )))
    }

    async fn delete(&self, id: i64) -> Result<Reply, EngineError> {
        self.repo.delete(id).await?;
        info!("Deleted subscription #{id}");

        Ok(Reply::text(format!("{} #{id}", self.messages.deleted)))
    }

    fn error_text(&self, error: &EngineError) -> &'static str {
        match error {
            EngineError::Unauthorized(_) => self.messages.denied,
            EngineError::Validation(_) => self.messages.invalid_choice,
            EngineError::NothingPending => self.messages.nothing_pending,
            EngineError::NotFound(_) => self.messages.not_found,
            EngineError::Store(_) => self.messages.failure,
        }
    }

    /// Reminder texts for every subscription whose reminder falls on `date`.
    pub async fn due_reminders(&self, date: NaiveDate) -> Result<Vec<(i64, String)>, StoreError> {
        let reminders = self.repo.find_by_remind_date(date).await?;

        Ok(reminders
            .into_iter()
            .map(|reminder| {
                let text = self.messages.reminder(
                    reminder.name.as_deref().unwrap_or(self.messages.no_name),
                    reminder.service.as_deref().unwrap_or(self.messages.no_name),
                );
                (reminder.chat_id, text)
            })
            .collect())
    }

    /// Sends today's reminders. A failed message does not stop the rest of the batch.
    pub async fn send_due_reminders(
        &self,
        notifier: &dyn Notifier,
    ) -> Result<ReminderReport, StoreError> {
        let today = self.clock.today();
        let mut report = ReminderReport::default();

        for (chat_id, text) in self.due_reminders(today).await? {
            match notifier.notify(chat_id, text).await {
                Ok(()) => report.sent += 1,
                Err(e) => {
                    error!("Failed to send reminder to chat {chat_id}: {e:#}");
                    report.failed += 1;
                }
            }
        }

        info!(
            "Reminder scan for {today}: {} sent, {} failed",
            report.sent, report.failed
        );
        Ok(report)
    }
}

fn replacement(text: &str) -> Option<String> {
    if SKIP_WORDS
        .iter()
        .any(|skip| text.eq_ignore_ascii_case(skip))
    {
        None
    } else {
        Some(text.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skip_words_keep_the_current_value() {
        assert_eq!(replacement("-"), None);
        assert_eq!(replacement("/SKIP"), None);
        assert_eq!(replacement("Ali"), Some("Ali".to_owned()));
        assert_eq!(replacement("--"), Some("--".to_owned()));
    }
}
