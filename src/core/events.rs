//! Transport independent chat events and replies.

use crate::core::errors::EngineError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatEvent {
    Start,
    Button(String),
    Text(String),
}

/// One event from a chat, together with who sent it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inbound {
    pub chat_id: i64,
    pub sender_id: i64,
    pub event: ChatEvent,
}

impl Inbound {
    pub fn new(chat_id: i64, sender_id: i64, event: ChatEvent) -> Self {
        Self {
            chat_id,
            sender_id,
            event,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    pub label: String,
    pub tag: String,
}

impl Choice {
    pub fn new(label: impl Into<String>, tag: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            tag: tag.into(),
        }
    }
}

/// A message to send back, optionally with buttons. Each inner vector is one row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub text: String,
    pub choices: Vec<Vec<Choice>>,
}

impl Reply {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            choices: Vec::new(),
        }
    }

    pub fn with_choices(text: impl Into<String>, choices: Vec<Vec<Choice>>) -> Self {
        Self {
            text: text.into(),
            choices,
        }
    }
}

/// A decoded button tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Add,
    View,
    Duration(u32),
    EditDuration(u32),
    Edit(i64),
    Delete(i64),
}

impl Action {
    pub const ADD: &'static str = "add";
    pub const VIEW: &'static str = "view";

    pub fn parse(tag: &str) -> Result<Action, EngineError> {
        let action = match tag {
            Self::ADD => Action::Add,
            Self::VIEW => Action::View,
            // `editdur_` has to be checked before `edit_`.
            _ if tag.starts_with("editdur_") => {
                Action::EditDuration(months(&tag["editdur_".len()..])?)
            }
            _ if tag.starts_with("dur_") => Action::Duration(months(&tag["dur_".len()..])?),
            _ if tag.starts_with("edit_") => Action::Edit(id(&tag["edit_".len()..])?),
            _ if tag.starts_with("del_") => Action::Delete(id(&tag["del_".len()..])?),
            _ => return Err(EngineError::Validation("unknown button")),
        };
        Ok(action)
    }

    pub fn tag(&self) -> String {
        match self {
            Action::Add => Self::ADD.to_owned(),
            Action::View => Self::VIEW.to_owned(),
            Action::Duration(months) => format!("dur_{months}"),
            Action::EditDuration(months) => format!("editdur_{months}"),
            Action::Edit(id) => format!("edit_{id}"),
            Action::Delete(id) => format!("del_{id}"),
        }
    }
}

const MALFORMED: EngineError = EngineError::Validation("malformed button payload");

/// Payloads are plain ASCII digits; `str::parse` alone would also take a leading `+`.
fn digits(raw: &str) -> Result<&str, EngineError> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(MALFORMED);
    }
    Ok(raw)
}

fn months(raw: &str) -> Result<u32, EngineError> {
    digits(raw)?.parse().map_err(|_| MALFORMED)
}

fn id(raw: &str) -> Result<i64, EngineError> {
    let magnitude = raw.strip_prefix('-').unwrap_or(raw);
    digits(magnitude)?;
    raw.parse().map_err(|_| MALFORMED)
}
