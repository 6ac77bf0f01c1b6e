//! Database entities

use chrono::NaiveDate;
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Subscription {
    pub id: i64,
    pub name: Option<String>,
    pub service: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub remind_date: NaiveDate,
    pub chat_id: i64,
}

/// A subscription that has not been stored yet. The store assigns the id.
#[derive(Debug, Clone)]
pub struct NewSubscription {
    pub name: Option<String>,
    pub service: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub remind_date: NaiveDate,
    pub chat_id: i64,
}

/// Replacement values for an existing subscription.
///
/// Dates are always overwritten, `name` and `service` only when `Some`.
#[derive(Debug, Clone)]
pub struct SubscriptionUpdate {
    pub name: Option<String>,
    pub service: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub remind_date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Reminder {
    pub name: Option<String>,
    pub service: Option<String>,
    pub chat_id: i64,
}
