//! DB Repository abstractions

use crate::infrastructure::database::DatabaseConnection;
use crate::infrastructure::entities::{NewSubscription, Reminder, Subscription, SubscriptionUpdate};
use crate::infrastructure::errors::StoreError;
use crate::infrastructure::traits::SubscriptionRepository;
use async_trait::async_trait;
use chrono::NaiveDate;
use di::{Ref, injectable};
use log::error;

#[injectable(SubscriptionRepository)]
pub struct DbSubscriptionRepository {
    connection: Ref<DatabaseConnection>,
}

impl DbSubscriptionRepository {
    pub fn new(connection: Ref<DatabaseConnection>) -> Self {
        Self { connection }
    }
}

fn check_span(
    start_date: NaiveDate,
    end_date: NaiveDate,
    remind_date: NaiveDate,
) -> Result<(), StoreError> {
    if end_date <= start_date {
        return Err(StoreError::Malformed("end date must be after start date"));
    }
    if remind_date > end_date {
        return Err(StoreError::Malformed("reminder date must not be after end date"));
    }
    Ok(())
}

#[async_trait]
impl SubscriptionRepository for DbSubscriptionRepository {
    async fn create(&self, subscription: NewSubscription) -> Result<i64, StoreError> {
        if subscription.chat_id == 0 {
            return Err(StoreError::Malformed("missing destination chat"));
        }
        check_span(
            subscription.start_date,
            subscription.end_date,
            subscription.remind_date,
        )?;

        sqlx::query_scalar(
            "INSERT INTO subscriptions (name, service, start_date, end_date, remind_date, chat_id) VALUES (?, ?, ?, ?, ?, ?) RETURNING id",
        )
        .bind(subscription.name)
        .bind(subscription.service)
        .bind(subscription.start_date)
        .bind(subscription.end_date)
        .bind(subscription.remind_date)
        .bind(subscription.chat_id)
        .fetch_one(&**self.connection)
        .await
        .map_err(|e| {
            error!("{e}");
            e.into()
        })
    }

    async fn get(&self, id: i64) -> Result<Option<Subscription>, StoreError> {
        sqlx::query_as(
            "SELECT id, name, service, start_date, end_date, remind_date, chat_id FROM subscriptions WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&**self.connection)
        .await
        .map_err(|e| {
            error!("{e}");
            e.into()
        })
    }

    async fn list_ordered_by_end(&self) -> Result<Vec<Subscription>, StoreError> {
        sqlx::query_as(
            "SELECT id, name, service, start_date, end_date, remind_date, chat_id FROM subscriptions ORDER BY end_date ASC, id ASC",
        )
        .fetch_all(&**self.connection)
        .await
        .map_err(|e| {
            error!("{e}");
            e.into()
        })
    }

    async fn update(&self, id: i64, update: SubscriptionUpdate) -> Result<(), StoreError> {
        check_span(update.start_date, update.end_date, update.remind_date)?;

        // Single statement, so a reader never observes half-applied fields.
        let result = sqlx::query(
            "UPDATE subscriptions SET name = COALESCE(?, name), service = COALESCE(?, service), start_date = ?, end_date = ?, remind_date = ? WHERE id = ?",
        )
        .bind(update.name)
        .bind(update.service)
        .bind(update.start_date)
        .bind(update.end_date)
        .bind(update.remind_date)
        .bind(id)
        .execute(&**self.connection)
        .await
        .map_err(|e| {
            error!("{e}");
            StoreError::from(e)
        })?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(id));
        }
        Ok(())
    }

    async fn delete(&self, id: i64) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM subscriptions WHERE id = ?")
            .bind(id)
            .execute(&**self.connection)
            .await
            .map_err(|e| {
                error!("{e}");
                StoreError::from(e)
            })?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(id));
        }
        Ok(())
    }

    async fn find_by_remind_date(&self, date: NaiveDate) -> Result<Vec<Reminder>, StoreError> {
        sqlx::query_as(
            "SELECT name, service, chat_id FROM subscriptions WHERE remind_date = ? ORDER BY id ASC",
        )
        .bind(date)
        .fetch_all(&**self.connection)
        .await
        .map_err(|e| {
            error!("{e}");
            e.into()
        })
    }
}
