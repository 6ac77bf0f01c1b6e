//! Infrastructure traits, used for DI on higher levels

use crate::infrastructure::entities;
use crate::infrastructure::errors::StoreError;
use async_trait::async_trait;
use chrono::NaiveDate;

#[async_trait]
pub trait SubscriptionRepository: Send + Sync {
    /// Stores a new subscription and returns its id.
    ///
    /// Returns `Err(StoreError::Malformed)` if the destination is unset or the dates are not a
    /// valid span (end after start, reminder not after end).
    async fn create(&self, subscription: entities::NewSubscription) -> Result<i64, StoreError>;

    async fn get(&self, id: i64) -> Result<Option<entities::Subscription>, StoreError>;

    /// Lists all subscriptions, soonest expiry first.
    async fn list_ordered_by_end(&self) -> Result<Vec<entities::Subscription>, StoreError>;

    /// Returns `Err(StoreError::NotFound)` if there is no subscription with this id.
    async fn update(
        &self,
        id: i64,
        update: entities::SubscriptionUpdate,
    ) -> Result<(), StoreError>;

    /// Returns `Err(StoreError::NotFound)` if there is no subscription with this id; other
    /// subscriptions are never touched.
    async fn delete(&self, id: i64) -> Result<(), StoreError>;

    async fn find_by_remind_date(
        &self,
        date: NaiveDate,
    ) -> Result<Vec<entities::Reminder>, StoreError>;
}
