//! Daily reminder trigger.

use crate::core::engine::SubscriptionEngine;
use crate::core::traits::Notifier;
use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};
use log::{debug, error};
use std::sync::Arc;
use std::time::Duration;

/// Time left until the next `at`, today if it is still ahead, otherwise tomorrow.
pub fn until_next_run(now: NaiveDateTime, at: NaiveTime) -> Duration {
    let today = now.date().and_time(at);
    let next = if today > now {
        today
    } else {
        today + TimeDelta::days(1)
    };

    (next - now).to_std().unwrap_or(Duration::ZERO)
}

/// Whether a wake-up at `now` should run the scan.
///
/// A day is scanned at most once, and never before `at`. The sleep is measured in
/// elapsed time, so around a DST change the task can wake an hour before `at`.
pub fn should_scan(last_run: Option<NaiveDate>, now: NaiveDateTime, at: NaiveTime) -> bool {
    last_run != Some(now.date()) && now.time() >= at
}

pub async fn reminder_task(
    engine: Arc<SubscriptionEngine>,
    notifier: Arc<dyn Notifier>,
    at: NaiveTime,
) {
    let mut last_run: Option<NaiveDate> = None;

    loop {
        let wait = until_next_run(Local::now().naive_local(), at);
        debug!("Next reminder scan in {} seconds", wait.as_secs());
        tokio::time::sleep(wait).await;

        let now = Local::now().naive_local();
        if !should_scan(last_run, now, at) {
            debug!("Skipping reminder scan at {now}");
            continue;
        }
        let today = now.date();
        last_run = Some(today);

        if let Err(e) = engine.send_due_reminders(notifier.as_ref()).await {
            error!("Reminder scan for {today} failed: {e}");
        }
    }
}
