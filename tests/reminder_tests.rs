//! Daily reminder scan tests

mod common;

use common::{
    BrokenRepository, FixedClock, RecordingNotifier, date, engine, new_subscription, press,
    repository, say,
};
use std::collections::HashSet;
use std::sync::Arc;
use subscription_reminder_bot::core::engine::ReminderReport;
use subscription_reminder_bot::infrastructure::traits::SubscriptionRepository;

#[tokio::test]
async fn test_one_month_subscription_is_reminded_two_days_before_end() {
    let repo = repository().await;
    let clock = FixedClock::new(date(2024, 1, 10));
    let engine = engine(repo.clone(), clock.clone());

    press(&engine, "add").await;
    say(&engine, "Sara").await;
    say(&engine, "Netflix").await;
    press(&engine, "dur_1").await;

    for quiet_day in [date(2024, 2, 6), date(2024, 2, 8), date(2024, 2, 9)] {
        clock.set(quiet_day);
        let notifier = RecordingNotifier::default();
        let report = engine.send_due_reminders(&notifier).await.unwrap();

        assert_eq!(report, ReminderReport::default(), "{quiet_day}");
        assert!(notifier.sent.lock().unwrap().is_empty());
    }

    clock.set(date(2024, 2, 7));
    let notifier = RecordingNotifier::default();
    let report = engine.send_due_reminders(&notifier).await.unwrap();

    assert_eq!(report, ReminderReport { sent: 1, failed: 0 });
    let sent = notifier.sent.lock().unwrap();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].0, common::CHAT);
    assert_eq!(
        sent[0].1,
        "🔔 Reminder: the subscription of Sara (Netflix) ends in two days"
    );
}

#[tokio::test]
async fn test_failed_notification_does_not_stop_the_batch() {
    let repo = repository().await;
    let clock = FixedClock::new(date(2024, 2, 7));
    let engine = engine(repo.clone(), clock);

    for chat_id in [10, 20, 30] {
        repo.create(new_subscription("due", date(2024, 1, 10), 30, chat_id))
            .await
            .unwrap();
    }

    let notifier = RecordingNotifier {
        unreachable: HashSet::from([20]),
        ..Default::default()
    };
    let report = engine.send_due_reminders(&notifier).await.unwrap();

    assert_eq!(report, ReminderReport { sent: 2, failed: 1 });
    let chats: Vec<i64> = notifier
        .sent
        .lock()
        .unwrap()
        .iter()
        .map(|(chat_id, _)| *chat_id)
        .collect();
    assert_eq!(chats, [10, 30]);
}

#[tokio::test]
async fn test_due_reminders_match_exact_date_only() {
    let repo = repository().await;
    let engine = engine(repo.clone(), FixedClock::new(date(2024, 1, 1)));

    repo.create(new_subscription("early", date(2024, 1, 9), 30, 1))
        .await
        .unwrap();
    repo.create(new_subscription("due", date(2024, 1, 10), 30, 2))
        .await
        .unwrap();
    repo.create(new_subscription("late", date(2024, 1, 11), 30, 3))
        .await
        .unwrap();

    let due = engine.due_reminders(date(2024, 2, 7)).await.unwrap();

    assert_eq!(due.len(), 1);
    assert_eq!(due[0].0, 2);
    assert!(due[0].1.contains("due (due service)"));
}

#[tokio::test]
async fn test_store_failure_aborts_scan_without_panicking() {
    let engine = engine(Arc::new(BrokenRepository), FixedClock::new(date(2024, 2, 7)));
    let notifier = RecordingNotifier::default();

    assert!(engine.send_due_reminders(&notifier).await.is_err());
    assert!(notifier.sent.lock().unwrap().is_empty());
}
