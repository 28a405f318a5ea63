//! Quest reminder scheduling.
//!
//! Reminders are persisted next to the quest log so due ones can be
//! surfaced on the next launch. Scheduling is fire-and-forget from the
//! caller's perspective; failures are logged, never fatal.

use crate::store::{files, Quest, Repeat, StoreError};
use chrono::{DateTime, Duration, Utc};
use log::*;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use uuid::Uuid;

const REMINDERS_FILE: &str = "reminders.json";

/// Defines a scheduled reminder for a quest.
///
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Reminder {
    pub quest_id: Uuid,
    pub title: String,
    pub remind_at: DateTime<Utc>,
    pub repeat: Repeat,
}

/// Persists and surfaces quest reminders from the data directory.
///
pub struct Notifier {
    path: PathBuf,
    enabled: bool,
}

impl Notifier {
    pub fn new(data_dir: impl Into<PathBuf>) -> Notifier {
        Notifier {
            path: data_dir.into().join(REMINDERS_FILE),
            enabled: true,
        }
    }

    /// Honor the user-wide notifications switch; a disabled notifier
    /// accepts schedule calls and drops them.
    ///
    pub fn with_enabled(mut self, enabled: bool) -> Notifier {
        self.enabled = enabled;
        self
    }

    async fn load(&self) -> Result<Vec<Reminder>, StoreError> {
        Ok(files::read_json(&self.path).await?.unwrap_or_default())
    }

    async fn store(&self, reminders: &[Reminder]) -> Result<(), StoreError> {
        files::write_json(&self.path, &reminders).await
    }

    /// Schedule (or reschedule) the reminder for a quest.
    ///
    pub async fn schedule(&self, quest: &Quest) -> Result<(), StoreError> {
        if !self.enabled {
            debug!("Notifications disabled; skipping reminder for '{}'.", quest.title);
            return Ok(());
        }
        let mut reminders = self.load().await?;
        reminders.retain(|r| r.quest_id != quest.id);
        let remind_at = next_reminder(quest, Utc::now());
        info!("Scheduling reminder for '{}' at {}.", quest.title, remind_at);
        reminders.push(Reminder {
            quest_id: quest.id,
            title: quest.title.clone(),
            remind_at,
            repeat: quest.repeat,
        });
        self.store(&reminders).await
    }

    /// Collect reminders that have come due. One-time reminders are
    /// retired; repeating ones advance to their next interval boundary.
    ///
    pub async fn due(&self, now: DateTime<Utc>) -> Result<Vec<Reminder>, StoreError> {
        let mut reminders = self.load().await?;
        let mut fired = vec![];
        let mut remaining = vec![];
        for mut reminder in reminders.drain(..) {
            if reminder.remind_at <= now {
                fired.push(reminder.clone());
                if let Repeat::EveryWeeks { interval } = reminder.repeat {
                    let step = Duration::weeks(i64::from(interval.max(1)));
                    while reminder.remind_at <= now {
                        reminder.remind_at = reminder.remind_at + step;
                    }
                    remaining.push(reminder);
                }
            } else {
                remaining.push(reminder);
            }
        }
        if !fired.is_empty() {
            self.store(&remaining).await?;
        }
        Ok(fired)
    }
}

/// When the next reminder for a quest should fire: the due date, or for
/// repeating quests the first interval boundary after `now`.
///
pub fn next_reminder(quest: &Quest, now: DateTime<Utc>) -> DateTime<Utc> {
    match quest.repeat {
        Repeat::OneTime => quest.due_date,
        Repeat::EveryWeeks { interval } => {
            let step = Duration::weeks(i64::from(interval.max(1)));
            let mut at = quest.due_date;
            while at <= now {
                at = at + step;
            }
            at
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fake::{Fake, Faker};

    fn quest_due(repeat: Repeat, due_date: DateTime<Utc>) -> Quest {
        let mut quest: Quest = Faker.fake();
        quest.repeat = repeat;
        quest.due_date = due_date;
        quest
    }

    fn temp_notifier() -> (Notifier, PathBuf) {
        let dir = std::env::temp_dir().join(format!("quest-tui-test-{}", Uuid::new_v4()));
        (Notifier::new(&dir), dir)
    }

    #[test]
    fn one_time_quests_remind_at_the_due_date() {
        let now = Utc::now();
        let due = now + Duration::days(3);
        let quest = quest_due(Repeat::OneTime, due);
        assert_eq!(next_reminder(&quest, now), due);

        // Past due dates are left as-is; they fire immediately.
        let overdue = quest_due(Repeat::OneTime, now - Duration::days(1));
        assert!(next_reminder(&overdue, now) <= now);
    }

    #[test]
    fn weekly_quests_remind_at_the_first_boundary_after_now() {
        let now = Utc::now();
        let due = now - Duration::weeks(3);
        let quest = quest_due(Repeat::EveryWeeks { interval: 2 }, due);
        assert_eq!(next_reminder(&quest, now), due + Duration::weeks(4));

        let future_due = now + Duration::days(1);
        let quest = quest_due(Repeat::EveryWeeks { interval: 2 }, future_due);
        assert_eq!(next_reminder(&quest, now), future_due);
    }

    #[tokio::test]
    async fn due_one_time_reminders_fire_once_and_retire() {
        let (notifier, dir) = temp_notifier();
        let quest = quest_due(Repeat::OneTime, Utc::now() - Duration::hours(1));
        notifier.schedule(&quest).await.unwrap();

        let fired = notifier.due(Utc::now()).await.unwrap();
        assert_eq!(fired.len(), 1);
        assert_eq!(fired[0].quest_id, quest.id);

        let fired = notifier.due(Utc::now()).await.unwrap();
        assert!(fired.is_empty());
        let _ = tokio::fs::remove_dir_all(&dir).await;
    }

    #[tokio::test]
    async fn due_weekly_reminders_fire_and_reschedule() {
        let (notifier, dir) = temp_notifier();
        let quest = quest_due(
            Repeat::EveryWeeks { interval: 1 },
            Utc::now() - Duration::weeks(2),
        );
        notifier.schedule(&quest).await.unwrap();
        // Scheduling already advances past now; pull the stored entry back
        // so the due sweep has something to fire.
        let mut reminders = notifier.load().await.unwrap();
        reminders[0].remind_at = Utc::now() - Duration::hours(1);
        notifier.store(&reminders).await.unwrap();

        let fired = notifier.due(Utc::now()).await.unwrap();
        assert_eq!(fired.len(), 1);

        let remaining = notifier.load().await.unwrap();
        assert_eq!(remaining.len(), 1);
        assert!(remaining[0].remind_at > Utc::now());
        let _ = tokio::fs::remove_dir_all(&dir).await;
    }

    #[tokio::test]
    async fn disabled_notifier_drops_schedule_calls() {
        let (notifier, dir) = temp_notifier();
        let notifier = notifier.with_enabled(false);
        let quest = quest_due(Repeat::OneTime, Utc::now() - Duration::hours(1));
        notifier.schedule(&quest).await.unwrap();

        let fired = notifier.due(Utc::now()).await.unwrap();
        assert!(fired.is_empty());
        let _ = tokio::fs::remove_dir_all(&dir).await;
    }

    #[tokio::test]
    async fn rescheduling_replaces_the_previous_reminder() {
        let (notifier, dir) = temp_notifier();
        let quest = quest_due(Repeat::OneTime, Utc::now() + Duration::days(1));
        notifier.schedule(&quest).await.unwrap();
        notifier.schedule(&quest).await.unwrap();

        let reminders = notifier.load().await.unwrap();
        assert_eq!(reminders.len(), 1);
        let _ = tokio::fs::remove_dir_all(&dir).await;
    }
}
