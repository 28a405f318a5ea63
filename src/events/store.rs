use crate::notify::Notifier;
use crate::state::State;
use crate::store::{ProfileStore, Quest, QuestStore};
use anyhow::Result;
use chrono::Utc;
use log::*;
use std::sync::Arc;
use tokio::sync::Mutex;
use uuid::Uuid;

/// Specify different store event types.
///
#[derive(Debug, Clone)]
pub enum Event {
    FetchQuests,
    SaveQuest {
        quest: Quest,
        tasks: Vec<String>,
        notify: bool,
    },
    UpdateQuest {
        quest: Quest,
    },
    UpdateCompletion {
        id: Uuid,
        completed: bool,
    },
    UpdateProgress {
        quest: Quest,
    },
    ToggleTask {
        quest_id: Uuid,
        task_id: Uuid,
        current: bool,
    },
    CheckReminders,
}

/// Specify struct for managing state with store events.
///
/// Every persistence failure is converted into the state error queue
/// here; nothing is thrown past this boundary.
pub struct Handler<'a, S> {
    state: &'a Arc<Mutex<State>>,
    store: &'a S,
    notifier: &'a Notifier,
}

impl<'a, S: QuestStore + ProfileStore> Handler<'a, S> {
    /// Return new instance with reference to state.
    ///
    pub fn new(state: &'a Arc<Mutex<State>>, store: &'a S, notifier: &'a Notifier) -> Self {
        Handler {
            state,
            store,
            notifier,
        }
    }

    /// Handle store events by type.
    ///
    pub async fn handle(&mut self, event: Event) -> Result<()> {
        debug!("Processing store event '{:?}'...", event);
        match event {
            Event::FetchQuests => self.fetch_quests().await?,
            Event::SaveQuest {
                quest,
                tasks,
                notify,
            } => self.save_quest(quest, tasks, notify).await?,
            Event::UpdateQuest { quest } => self.update_quest(quest).await?,
            Event::UpdateCompletion { id, completed } => {
                self.update_completion(id, completed).await?
            }
            Event::UpdateProgress { quest } => self.update_progress(quest).await?,
            Event::ToggleTask {
                quest_id,
                task_id,
                current,
            } => self.toggle_task(quest_id, task_id, current).await?,
            Event::CheckReminders => self.check_reminders().await?,
        }
        Ok(())
    }

    /// Update state with all non-completed quests.
    ///
    async fn fetch_quests(&mut self) -> Result<()> {
        info!("Fetching non-completed quests...");
        match self.store.fetch_non_completed_quests().await {
            Ok(quests) => {
                info!("Received {} quests.", quests.len());
                let mut state = self.state.lock().await;
                state.set_quests(quests);
            }
            Err(e) => {
                let mut state = self.state.lock().await;
                state.fetch_failed(e.to_string());
            }
        }
        Ok(())
    }

    /// Persist a new quest, then schedule its reminder when requested.
    ///
    async fn save_quest(&mut self, quest: Quest, tasks: Vec<String>, notify: bool) -> Result<()> {
        info!("Saving quest '{}'...", quest.title);
        match self.store.save_quest(&quest, &tasks).await {
            Ok(()) => {
                {
                    let mut state = self.state.lock().await;
                    state.form_mut().finish_save(true);
                }
                if notify {
                    if let Err(e) = self.notifier.schedule(&quest).await {
                        warn!("Failed to schedule reminder: {}", e);
                    }
                }
                info!("Quest '{}' saved.", quest.title);
            }
            Err(e) => {
                let mut state = self.state.lock().await;
                state.form_mut().finish_save(false);
                state.push_error(e.to_string());
            }
        }
        Ok(())
    }

    /// Rewrite a quest's field set, then resynchronize local state.
    ///
    async fn update_quest(&mut self, quest: Quest) -> Result<()> {
        info!("Updating quest {}...", quest.id);
        match self
            .store
            .update_quest(
                quest.id,
                &quest.title,
                quest.is_main_quest,
                &quest.info,
                quest.difficulty,
                quest.due_date,
                quest.is_active,
                quest.progress,
            )
            .await
        {
            Ok(()) => {
                {
                    let mut state = self.state.lock().await;
                    state.form_mut().finish_save(true);
                }
                self.fetch_quests().await?;
            }
            Err(e) => {
                let mut state = self.state.lock().await;
                state.form_mut().finish_save(false);
                state.push_error(e.to_string());
            }
        }
        Ok(())
    }

    /// Confirm or revert an optimistic completion flip; award experience
    /// on a confirmed completion.
    ///
    async fn update_completion(&mut self, id: Uuid, completed: bool) -> Result<()> {
        info!("Updating completion for quest {}...", id);
        match self.store.update_quest_completion(id, completed).await {
            Ok(()) => {
                let reward = {
                    let mut state = self.state.lock().await;
                    state.commit_mutation(id);
                    state
                        .quests()
                        .iter()
                        .find(|q| q.id == id)
                        .map(|q| q.experience_reward())
                };
                if completed {
                    match reward {
                        Some(exp) => self.award_experience(exp).await?,
                        None => debug!("Quest {} left local state before the award.", id),
                    }
                }
            }
            Err(e) => {
                let mut state = self.state.lock().await;
                state.revert_mutation(id);
                state.push_error(e.to_string());
            }
        }
        Ok(())
    }

    /// Award experience to the user profile. The completion stands even
    /// when the award fails; only the failure is surfaced.
    ///
    async fn award_experience(&mut self, additional_exp: u32) -> Result<()> {
        match self.store.update_user_experience(additional_exp).await {
            Ok(profile) => {
                info!("Awarded {} experience.", additional_exp);
                let mut state = self.state.lock().await;
                state.set_profile(profile);
            }
            Err(e) => {
                let mut state = self.state.lock().await;
                state.push_error(e.to_string());
            }
        }
        Ok(())
    }

    /// Confirm or revert an optimistic progress change.
    ///
    async fn update_progress(&mut self, quest: Quest) -> Result<()> {
        info!("Persisting progress {} for quest {}...", quest.progress, quest.id);
        match self
            .store
            .update_quest(
                quest.id,
                &quest.title,
                quest.is_main_quest,
                &quest.info,
                quest.difficulty,
                quest.due_date,
                quest.is_active,
                quest.progress,
            )
            .await
        {
            Ok(()) => {
                let mut state = self.state.lock().await;
                state.commit_mutation(quest.id);
            }
            Err(e) => {
                let mut state = self.state.lock().await;
                state.revert_mutation(quest.id);
                state.push_error(e.to_string());
            }
        }
        Ok(())
    }

    /// Persist a sub-task toggle, restoring the local value on failure.
    ///
    async fn toggle_task(&mut self, quest_id: Uuid, task_id: Uuid, current: bool) -> Result<()> {
        if let Err(e) = self
            .store
            .toggle_task_completion(quest_id, task_id, current)
            .await
        {
            let mut state = self.state.lock().await;
            state.set_task_completion(quest_id, task_id, current);
            state.push_error(e.to_string());
        }
        Ok(())
    }

    /// Surface reminders that have come due since the last check.
    ///
    async fn check_reminders(&mut self) -> Result<()> {
        match self.notifier.due(Utc::now()).await {
            Ok(fired) => {
                for reminder in fired {
                    info!("Reminder due: {}", reminder.title);
                }
            }
            Err(e) => warn!("Failed to check reminders: {}", e),
        }
        Ok(())
    }
}
