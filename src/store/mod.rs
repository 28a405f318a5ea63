mod error;
pub(crate) mod files;
mod resource;

pub use error::StoreError;
pub use resource::*;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use log::*;
use std::path::PathBuf;
use uuid::Uuid;

const QUESTS_FILE: &str = "quests.json";
const PROFILE_FILE: &str = "profile.json";

/// Persistence contract for the quest log.
///
/// Consumed by the store event worker; the state holders never touch
/// storage directly.
#[async_trait]
pub trait QuestStore: Send + Sync {
    /// Return every quest that has not been completed, in insertion order.
    async fn fetch_non_completed_quests(&self) -> Result<Vec<Quest>, StoreError>;

    /// Persist a new quest together with its cleaned sub-task titles.
    async fn save_quest(&self, quest: &Quest, tasks: &[String]) -> Result<(), StoreError>;

    /// Rewrite the full editable field set of an existing quest.
    #[allow(clippy::too_many_arguments)]
    async fn update_quest(
        &self,
        id: Uuid,
        title: &str,
        is_main_quest: bool,
        info: &str,
        difficulty: u8,
        due_date: DateTime<Utc>,
        is_active: bool,
        progress: u8,
    ) -> Result<(), StoreError>;

    /// Set the completion flag of an existing quest.
    async fn update_quest_completion(&self, id: Uuid, completed: bool) -> Result<(), StoreError>;

    /// Flip a sub-task away from the given current value.
    async fn toggle_task_completion(
        &self,
        quest_id: Uuid,
        task_id: Uuid,
        current: bool,
    ) -> Result<(), StoreError>;
}

/// Persistence contract for the player profile and experience tracking.
///
#[async_trait]
pub trait ProfileStore: Send + Sync {
    async fn load_profile(&self) -> Result<Option<Profile>, StoreError>;

    async fn save_profile(&self, profile: &Profile) -> Result<(), StoreError>;

    /// Add experience to the profile and return the updated record.
    async fn update_user_experience(&self, additional_exp: u32) -> Result<Profile, StoreError>;
}

/// JSON-file-backed store keeping the quest log and player profile in the
/// local data directory.
///
pub struct JsonStore {
    data_dir: PathBuf,
}

impl JsonStore {
    /// Return a new instance rooted at the given data directory.
    ///
    pub fn new(data_dir: impl Into<PathBuf>) -> JsonStore {
        let data_dir = data_dir.into();
        debug!("Initializing quest store in {}...", data_dir.display());
        JsonStore { data_dir }
    }

    fn quests_path(&self) -> PathBuf {
        self.data_dir.join(QUESTS_FILE)
    }

    fn profile_path(&self) -> PathBuf {
        self.data_dir.join(PROFILE_FILE)
    }

    async fn load_quests(&self) -> Result<Vec<Quest>, StoreError> {
        Ok(files::read_json(&self.quests_path()).await?.unwrap_or_default())
    }

    async fn store_quests(&self, quests: &[Quest]) -> Result<(), StoreError> {
        files::write_json(&self.quests_path(), &quests).await
    }
}

#[async_trait]
impl QuestStore for JsonStore {
    async fn fetch_non_completed_quests(&self) -> Result<Vec<Quest>, StoreError> {
        let quests = self.load_quests().await?;
        let non_completed: Vec<Quest> =
            quests.into_iter().filter(|q| !q.is_completed).collect();
        debug!("Loaded {} non-completed quests.", non_completed.len());
        Ok(non_completed)
    }

    async fn save_quest(&self, quest: &Quest, tasks: &[String]) -> Result<(), StoreError> {
        let mut quests = self.load_quests().await?;
        let mut quest = quest.clone();
        quest.tasks = tasks.iter().map(|t| SubTask::new(t.as_str())).collect();
        quests.push(quest);
        self.store_quests(&quests).await
    }

    async fn update_quest(
        &self,
        id: Uuid,
        title: &str,
        is_main_quest: bool,
        info: &str,
        difficulty: u8,
        due_date: DateTime<Utc>,
        is_active: bool,
        progress: u8,
    ) -> Result<(), StoreError> {
        let mut quests = self.load_quests().await?;
        let quest = quests
            .iter_mut()
            .find(|q| q.id == id)
            .ok_or(StoreError::QuestNotFound { id })?;
        quest.title = title.to_owned();
        quest.is_main_quest = is_main_quest;
        quest.info = info.to_owned();
        quest.difficulty = difficulty;
        quest.due_date = due_date;
        quest.is_active = is_active;
        quest.progress = progress;
        self.store_quests(&quests).await
    }

    async fn update_quest_completion(&self, id: Uuid, completed: bool) -> Result<(), StoreError> {
        let mut quests = self.load_quests().await?;
        let quest = quests
            .iter_mut()
            .find(|q| q.id == id)
            .ok_or(StoreError::QuestNotFound { id })?;
        quest.is_completed = completed;
        self.store_quests(&quests).await
    }

    async fn toggle_task_completion(
        &self,
        quest_id: Uuid,
        task_id: Uuid,
        current: bool,
    ) -> Result<(), StoreError> {
        let mut quests = self.load_quests().await?;
        let quest = quests
            .iter_mut()
            .find(|q| q.id == quest_id)
            .ok_or(StoreError::QuestNotFound { id: quest_id })?;
        let task = quest
            .tasks
            .iter_mut()
            .find(|t| t.id == task_id)
            .ok_or(StoreError::TaskNotFound { id: task_id })?;
        task.is_completed = !current;
        self.store_quests(&quests).await
    }
}

#[async_trait]
impl ProfileStore for JsonStore {
    async fn load_profile(&self) -> Result<Option<Profile>, StoreError> {
        files::read_json(&self.profile_path()).await
    }

    async fn save_profile(&self, profile: &Profile) -> Result<(), StoreError> {
        files::write_json(&self.profile_path(), profile).await
    }

    async fn update_user_experience(&self, additional_exp: u32) -> Result<Profile, StoreError> {
        let mut profile = self.load_profile().await?.unwrap_or_default();
        profile.experience = profile.experience.saturating_add(additional_exp);
        self.save_profile(&profile).await?;
        info!("User experience is now {}.", profile.experience);
        Ok(profile)
    }
}
