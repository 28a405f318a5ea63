use crate::app::StoreEventSender;
use crate::events::store::Event as StoreEvent;
use crate::state::form::QuestForm;
use crate::state::navigation::{QuestTab, StatusFilter, View};
use crate::state::StateError;
use crate::store::{Profile, Quest, MAX_PROGRESS};
use crate::ui::SPINNER_FRAME_COUNT;
use log::*;
use std::collections::{HashMap, VecDeque};
use uuid::Uuid;

/// The last durable value of a field while an optimistic mutation is in
/// flight, used for rollback on confirmed failure.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PendingMutation {
    Completion { prior: bool },
    Progress { prior: u8 },
}

/// Houses data representative of application state.
///
/// The authoritative in-memory list of non-completed quests visible to
/// the UI; every mutation is mediated through the store event worker.
pub struct State {
    store_sender: Option<StoreEventSender>,
    profile: Option<Profile>,
    quests: Vec<Quest>,
    pending: HashMap<Uuid, PendingMutation>,
    errors: VecDeque<String>,
    selected_tab: QuestTab,
    status_filter: StatusFilter,
    view_stack: Vec<View>,
    form: QuestForm,
    selected_index: usize,
    is_fetching: bool,
    show_log: bool,
    spinner_index: usize,
}

/// Defines default application state.
///
impl Default for State {
    fn default() -> State {
        State {
            store_sender: None,
            profile: None,
            quests: vec![],
            pending: HashMap::new(),
            errors: VecDeque::new(),
            selected_tab: QuestTab::All,
            status_filter: StatusFilter::All,
            view_stack: vec![View::Quests],
            form: QuestForm::default(),
            selected_index: 0,
            is_fetching: false,
            show_log: false,
            spinner_index: 0,
        }
    }
}

impl State {
    pub fn new(
        store_sender: StoreEventSender,
        profile: Profile,
        selected_tab: QuestTab,
        status_filter: StatusFilter,
    ) -> Self {
        State {
            store_sender: Some(store_sender),
            profile: Some(profile),
            selected_tab,
            status_filter,
            ..State::default()
        }
    }

    fn send(&self, event: StoreEvent) {
        if let Some(sender) = &self.store_sender {
            if sender.send(event).is_err() {
                warn!("Store worker is gone; dropping event.");
            }
        }
    }

    /// Request all non-completed quests from the store.
    ///
    pub fn fetch_quests(&mut self) {
        self.is_fetching = true;
        self.send(StoreEvent::FetchQuests);
    }

    /// Replace the local list with a fetch result, most recently created
    /// first. Pending shadows refer to replaced records and are dropped.
    ///
    pub fn set_quests(&mut self, quests: Vec<Quest>) {
        self.quests = quests.into_iter().rev().collect();
        self.pending.clear();
        self.is_fetching = false;
        self.clamp_selection();
    }

    /// Record a failed fetch, leaving the current list untouched.
    ///
    pub fn fetch_failed(&mut self, message: impl Into<String>) {
        self.is_fetching = false;
        self.push_error(message);
    }

    /// Optimistically mark a quest as completed and enqueue the durable
    /// update. A no-op when the id is not in local state.
    ///
    pub fn mark_quest_completed(&mut self, id: Uuid) {
        let Some(quest) = self.quests.iter_mut().find(|q| q.id == id) else {
            return;
        };
        let prior = quest.is_completed;
        quest.is_completed = true;
        // Keep the oldest durable value if a mutation is already in flight.
        self.pending
            .entry(id)
            .or_insert(PendingMutation::Completion { prior });
        self.send(StoreEvent::UpdateCompletion {
            id,
            completed: true,
        });
    }

    /// Push a full field-set update for an existing quest to the store.
    ///
    pub fn update_quest(&mut self, quest: Quest) {
        self.send(StoreEvent::UpdateQuest { quest });
    }

    /// Apply a progress delta locally, clamped to [0, 100], and enqueue
    /// persistence of the full record. A no-op when the id is missing.
    ///
    pub fn update_quest_progress(&mut self, id: Uuid, delta: i32) {
        let Some(position) = self.quests.iter().position(|q| q.id == id) else {
            return;
        };
        let prior = self.quests[position].progress;
        let next = (i32::from(prior) + delta).clamp(0, i32::from(MAX_PROGRESS)) as u8;
        self.quests[position].progress = next;
        self.pending
            .entry(id)
            .or_insert(PendingMutation::Progress { prior });
        let quest = self.quests[position].clone();
        self.send(StoreEvent::UpdateProgress { quest });
    }

    /// Optimistically flip a sub-task and enqueue the durable toggle.
    ///
    pub fn toggle_task(&mut self, quest_id: Uuid, task_id: Uuid) {
        let Some(quest) = self.quests.iter_mut().find(|q| q.id == quest_id) else {
            return;
        };
        let Some(task) = quest.tasks.iter_mut().find(|t| t.id == task_id) else {
            return;
        };
        let current = task.is_completed;
        task.is_completed = !current;
        self.send(StoreEvent::ToggleTask {
            quest_id,
            task_id,
            current,
        });
    }

    /// Force a sub-task back to a known completion value.
    ///
    pub fn set_task_completion(&mut self, quest_id: Uuid, task_id: Uuid, completed: bool) {
        if let Some(quest) = self.quests.iter_mut().find(|q| q.id == quest_id) {
            if let Some(task) = quest.tasks.iter_mut().find(|t| t.id == task_id) {
                task.is_completed = completed;
            }
        }
    }

    /// Commit an in-flight optimistic mutation as truth.
    ///
    pub fn commit_mutation(&mut self, id: Uuid) {
        self.pending.remove(&id);
    }

    /// Revert an in-flight optimistic mutation to its last durable value.
    ///
    pub fn revert_mutation(&mut self, id: Uuid) {
        let Some(pending) = self.pending.remove(&id) else {
            return;
        };
        let Some(quest) = self.quests.iter_mut().find(|q| q.id == id) else {
            return;
        };
        match pending {
            PendingMutation::Completion { prior } => quest.is_completed = prior,
            PendingMutation::Progress { prior } => quest.progress = prior,
        }
    }

    /// Validate the form and enqueue a save (creation) or full update
    /// (edit flow).
    ///
    pub fn save_quest(&mut self) {
        if let Err(e) = self.form.validate() {
            self.push_error(e.to_string());
            return;
        }
        self.form.is_saving = true;
        self.form.did_save = false;
        match self.form.editing {
            Some(id) => {
                let Some(existing) = self.quests.iter().find(|q| q.id == id).cloned() else {
                    self.form.finish_save(false);
                    self.push_error(StateError::QuestNotFound { id }.to_string());
                    return;
                };
                let quest = Quest {
                    title: self.form.title.clone(),
                    info: self.form.info_text(),
                    difficulty: self.form.difficulty,
                    due_date: self.form.due_date,
                    is_main_quest: self.form.is_main_quest,
                    is_active: self.form.is_active,
                    ..existing
                };
                self.update_quest(quest);
            }
            None => {
                let quest = self.form.build_quest();
                let tasks = self.form.task_titles();
                let notify = self.form.notify_me;
                self.send(StoreEvent::SaveQuest {
                    quest,
                    tasks,
                    notify,
                });
            }
        }
    }

    fn status_filtered(&self, tab: impl Fn(&Quest) -> bool) -> Vec<&Quest> {
        self.quests
            .iter()
            .filter(|q| tab(q))
            .filter(|q| match self.status_filter {
                StatusFilter::All => true,
                StatusFilter::Active => q.is_active,
                StatusFilter::Inactive => !q.is_active,
            })
            .collect()
    }

    /// Main quests under the current status filter. A pure projection.
    ///
    pub fn main_quests(&self) -> Vec<&Quest> {
        self.status_filtered(|q| q.is_main_quest)
    }

    /// Side quests under the current status filter. A pure projection.
    ///
    pub fn side_quests(&self) -> Vec<&Quest> {
        self.status_filtered(|q| !q.is_main_quest)
    }

    /// The quests shown for the selected tab and status filter.
    ///
    pub fn visible_quests(&self) -> Vec<&Quest> {
        match self.selected_tab {
            QuestTab::All => self.status_filtered(|_| true),
            QuestTab::Main => self.main_quests(),
            QuestTab::Side => self.side_quests(),
        }
    }

    pub fn quests(&self) -> &Vec<Quest> {
        &self.quests
    }

    /// Queue an error event for the UI. Events are observed in order;
    /// a later error never replaces an unacknowledged earlier one.
    ///
    pub fn push_error(&mut self, message: impl Into<String>) {
        let message = message.into();
        error!("{}", message);
        self.errors.push_back(message);
    }

    pub fn current_error(&self) -> Option<&str> {
        self.errors.front().map(String::as_str)
    }

    pub fn dismiss_error(&mut self) -> Option<String> {
        self.errors.pop_front()
    }

    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    pub fn profile(&self) -> Option<&Profile> {
        self.profile.as_ref()
    }

    pub fn set_profile(&mut self, profile: Profile) {
        self.profile = Some(profile);
    }

    pub fn selected_tab(&self) -> QuestTab {
        self.selected_tab
    }

    pub fn next_tab(&mut self) {
        self.selected_tab = self.selected_tab.next();
        self.selected_index = 0;
    }

    pub fn prev_tab(&mut self) {
        self.selected_tab = self.selected_tab.prev();
        self.selected_index = 0;
    }

    pub fn status_filter(&self) -> StatusFilter {
        self.status_filter
    }

    pub fn cycle_status_filter(&mut self) {
        self.status_filter = self.status_filter.next();
        self.clamp_selection();
    }

    pub fn current_view(&self) -> View {
        *self.view_stack.last().unwrap_or(&View::Quests)
    }

    pub fn push_view(&mut self, view: View) {
        self.view_stack.push(view);
    }

    pub fn pop_view(&mut self) {
        if self.view_stack.len() > 1 {
            self.view_stack.pop();
        }
    }

    pub fn form(&self) -> &QuestForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut QuestForm {
        &mut self.form
    }

    pub fn selected_index(&self) -> usize {
        self.selected_index
    }

    pub fn select_next(&mut self) {
        let len = self.visible_quests().len();
        if len > 0 && self.selected_index + 1 < len {
            self.selected_index += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.selected_index = self.selected_index.saturating_sub(1);
    }

    pub fn selected_quest(&self) -> Option<&Quest> {
        self.visible_quests().into_iter().nth(self.selected_index)
    }

    fn clamp_selection(&mut self) {
        let len = self.visible_quests().len();
        if len == 0 {
            self.selected_index = 0;
        } else if self.selected_index >= len {
            self.selected_index = len - 1;
        }
    }

    pub fn is_fetching(&self) -> bool {
        self.is_fetching
    }

    pub fn is_log_visible(&self) -> bool {
        self.show_log
    }

    pub fn toggle_log(&mut self) {
        self.show_log = !self.show_log;
    }

    pub fn advance_spinner_index(&mut self) {
        self.spinner_index = (self.spinner_index + 1) % SPINNER_FRAME_COUNT;
    }

    pub fn spinner_index(&self) -> usize {
        self.spinner_index
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fake::{Fake, Faker};
    use std::collections::HashSet;

    fn quest(is_main: bool, is_active: bool) -> Quest {
        let mut quest: Quest = Faker.fake();
        quest.is_main_quest = is_main;
        quest.is_active = is_active;
        quest.is_completed = false;
        quest.progress = 50;
        quest
    }

    fn state_with(quests: Vec<Quest>) -> State {
        let mut state = State::default();
        state.quests = quests;
        state
    }

    #[test]
    fn update_progress_clamps_to_upper_bound() {
        let mut quest = quest(true, true);
        quest.progress = 90;
        let id = quest.id;
        let mut state = state_with(vec![quest]);

        state.update_quest_progress(id, 50);
        assert_eq!(state.quests[0].progress, 100);
    }

    #[test]
    fn update_progress_clamps_to_lower_bound() {
        let mut quest = quest(true, true);
        quest.progress = 10;
        let id = quest.id;
        let mut state = state_with(vec![quest]);

        state.update_quest_progress(id, -50);
        assert_eq!(state.quests[0].progress, 0);
    }

    #[test]
    fn update_progress_on_unknown_id_is_a_noop() {
        let mut state = state_with(vec![quest(true, true)]);
        let before = state.quests.clone();

        state.update_quest_progress(Uuid::new_v4(), 10);
        assert_eq!(state.quests, before);
        assert!(state.pending.is_empty());
    }

    #[test]
    fn mark_completed_on_unknown_id_is_a_noop() {
        let mut state = state_with(vec![quest(true, true)]);
        let before = state.quests.clone();

        state.mark_quest_completed(Uuid::new_v4());
        assert_eq!(state.quests, before);
        assert!(state.current_error().is_none());
    }

    #[test]
    fn mark_completed_flips_optimistically() {
        let quest = quest(true, true);
        let id = quest.id;
        let mut state = state_with(vec![quest]);

        state.mark_quest_completed(id);
        assert!(state.quests[0].is_completed);
        assert_eq!(
            state.pending.get(&id),
            Some(&PendingMutation::Completion { prior: false })
        );
    }

    #[test]
    fn revert_restores_the_prior_value() {
        let quest = quest(true, true);
        let id = quest.id;
        let mut state = state_with(vec![quest]);

        state.mark_quest_completed(id);
        state.revert_mutation(id);
        assert!(!state.quests[0].is_completed);
        assert!(state.pending.is_empty());

        state.update_quest_progress(id, 30);
        assert_eq!(state.quests[0].progress, 80);
        state.revert_mutation(id);
        assert_eq!(state.quests[0].progress, 50);
    }

    #[test]
    fn commit_keeps_the_new_value() {
        let quest = quest(true, true);
        let id = quest.id;
        let mut state = state_with(vec![quest]);

        state.update_quest_progress(id, 30);
        state.commit_mutation(id);
        assert_eq!(state.quests[0].progress, 80);
        assert!(state.pending.is_empty());
    }

    #[test]
    fn in_flight_mutations_keep_the_oldest_durable_value() {
        let quest = quest(true, true);
        let id = quest.id;
        let mut state = state_with(vec![quest]);

        state.update_quest_progress(id, 10);
        state.update_quest_progress(id, 10);
        assert_eq!(state.quests[0].progress, 70);

        state.revert_mutation(id);
        assert_eq!(state.quests[0].progress, 50);
    }

    #[test]
    fn fetch_failure_preserves_quests_and_queues_the_error() {
        let mut state = state_with(vec![quest(true, true), quest(false, true)]);
        let before = state.quests.clone();

        state.fetch_failed("storage unavailable");
        assert_eq!(state.quests, before);
        assert_eq!(state.current_error(), Some("storage unavailable"));
    }

    #[test]
    fn set_quests_orders_most_recently_created_first() {
        let first = quest(true, true);
        let second = quest(false, true);
        let mut state = State::default();

        state.set_quests(vec![first.clone(), second.clone()]);
        assert_eq!(state.quests[0].id, second.id);
        assert_eq!(state.quests[1].id, first.id);
    }

    #[test]
    fn tab_partition_is_complete_and_disjoint_for_every_status_filter() {
        let quests = vec![
            quest(true, true),
            quest(true, false),
            quest(false, true),
            quest(false, false),
        ];
        for filter in StatusFilter::ALL {
            let mut state = state_with(quests.clone());
            state.status_filter = filter;

            let main: HashSet<Uuid> = state.main_quests().iter().map(|q| q.id).collect();
            let side: HashSet<Uuid> = state.side_quests().iter().map(|q| q.id).collect();
            let all: HashSet<Uuid> =
                state.status_filtered(|_| true).iter().map(|q| q.id).collect();

            assert!(main.is_disjoint(&side));
            let union: HashSet<Uuid> = main.union(&side).copied().collect();
            assert_eq!(union, all);
        }
    }

    #[test]
    fn unfiltered_partition_covers_the_full_list() {
        let quests = vec![quest(true, true), quest(false, false)];
        let state = state_with(quests.clone());

        let union: usize = state.main_quests().len() + state.side_quests().len();
        assert_eq!(union, quests.len());
    }

    #[test]
    fn active_filter_selects_exactly_active_main_quests() {
        let active_main = quest(true, true);
        let inactive_main = quest(true, false);
        let active_side = quest(false, true);
        let mut state = state_with(vec![
            active_main.clone(),
            inactive_main.clone(),
            active_side.clone(),
        ]);
        state.status_filter = StatusFilter::Active;

        let main_ids: Vec<Uuid> = state.main_quests().iter().map(|q| q.id).collect();
        assert_eq!(main_ids, vec![active_main.id]);
    }

    #[test]
    fn error_events_are_observed_in_order() {
        let mut state = State::default();
        state.push_error("first failure");
        state.push_error("second failure");

        assert_eq!(state.error_count(), 2);
        assert_eq!(state.current_error(), Some("first failure"));
        assert_eq!(state.dismiss_error().as_deref(), Some("first failure"));
        assert_eq!(state.current_error(), Some("second failure"));
    }

    #[test]
    fn toggle_task_flips_locally_and_revert_restores() {
        let mut quest = quest(true, true);
        quest.tasks = vec![crate::store::SubTask::new("Scout the pass")];
        let quest_id = quest.id;
        let task_id = quest.tasks[0].id;
        let mut state = state_with(vec![quest]);

        state.toggle_task(quest_id, task_id);
        assert!(state.quests[0].tasks[0].is_completed);

        state.set_task_completion(quest_id, task_id, false);
        assert!(!state.quests[0].tasks[0].is_completed);
    }

    #[test]
    fn save_quest_with_empty_title_queues_validation_error() {
        let mut state = State::default();
        state.save_quest();
        assert!(state.current_error().is_some());
        assert!(!state.form().is_saving);
    }

    #[test]
    fn save_quest_marks_saving_in_progress() {
        let mut state = State::default();
        state.form_mut().title = "Defeat the Dragon".to_string();
        state.save_quest();
        assert!(state.form().is_saving);
        assert!(!state.form().did_save);
    }

    #[test]
    fn selection_stays_within_visible_quests() {
        let mut state = state_with(vec![quest(true, true), quest(true, true)]);
        state.select_next();
        state.select_next();
        state.select_next();
        assert_eq!(state.selected_index(), 1);
        state.select_prev();
        state.select_prev();
        assert_eq!(state.selected_index(), 0);
    }
}
