use crate::state::{FormField, State, View};
use anyhow::Result;
use crossterm::{
    event,
    event::{Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
};
use log::*;
use std::{sync::mpsc, thread, time::Duration};

/// Specify terminal event poll rate in milliseconds.
///
const TICK_RATE_IN_MS: u64 = 60;

/// Progress percentage applied per keypress.
///
const PROGRESS_STEP: i32 = 10;

/// Specify different terminal event types.
///
#[derive(Debug)]
pub enum Event<I> {
    Input(I),
    Tick,
}

/// Specify struct for managing terminal events channel.
///
pub struct Handler {
    rx: mpsc::Receiver<Event<KeyEvent>>,
    _tx: mpsc::Sender<Event<KeyEvent>>,
}

impl Handler {
    /// Return new instance after spawning new input polling thread.
    ///
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        let tx_clone = tx.clone();
        thread::spawn(move || loop {
            let tick_rate = Duration::from_millis(TICK_RATE_IN_MS);
            if event::poll(tick_rate).unwrap() {
                if let CrosstermEvent::Key(key) = event::read().unwrap() {
                    if key.kind != KeyEventKind::Release {
                        tx_clone.send(Event::Input(key)).unwrap();
                    }
                }
            }
            tx_clone.send(Event::Tick).unwrap();
        });
        Handler { rx, _tx: tx }
    }

    /// Receive next terminal event and handle it accordingly. Returns result
    /// with value true if should continue or false if exit was requested.
    ///
    pub fn handle_next(&self, state: &mut State) -> Result<bool> {
        match self.rx.recv()? {
            Event::Input(event) => {
                if let KeyEvent {
                    code: KeyCode::Char('c'),
                    modifiers: KeyModifiers::CONTROL,
                    ..
                } = event
                {
                    debug!("Processing exit terminal event '{:?}'...", event);
                    return Ok(false);
                }

                // An unacknowledged error owns the keyboard until dismissed.
                if state.current_error().is_some() {
                    if matches!(event.code, KeyCode::Enter | KeyCode::Esc) {
                        state.dismiss_error();
                    }
                    return Ok(true);
                }

                match state.current_view() {
                    View::Quests => return Self::handle_quests_view(state, event),
                    View::CreateQuest | View::EditQuest => {
                        Self::handle_form_view(state, event);
                    }
                }
            }
            Event::Tick => {
                state.advance_spinner_index();
                if state.form().did_save {
                    state.form_mut().reset();
                    if state.current_view() != View::Quests {
                        state.pop_view();
                    }
                    state.fetch_quests();
                }
            }
        }
        Ok(true)
    }

    /// Handle keys for the quest list view.
    ///
    fn handle_quests_view(state: &mut State, event: KeyEvent) -> Result<bool> {
        match event.code {
            KeyCode::Char('q') => {
                debug!("Processing exit terminal event '{:?}'...", event);
                return Ok(false);
            }
            KeyCode::Char('r') => state.fetch_quests(),
            KeyCode::Char('n') => state.push_view(View::CreateQuest),
            KeyCode::Char('e') => {
                if let Some(quest) = state.selected_quest().cloned() {
                    state.form_mut().load(&quest);
                    state.push_view(View::EditQuest);
                }
            }
            KeyCode::Tab | KeyCode::Right | KeyCode::Char('l') => state.next_tab(),
            KeyCode::BackTab | KeyCode::Left | KeyCode::Char('h') => state.prev_tab(),
            KeyCode::Char('s') => state.cycle_status_filter(),
            KeyCode::Down | KeyCode::Char('j') => state.select_next(),
            KeyCode::Up | KeyCode::Char('k') => state.select_prev(),
            KeyCode::Char('c') => {
                if let Some(quest) = state.selected_quest() {
                    let id = quest.id;
                    state.mark_quest_completed(id);
                }
            }
            KeyCode::Char('+') | KeyCode::Char('=') => {
                if let Some(quest) = state.selected_quest() {
                    let id = quest.id;
                    state.update_quest_progress(id, PROGRESS_STEP);
                }
            }
            KeyCode::Char('-') | KeyCode::Char('_') => {
                if let Some(quest) = state.selected_quest() {
                    let id = quest.id;
                    state.update_quest_progress(id, -PROGRESS_STEP);
                }
            }
            KeyCode::Char(c @ '1'..='9') => {
                let index = c as usize - '1' as usize;
                if let Some(quest) = state.selected_quest() {
                    if let Some(task) = quest.tasks.get(index) {
                        let quest_id = quest.id;
                        let task_id = task.id;
                        state.toggle_task(quest_id, task_id);
                    }
                }
            }
            KeyCode::Char('d') => state.toggle_log(),
            _ => {}
        }
        Ok(true)
    }

    /// Handle keys for the create/edit form view.
    ///
    fn handle_form_view(state: &mut State, event: KeyEvent) {
        match event.code {
            KeyCode::Esc => {
                state.form_mut().reset();
                state.pop_view();
                return;
            }
            KeyCode::Char('s') if event.modifiers == KeyModifiers::CONTROL => {
                state.save_quest();
                return;
            }
            KeyCode::Tab => {
                state.form_mut().next_field();
                return;
            }
            KeyCode::BackTab => {
                state.form_mut().prev_field();
                return;
            }
            _ => {}
        }

        // The description is a full textarea; everything else routes to it.
        if state.form().selected_field == FormField::Info {
            state.form_mut().info.input(event);
            return;
        }

        let form = state.form_mut();
        match event.code {
            KeyCode::Enter => match form.selected_field {
                FormField::Tasks => form.commit_task_line(),
                FormField::MainQuest
                | FormField::Active
                | FormField::NotifyMe
                | FormField::Repeat => form.toggle(),
                _ => form.next_field(),
            },
            KeyCode::Backspace => form.backspace(),
            KeyCode::Down => form.next_field(),
            KeyCode::Up => form.prev_field(),
            KeyCode::Char(c) if event.modifiers != KeyModifiers::CONTROL => {
                let stepped = matches!(
                    form.selected_field,
                    FormField::Difficulty | FormField::DueDate | FormField::Repeat
                );
                if stepped && matches!(c, '+' | '=') {
                    form.increment();
                } else if stepped && matches!(c, '-' | '_') {
                    form.decrement();
                } else if c == ' '
                    && matches!(
                        form.selected_field,
                        FormField::MainQuest
                            | FormField::Active
                            | FormField::NotifyMe
                            | FormField::Repeat
                    )
                {
                    form.toggle();
                } else {
                    form.push_char(c);
                }
            }
            _ => {}
        }
    }
}
