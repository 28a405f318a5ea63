use crate::config::Config;
use crate::events::store::{Event as StoreEvent, Handler as StoreEventHandler};
use crate::events::terminal::Handler as TerminalEventHandler;
use crate::notify::Notifier;
use crate::state::{QuestTab, State, StatusFilter};
use crate::store::{JsonStore, Profile, ProfileStore};
use anyhow::Result;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::*;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, stdout};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Mutex;
use tui_logger::{init_logger, set_default_level};

pub type StoreEventSender = std::sync::mpsc::Sender<StoreEvent>;
type StoreEventReceiver = std::sync::mpsc::Receiver<StoreEvent>;

/// Oversees event processing, state management, and terminal output.
///
pub struct App {
    state: Arc<Mutex<State>>,
    config: Config,
}

impl App {
    /// Start a new application according to the given configuration. Returns
    /// the result of the application execution.
    ///
    pub async fn start(config: Config) -> Result<()> {
        init_logger(LevelFilter::Info).unwrap();
        set_default_level(LevelFilter::Trace);

        info!("Starting application...");
        let data_dir = config.resolve_data_dir()?;

        // First launch creates the default character explicitly.
        let store = JsonStore::new(&data_dir);
        let profile = match store.load_profile().await? {
            Some(profile) => profile,
            None => {
                info!("No profile found; creating the default character.");
                let profile = Profile::default();
                store.save_profile(&profile).await?;
                profile
            }
        };
        if !profile.class.weapons().contains(&profile.weapon) {
            warn!(
                "Profile weapon {} is unusual for a {}.",
                profile.weapon.label(),
                profile.class.label()
            );
        }

        let (tx, rx) = std::sync::mpsc::channel::<StoreEvent>();
        let selected_tab = QuestTab::from_name(&config.last_tab).unwrap_or(QuestTab::All);
        let status_filter =
            StatusFilter::from_name(&config.last_status_filter).unwrap_or(StatusFilter::All);
        let mut app = App {
            state: Arc::new(Mutex::new(State::new(
                tx.clone(),
                profile,
                selected_tab,
                status_filter,
            ))),
            config,
        };
        app.start_store_worker(rx, data_dir)?;
        app.start_ui(tx).await?;

        // Persist the filter selections for the next session.
        {
            let state = app.state.lock().await;
            app.config.last_tab = state.selected_tab().name().to_string();
            app.config.last_status_filter = state.status_filter().name().to_string();
            if let Err(e) = app.config.save() {
                error!("Failed to save config on exit: {}", e);
            }
        }

        info!("Exiting application...");
        Ok(())
    }

    /// Start a separate thread for asynchronous state mutations.
    ///
    fn start_store_worker(&self, receiver: StoreEventReceiver, data_dir: PathBuf) -> Result<()> {
        debug!("Creating new thread for asynchronous persistence...");
        let cloned_state = Arc::clone(&self.state);
        let notifications_enabled = self.config.notifications_enabled;
        std::thread::spawn(move || {
            tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()
                .unwrap()
                .block_on(async {
                    let store = JsonStore::new(&data_dir);
                    let notifier = Notifier::new(&data_dir).with_enabled(notifications_enabled);
                    let mut store_event_handler =
                        StoreEventHandler::new(&cloned_state, &store, &notifier);
                    while let Ok(store_event) = receiver.recv() {
                        match store_event_handler.handle(store_event).await {
                            Ok(_) => (),
                            Err(e) => error!("Failed to handle store event: {}", e),
                        }
                    }
                })
        });
        Ok(())
    }

    /// Begin the terminal event poll on a separate thread before starting the
    /// render loop on the main thread. Return the result following an exit
    /// request or unrecoverable error.
    ///
    async fn start_ui(&mut self, store_sender: StoreEventSender) -> Result<()> {
        debug!("Starting user interface on main thread...");
        let mut stdout = stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        enable_raw_mode()?;

        let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        terminal.hide_cursor()?;

        store_sender.send(StoreEvent::CheckReminders)?;
        {
            let mut state = self.state.lock().await;
            state.fetch_quests();
        }

        let terminal_event_handler = TerminalEventHandler::new();
        loop {
            let mut state = self.state.lock().await;
            terminal.draw(|frame| crate::ui::render(frame, &mut state))?;
            if !terminal_event_handler.handle_next(&mut state)? {
                debug!("Received application exit request.");
                break;
            }
        }

        disable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, LeaveAlternateScreen, DisableMouseCapture)?;

        Ok(())
    }
}
