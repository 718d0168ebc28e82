use std::io;
use std::sync::Arc;

use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;

use seconboard::config::AppConfig;
use seconboard::core::persistence::{self, DraftSaver, DraftStore, FileDraftStore, RESTORED_MESSAGE};
use seconboard::core::wizard::WizardState;
use seconboard::tui::app::AppState;
use seconboard::tui::events::{AppEvent, Notification, NotificationLevel};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load();
    let data_dir = config.data_dir();

    // Initialize logging
    let _log_guard = seconboard::core::logging::init_tui(&data_dir.join("logs"));
    log::info!("SecOnboard v{} starting", seconboard::VERSION);

    let store: Arc<dyn DraftStore> =
        Arc::new(FileDraftStore::new(&data_dir, &config.storage.storage_key));
    let (event_tx, event_rx) = mpsc::unbounded_channel();

    let wizard = match persistence::restore(store.as_ref()) {
        Some(restored) => {
            let _ = event_tx.send(AppEvent::Notification(Notification {
                id: 0,
                message: RESTORED_MESSAGE.to_string(),
                level: NotificationLevel::Success,
                ttl_ticks: 100,
            }));
            WizardState::restored(restored.draft, restored.step, restored.timestamp)
        }
        None => WizardState::new(),
    };
    let saver = DraftSaver::new(store, config.save_delay());
    let mut app = AppState::new(wizard, saver, event_rx);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    if config.tui.mouse_enabled {
        execute!(stdout, EnableMouseCapture)?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = app.run(&mut terminal, config.tick_rate()).await;

    // Restore terminal
    disable_raw_mode()?;
    if config.tui.mouse_enabled {
        execute!(terminal.backend_mut(), DisableMouseCapture)?;
    }
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }

    log::info!("SecOnboard exiting");
    Ok(())
}
