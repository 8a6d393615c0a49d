use anyhow::Result;
use crossterm::{
    event::{Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use readlist_core::BookStore;
use std::io;
use std::time::Duration;
use tracing::info;

use crate::app::App;
use crate::ui::UI;

/// Open the list screen on the current terminal and run until the user quits
pub async fn run(store: BookStore) -> Result<()> {
    let mut app = App::new(store);

    // Initial load; failures surface in the command bar
    app.load_books().await;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut ui = UI::new();

    info!(db = %app.store.path().display(), "List screen started");
    let res = run_event_loop(&mut terminal, &mut app, &mut ui).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    info!("List screen closed");
    res
}

async fn run_event_loop<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    ui: &mut UI,
) -> Result<()> {
    loop {
        terminal.draw(|f| ui.render(f, app))?;

        // Poll for events with timeout so the clock in the status bar ticks
        if let Some(Event::Key(key)) = App::poll_event(Duration::from_millis(250))? {
            // Ignore release/repeat events reported by some platforms
            if key.kind == KeyEventKind::Press {
                app.handle_key_event(key).await;
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
