//! Reelbuild - Entry Point
//!
//! This is the main executable that initializes the terminal,
//! opens the planner, and runs the input loop.

use std::fs::OpenOptions;
use std::io;

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use reelbuild::data;
use reelbuild::ui::App;

fn main() -> Result<()> {
    // Initialize logging to file (to avoid interfering with TUI)
    let log_file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open("reelbuild.log")
        .unwrap_or_else(|_| OpenOptions::new().write(true).open("/dev/null").unwrap());

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(log_file)))
        .init();

    log::info!("Starting reelbuild v{}", env!("CARGO_PKG_VERSION"));

    // One maintenance flag; everything else is a share query or build string.
    let arg = std::env::args().nth(1);
    if arg.as_deref() == Some("--export-catalog") {
        data::export_default_catalog()?;
        println!("Wrote {}", data::CATALOG_FILE);
        return Ok(());
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = match arg.as_deref() {
        Some(query) => App::with_query(query),
        None => App::new(),
    };

    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    // Report any errors
    if let Err(ref e) = result {
        log::error!("Planner exited with error: {}", e);
        eprintln!("Error: {}", e);
    }

    log::info!("reelbuild shut down cleanly");
    result
}

/// Draw, then block on the next key. The planner has no animations, so
/// there is nothing to do between key presses.
fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|frame| app.render(frame))?;

        if let Event::Key(key) = event::read()? {
            // Only handle key press events, not releases
            if key.kind == KeyEventKind::Press {
                match app.handle_input(key) {
                    Ok(true) => break,
                    Ok(false) => {}
                    Err(e) => log::warn!("Input handling error: {}", e),
                }
            }
        }
    }

    Ok(())
}
