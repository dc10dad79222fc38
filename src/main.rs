use std::io;
use std::time::Duration;

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use ratatui_image::picker::Picker;

use pluvia::persistence;
use pluvia::tui::app::App;
use pluvia::tui::event::{poll_event, AppEvent};

fn main() -> anyhow::Result<()> {
    // Query terminal for image protocol support BEFORE entering alternate screen
    let picker = Picker::from_query_stdio().ok();

    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run app
    let result = run_app(&mut terminal, picker);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        eprintln!("Error: {}", err);
    }

    Ok(())
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, picker: Option<Picker>) -> anyhow::Result<()> {
    let config = persistence::config::load_config();
    let history = persistence::history::load_history();

    let mut app = App::new(picker, history, config);
    app.bootstrap();

    loop {
        terminal.draw(|frame| app.render(frame))?;

        if let Some(event) = poll_event(Duration::from_millis(50)) {
            match event {
                AppEvent::Key(key) => {
                    app.handle_key(key);
                }
                AppEvent::Resize(_, _) => {
                    // Terminal will auto-redraw
                }
                AppEvent::Tick => {}
            }
        }

        if app.should_quit {
            break;
        }
    }

    // Rewrite the history file with duplicates collapsed and the cap applied
    persistence::history::save_history(&app.input.history, app.config.history_limit);

    Ok(())
}
