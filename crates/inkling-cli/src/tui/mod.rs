pub mod commands;
pub mod events;
pub mod state;
pub mod ui;
pub mod utils;

use std::io;
use std::time::Duration;

use crossterm::{
    event, execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::CliError;
use crate::session::Session;
use events::handle_key;
use state::App;
use ui::draw_ui;

const POLL_INTERVAL: Duration = Duration::from_millis(100);

pub fn run(session: Session) -> Result<(), CliError> {
    let mut app = App::new(session);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, event::EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_loop(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        event::DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn run_loop<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> Result<(), CliError> {
    while !app.should_quit {
        terminal.draw(|frame| draw_ui(frame, app))?;

        if event::poll(POLL_INTERVAL)? {
            match event::read()? {
                event::Event::Key(key) if key.kind == event::KeyEventKind::Press => {
                    handle_key(app, key)
                }
                event::Event::Mouse(mouse) => match mouse.kind {
                    event::MouseEventKind::ScrollDown => {
                        app.scroll_offset = app.scroll_offset.saturating_sub(1);
                    }
                    event::MouseEventKind::ScrollUp => {
                        app.scroll_offset = app.scroll_offset.saturating_add(1);
                    }
                    _ => {}
                },
                _ => {}
            }
        }
    }
    Ok(())
}
