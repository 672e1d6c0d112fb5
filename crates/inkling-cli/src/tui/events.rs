use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::tui::commands::{command_palette_matches, execute_command};
use crate::tui::state::App;

pub fn handle_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.should_quit = true;
        }
        KeyCode::Esc => {
            app.input.clear();
            app.palette_select = 0;
        }
        KeyCode::PageUp => {
            app.scroll_offset = app.scroll_offset.saturating_add(5);
        }
        KeyCode::PageDown => {
            app.scroll_offset = app.scroll_offset.saturating_sub(5);
        }
        KeyCode::Down => {
            let matches = command_palette_matches(&app.input);
            if !matches.is_empty() {
                app.palette_select = (app.palette_select + 1).min(matches.len() - 1);
            }
        }
        KeyCode::Up => {
            app.palette_select = app.palette_select.saturating_sub(1);
        }
        KeyCode::Tab => complete_from_palette(app),
        KeyCode::Enter => submit(app),
        KeyCode::Backspace => {
            app.input.pop();
            app.palette_select = 0;
        }
        KeyCode::Char(ch) => {
            if key.modifiers.contains(KeyModifiers::CONTROL) {
                return;
            }
            app.input.push(ch);
            app.palette_select = 0;
        }
        _ => {}
    }
}

fn complete_from_palette(app: &mut App) {
    let matches = command_palette_matches(&app.input);
    if let Some(entry) = matches.get(app.palette_select) {
        app.input = format!("{} ", entry.command);
        app.palette_select = 0;
    }
}

fn submit(app: &mut App) {
    // A bare palette prefix runs the highlighted entry.
    let matches = command_palette_matches(&app.input);
    if let Some(entry) = matches.get(app.palette_select) {
        if !app.input.contains(' ') {
            app.input = entry.command.to_string();
        }
    }

    let input = app.input.drain(..).collect::<String>();
    let input = input.trim();
    if input.is_empty() {
        return;
    }

    app.record_command(input);
    if let Err(err) = execute_command(app, input) {
        app.push_message(format!("error: {err}"));
    }
    app.scroll_offset = 0;
    app.palette_select = 0;
}
