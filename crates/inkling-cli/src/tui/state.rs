use crate::session::Session;

pub const MAX_MESSAGES: usize = 1000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaletteEntry {
    pub command: &'static str,
    pub description: &'static str,
}

pub struct App {
    pub session: Session,
    pub input: String,
    pub messages: Vec<String>,
    pub should_quit: bool,
    pub scroll_offset: u16,
    pub palette_select: usize,
}

impl App {
    pub fn new(session: Session) -> Self {
        let mut app = Self {
            session,
            input: String::new(),
            messages: Vec::new(),
            should_quit: false,
            scroll_offset: 0,
            palette_select: 0,
        };
        let note = app
            .session
            .recovery_note()
            .map(|(reason, backup)| (reason.to_string(), backup.display().to_string()));
        if let Some((reason, backup)) = note {
            app.push_message(format!("warning: rules file unreadable ({reason})"));
            app.push_message(format!("a copy was kept at {backup}; built-in rules are loaded."));
        }
        app
    }

    pub fn push_message(&mut self, message: impl Into<String>) {
        self.messages.push(message.into());
        if self.messages.len() > MAX_MESSAGES {
            let overflow = self.messages.len() - MAX_MESSAGES;
            self.messages.drain(0..overflow);
        }
    }

    pub fn push_lines(&mut self, lines: Vec<String>) {
        for line in lines {
            self.push_message(line);
        }
    }

    pub fn record_command(&mut self, command: &str) {
        if !self.messages.is_empty() {
            self.push_message("");
        }
        self.push_message(format!("► {command}"));
    }

    pub fn user_display(&self) -> String {
        match self.session.active_profile() {
            Ok(profile) => format!("{} ({})", profile.name, profile.id),
            Err(_) => "none".to_string(),
        }
    }
}
