use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDateTime};
use clap::{Subcommand, ValueEnum};
use tracing::{info, warn};

use inkling_core::{Error as CoreError, ItemKindTag, Profile, ProfileCollection};
use inkling_generate::{ChallengeEngine, GenerationMode, GenerationResult};

use crate::CliError;
use crate::render::{category_lines, profile_lines, result_lines, user_lines};
use crate::workspace::{
    DoctorLevel, ProfilesSource, WorkspacePaths, WorkspaceSettings, load_or_create_profiles,
    load_or_create_settings, run_doctor, save_profiles, save_settings,
};

/// Commands that act on the open workspace, shared by the CLI and `/` in the TUI.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    /// Draw today's challenge (same for the whole day).
    Daily,
    /// Draw a fresh random challenge.
    Random,
    /// List the active user's categories and items.
    Show,
    /// Manage users.
    #[command(subcommand)]
    User(UserCommand),
    /// Manage categories of the active user.
    #[command(subcommand)]
    Category(CategoryCommand),
    /// Manage rule items of the active user.
    #[command(subcommand)]
    Item(ItemCommand),
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum UserCommand {
    /// List users.
    List,
    /// Create a user with the default rules and switch to it.
    Add {
        #[arg(required = true, num_args = 1..)]
        name: Vec<String>,
    },
    /// Switch to a user by id, name or number.
    Use { reference: String },
    /// Rename the active user.
    Rename {
        #[arg(required = true, num_args = 1..)]
        name: Vec<String>,
    },
    /// Delete the active user.
    Delete,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum CategoryCommand {
    /// List categories.
    List,
    /// Append a new category.
    Add,
    /// Rename a category.
    Rename {
        #[arg(value_parser = parse_position)]
        category: usize,
        #[arg(required = true, num_args = 1..)]
        name: Vec<String>,
    },
    /// Delete a category.
    Delete {
        #[arg(value_parser = parse_position)]
        category: usize,
    },
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum ItemCommand {
    /// Append a list item to a category.
    Add {
        #[arg(value_parser = parse_position)]
        category: usize,
    },
    /// Replace an item's template (use 【】 for the drawn value).
    Template {
        #[arg(value_parser = parse_position)]
        category: usize,
        #[arg(value_parser = parse_position)]
        item: usize,
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },
    /// Switch an item's kind; fields reset to defaults.
    Type {
        #[arg(value_parser = parse_position)]
        category: usize,
        #[arg(value_parser = parse_position)]
        item: usize,
        kind: KindArg,
    },
    /// Set the options of a list item (comma separated).
    Options {
        #[arg(value_parser = parse_position)]
        category: usize,
        #[arg(value_parser = parse_position)]
        item: usize,
        #[arg(num_args = 0..)]
        options: Vec<String>,
    },
    /// Set the bounds of a range item.
    #[command(allow_negative_numbers = true)]
    Range {
        #[arg(value_parser = parse_position)]
        category: usize,
        #[arg(value_parser = parse_position)]
        item: usize,
        min: i64,
        max: i64,
    },
    /// Delete an item.
    Delete {
        #[arg(value_parser = parse_position)]
        category: usize,
        #[arg(value_parser = parse_position)]
        item: usize,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum KindArg {
    Fixed,
    Range,
    List,
}

impl From<KindArg> for ItemKindTag {
    fn from(value: KindArg) -> Self {
        match value {
            KindArg::Fixed => ItemKindTag::Fixed,
            KindArg::Range => ItemKindTag::Range,
            KindArg::List => ItemKindTag::List,
        }
    }
}

/// Parse a 1-based position as shown in listings into a 0-based index.
fn parse_position(raw: &str) -> Result<usize, String> {
    match raw.trim().parse::<usize>() {
        Ok(0) => Err("positions start at 1".to_string()),
        Ok(number) => Ok(number - 1),
        Err(_) => Err(format!("'{raw}' is not a position")),
    }
}

/// Open workspace state: rules on disk, the active user and the last result.
pub struct Session {
    paths: WorkspacePaths,
    settings: WorkspaceSettings,
    profiles: ProfileCollection,
    active: usize,
    engine: ChallengeEngine,
    result: Option<GenerationResult>,
    source: ProfilesSource,
}

impl Session {
    pub fn open(root: PathBuf) -> Result<Self, CliError> {
        let paths = WorkspacePaths::new(root);
        paths.ensure_dirs()?;
        let mut settings = load_or_create_settings(&paths)?;
        let (profiles, source) = load_or_create_profiles(&paths, &settings)?;

        let stored = settings.active_profile.as_deref().and_then(|id| {
            profiles
                .profiles()
                .iter()
                .position(|profile| profile.id == id)
        });
        let active = stored.unwrap_or(0);
        if stored.is_none() {
            if let Some(id) = &settings.active_profile {
                warn!(profile = %id, "active profile missing, using the first one");
            }
            settings.active_profile = profiles.get(active).map(|profile| profile.id.clone());
            save_settings(&paths, &settings)?;
        }

        Ok(Self {
            paths,
            settings,
            profiles,
            active,
            engine: ChallengeEngine::new(),
            result: None,
            source,
        })
    }

    pub fn paths(&self) -> &WorkspacePaths {
        &self.paths
    }

    pub fn profiles(&self) -> &ProfileCollection {
        &self.profiles
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    pub fn active_profile(&self) -> Result<&Profile, CliError> {
        self.profiles
            .get(self.active)
            .ok_or_else(|| CoreError::NotFound(format!("profile #{}", self.active + 1)).into())
    }

    pub fn result(&self) -> Option<&GenerationResult> {
        self.result.as_ref()
    }

    /// Set when the data file was unusable and defaults are in memory: the
    /// parse failure and where the unreadable file was copied.
    pub fn recovery_note(&self) -> Option<(&str, &Path)> {
        match &self.source {
            ProfilesSource::Recovered { reason, backup } => Some((reason, backup)),
            ProfilesSource::Loaded | ProfilesSource::Created => None,
        }
    }

    pub fn execute(&mut self, command: SessionCommand) -> Result<Vec<String>, CliError> {
        let outcome = match command {
            SessionCommand::Daily => self.generate(GenerationMode::Daily),
            SessionCommand::Random => self.generate(GenerationMode::Random),
            SessionCommand::Show => self.active_profile().map(profile_lines),
            SessionCommand::User(command) => self.user(command),
            SessionCommand::Category(command) => self.category(command),
            SessionCommand::Item(command) => self.item(command),
        };
        if let Err(err) = &outcome {
            warn!(error = %err, "command rejected");
        }
        outcome
    }

    pub fn generate(&mut self, mode: GenerationMode) -> Result<Vec<String>, CliError> {
        self.generate_at(mode, Local::now().naive_local())
    }

    pub fn generate_at(
        &mut self,
        mode: GenerationMode,
        now: NaiveDateTime,
    ) -> Result<Vec<String>, CliError> {
        let result = self.engine.run_at(self.active_profile()?, mode, now);
        let lines = result_lines(&result);
        self.result = Some(result);
        Ok(lines)
    }

    pub fn doctor(&self) -> Result<(Vec<String>, bool), CliError> {
        let report = run_doctor(&self.paths, &self.settings, &self.profiles)?;
        if report.issues.is_empty() {
            return Ok((vec!["doctor: no issues found".to_string()], false));
        }
        let mut lines = Vec::new();
        for issue in &report.issues {
            let level = match issue.level {
                DoctorLevel::Warning => "warning",
                DoctorLevel::Error => "error",
            };
            lines.push(format!("{level}: {}", issue.message));
            if let Some(hint) = &issue.hint {
                lines.push(format!("  hint: {hint}"));
            }
        }
        Ok((lines, report.has_errors()))
    }

    fn user(&mut self, command: UserCommand) -> Result<Vec<String>, CliError> {
        match command {
            UserCommand::List => Ok(user_lines(&self.profiles, self.active)),
            UserCommand::Add { name } => {
                let index = self.profiles.add_profile(&name.join(" "))?;
                self.save_profiles()?;
                self.switch_to(index)?;
                let profile = self.active_profile()?;
                Ok(vec![format!("added user {} ({})", profile.name, profile.id)])
            }
            UserCommand::Use { reference } => {
                let index = self.profiles.resolve_ref(&reference)?;
                self.switch_to(index)?;
                Ok(vec![format!("switched to {}", self.active_profile()?.name)])
            }
            UserCommand::Rename { name } => {
                let name = name.join(" ");
                self.profiles.rename_profile(self.active, &name)?;
                self.save_profiles()?;
                Ok(vec![format!("user renamed to {name}")])
            }
            UserCommand::Delete => {
                let removed = self.profiles.remove_profile(self.active)?;
                self.save_profiles()?;
                self.switch_to(0)?;
                Ok(vec![
                    format!("deleted user {}", removed.name),
                    format!("switched to {}", self.active_profile()?.name),
                ])
            }
        }
    }

    fn category(&mut self, command: CategoryCommand) -> Result<Vec<String>, CliError> {
        let profile = self.active_profile_mut()?;
        let message = match command {
            CategoryCommand::List => return Ok(category_lines(profile)),
            CategoryCommand::Add => {
                let index = profile.add_category();
                format!("added category #{}", index + 1)
            }
            CategoryCommand::Rename { category, name } => {
                let name = name.join(" ");
                profile.rename_category(category, &name)?;
                format!("category #{} renamed to {name}", category + 1)
            }
            CategoryCommand::Delete { category } => {
                let removed = profile.remove_category(category)?;
                format!("deleted category {}", removed.name)
            }
        };
        self.save_profiles()?;
        Ok(vec![message])
    }

    fn item(&mut self, command: ItemCommand) -> Result<Vec<String>, CliError> {
        let profile = self.active_profile_mut()?;
        let message = match command {
            ItemCommand::Add { category } => {
                let index = profile.add_item(category)?;
                format!("added item #{}.{}", category + 1, index + 1)
            }
            ItemCommand::Template {
                category,
                item,
                text,
            } => {
                profile.set_template(category, item, &text.join(" "))?;
                format!("item #{}.{} template updated", category + 1, item + 1)
            }
            ItemCommand::Type {
                category,
                item,
                kind,
            } => {
                let tag = ItemKindTag::from(kind);
                if !profile.set_item_kind(category, item, tag)? {
                    return Ok(vec![format!(
                        "item #{}.{} is already {}",
                        category + 1,
                        item + 1,
                        tag.as_str()
                    )]);
                }
                format!("item #{}.{} is now {}", category + 1, item + 1, tag.as_str())
            }
            ItemCommand::Options {
                category,
                item,
                options,
            } => {
                profile.set_options(category, item, &options.join(" "))?;
                format!("item #{}.{} options updated", category + 1, item + 1)
            }
            ItemCommand::Range {
                category,
                item,
                min,
                max,
            } => {
                profile.set_range(category, item, min, max)?;
                format!("item #{}.{} range set to {min}-{max}", category + 1, item + 1)
            }
            ItemCommand::Delete { category, item } => {
                profile.remove_item(category, item)?;
                format!("deleted item #{}.{}", category + 1, item + 1)
            }
        };
        self.save_profiles()?;
        Ok(vec![message])
    }

    fn active_profile_mut(&mut self) -> Result<&mut Profile, CliError> {
        let active = self.active;
        self.profiles
            .get_mut(active)
            .ok_or_else(|| CoreError::NotFound(format!("profile #{}", active + 1)).into())
    }

    fn switch_to(&mut self, index: usize) -> Result<(), CliError> {
        let id = self.profiles.get(index).map(|profile| profile.id.clone());
        if id.is_none() {
            return Err(CoreError::NotFound(format!("profile #{}", index + 1)).into());
        }
        self.active = index;
        self.result = None;
        self.settings.active_profile = id;
        save_settings(&self.paths, &self.settings)?;
        info!(profile = ?self.settings.active_profile, "active profile changed");
        Ok(())
    }

    fn save_profiles(&mut self) -> Result<(), CliError> {
        save_profiles(&self.paths, &self.settings, &self.profiles)?;
        self.source = ProfilesSource::Loaded;
        Ok(())
    }
}
