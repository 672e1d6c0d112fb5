use clap::{Parser, Subcommand};

use crate::CliError;
use crate::session::SessionCommand;
use crate::tui::state::{App, PaletteEntry};
use crate::tui::utils::split_args;

/// One slash line, parsed with the same definitions as the command line.
#[derive(Parser, Debug)]
#[command(
    name = "inkling",
    no_binary_name = true,
    disable_help_subcommand = true,
    disable_version_flag = true
)]
struct SlashLine {
    #[command(subcommand)]
    command: SlashCommand,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
enum SlashCommand {
    /// Show command list.
    Help,
    /// Quit.
    Exit,
    /// Check the workspace and lint the rules.
    Doctor,
    #[command(flatten)]
    Session(SessionCommand),
}

const PALETTE: &[PaletteEntry] = &[
    PaletteEntry {
        command: "/daily",
        description: "today's challenge",
    },
    PaletteEntry {
        command: "/random",
        description: "random challenge",
    },
    PaletteEntry {
        command: "/show",
        description: "list categories and items",
    },
    PaletteEntry {
        command: "/user list",
        description: "list users",
    },
    PaletteEntry {
        command: "/user add",
        description: "<name> create and switch",
    },
    PaletteEntry {
        command: "/user use",
        description: "<id|name|n> switch user",
    },
    PaletteEntry {
        command: "/user rename",
        description: "<name> rename active user",
    },
    PaletteEntry {
        command: "/user delete",
        description: "delete active user",
    },
    PaletteEntry {
        command: "/category list",
        description: "list categories",
    },
    PaletteEntry {
        command: "/category add",
        description: "append a category",
    },
    PaletteEntry {
        command: "/category rename",
        description: "<c> <name>",
    },
    PaletteEntry {
        command: "/category delete",
        description: "<c>",
    },
    PaletteEntry {
        command: "/item add",
        description: "<c> append a list item",
    },
    PaletteEntry {
        command: "/item template",
        description: "<c> <i> <text with 【】>",
    },
    PaletteEntry {
        command: "/item type",
        description: "<c> <i> fixed|range|list",
    },
    PaletteEntry {
        command: "/item options",
        description: "<c> <i> <a,b,c>",
    },
    PaletteEntry {
        command: "/item range",
        description: "<c> <i> <min> <max>",
    },
    PaletteEntry {
        command: "/item delete",
        description: "<c> <i>",
    },
    PaletteEntry {
        command: "/doctor",
        description: "diagnose workspace",
    },
    PaletteEntry {
        command: "/help",
        description: "show command list",
    },
    PaletteEntry {
        command: "/exit",
        description: "quit",
    },
];

pub fn execute_command(app: &mut App, input: &str) -> Result<(), CliError> {
    let Some(line) = input.strip_prefix('/') else {
        app.push_message("commands start with '/'; try /help");
        return Ok(());
    };

    let args = split_args(line)?;
    let parsed = match SlashLine::try_parse_from(args) {
        Ok(parsed) => parsed,
        Err(err) => {
            app.push_lines(
                err.render()
                    .to_string()
                    .lines()
                    .map(str::to_string)
                    .collect(),
            );
            return Ok(());
        }
    };

    match parsed.command {
        SlashCommand::Help => cmd_help(app),
        SlashCommand::Exit => app.should_quit = true,
        SlashCommand::Doctor => {
            let (lines, _) = app.session.doctor()?;
            app.push_lines(lines);
        }
        SlashCommand::Session(command) => {
            let lines = app.session.execute(command)?;
            app.push_lines(lines);
        }
    }
    Ok(())
}

fn cmd_help(app: &mut App) {
    app.push_message("COMMANDS");
    for entry in PALETTE {
        app.push_message(format!("  {:<18} {}", entry.command, entry.description));
    }
    app.push_message("positions are 1-based as shown by /show; Tab completes, Esc clears.");
}

/// Palette entries whose command starts with what has been typed so far.
pub fn command_palette_matches(input: &str) -> Vec<PaletteEntry> {
    if !input.starts_with('/') {
        return Vec::new();
    }
    PALETTE
        .iter()
        .filter(|entry| {
            entry.command.starts_with(input.trim_end())
                && (entry.command.len() > input.len() || entry.command == input)
        })
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{ItemCommand, UserCommand};

    fn parse(line: &str) -> SlashCommand {
        let args = split_args(line).expect("split");
        SlashLine::try_parse_from(args)
            .expect("parse slash line")
            .command
    }

    #[test]
    fn slash_lines_share_cli_definitions() {
        assert_eq!(parse("daily"), SlashCommand::Session(SessionCommand::Daily));
        assert_eq!(parse("exit"), SlashCommand::Exit);
        assert_eq!(
            parse("user add 小 红"),
            SlashCommand::Session(SessionCommand::User(UserCommand::Add {
                name: vec!["小".to_string(), "红".to_string()],
            }))
        );
        assert_eq!(
            parse("item range 2 1 -3 5"),
            SlashCommand::Session(SessionCommand::Item(ItemCommand::Range {
                category: 1,
                item: 0,
                min: -3,
                max: 5,
            }))
        );
        assert_eq!(
            parse("item template 1 1 \"使用 【】 色系\""),
            SlashCommand::Session(SessionCommand::Item(ItemCommand::Template {
                category: 0,
                item: 0,
                text: vec!["使用 【】 色系".to_string()],
            }))
        );
    }

    #[test]
    fn zero_position_is_rejected() {
        let args = split_args("item delete 0 1").expect("split");
        assert!(SlashLine::try_parse_from(args).is_err());
    }

    #[test]
    fn palette_filters_by_prefix() {
        let commands: Vec<&str> = command_palette_matches("/user")
            .iter()
            .map(|entry| entry.command)
            .collect();
        assert_eq!(
            commands,
            vec!["/user list", "/user add", "/user use", "/user rename", "/user delete"]
        );
        assert!(command_palette_matches("daily").is_empty());
        assert!(command_palette_matches("/user add 小红").is_empty());
    }
}
