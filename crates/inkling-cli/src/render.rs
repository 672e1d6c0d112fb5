//! Plain-text views shared by the command line and the TUI.

use inkling_core::{ItemKind, Profile, ProfileCollection, RuleItem};
use inkling_generate::GenerationResult;

pub const ENTRY_MARKER: &str = "🔵";

pub fn result_lines(result: &GenerationResult) -> Vec<String> {
    let mut lines = vec![format!("{}  {}", result.label(), result.timestamp())];
    if result.is_empty() {
        lines.push("(no categories to draw from)".to_string());
    }
    lines.extend(
        result
            .entries
            .iter()
            .map(|entry| format!("{ENTRY_MARKER} {}: {}", entry.category, entry.text)),
    );
    lines
}

pub fn user_lines(profiles: &ProfileCollection, active: usize) -> Vec<String> {
    profiles
        .profiles()
        .iter()
        .enumerate()
        .map(|(index, profile)| {
            let marker = if index == active { "*" } else { " " };
            format!("{marker} {}. {} ({})", index + 1, profile.name, profile.id)
        })
        .collect()
}

pub fn category_lines(profile: &Profile) -> Vec<String> {
    if profile.data.is_empty() {
        return vec!["(no categories)".to_string()];
    }
    profile
        .data
        .iter()
        .enumerate()
        .map(|(index, category)| {
            let lock = if category.is_protected() { " [protected]" } else { "" };
            format!(
                "{}. {} ({}, {} items){lock}",
                index + 1,
                category.name,
                category.id,
                category.items.len()
            )
        })
        .collect()
}

/// Full rule listing: every category with its numbered items.
pub fn profile_lines(profile: &Profile) -> Vec<String> {
    let mut lines = vec![format!("user: {} ({})", profile.name, profile.id)];
    if profile.data.is_empty() {
        lines.push("(no categories)".to_string());
        return lines;
    }
    for (ci, category) in profile.data.iter().enumerate() {
        let lock = if category.is_protected() { " [protected]" } else { "" };
        lines.push(format!("{}. {}{lock}", ci + 1, category.name));
        if category.items.is_empty() {
            lines.push("   (no items)".to_string());
        }
        for (ii, item) in category.items.iter().enumerate() {
            lines.push(format!("   {}.{} {}", ci + 1, ii + 1, item_summary(item)));
        }
    }
    lines
}

fn item_summary(item: &RuleItem) -> String {
    match &item.kind {
        ItemKind::Fixed => format!("[{}] {}", item.kind.label(), item.template),
        ItemKind::Range { min, max } => {
            format!("[{}] {}  ({min}-{max})", item.kind.label(), item.template)
        }
        ItemKind::List { options } => {
            format!("[{}] {}  ({options})", item.kind.label(), item.template)
        }
    }
}
