use std::path::Path;

use inkling_core::{ProfileCollection, lint_profile};

use super::profiles::read_profiles;
use super::settings::WorkspaceSettings;
use super::{WorkspacePaths, WorkspaceResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DoctorLevel {
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct DoctorIssue {
    pub level: DoctorLevel,
    pub message: String,
    pub hint: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct DoctorReport {
    pub issues: Vec<DoctorIssue>,
}

impl DoctorReport {
    fn push(&mut self, level: DoctorLevel, message: impl Into<String>, hint: Option<String>) {
        self.issues.push(DoctorIssue {
            level,
            message: message.into(),
            hint,
        });
    }

    pub fn has_errors(&self) -> bool {
        self.issues
            .iter()
            .any(|issue| issue.level == DoctorLevel::Error)
    }
}

pub fn run_doctor(
    paths: &WorkspacePaths,
    settings: &WorkspaceSettings,
    profiles: &ProfileCollection,
) -> WorkspaceResult<DoctorReport> {
    let mut report = DoctorReport::default();

    check_dir(&mut report, &paths.root, "workspace root");
    check_dir(&mut report, &paths.config_dir, "config");
    check_dir(&mut report, &paths.data_dir, "data");
    check_dir(&mut report, &paths.logs_dir, "logs");

    let data_path = paths.profiles_path(&settings.data_file);
    if !data_path.exists() {
        report.push(
            DoctorLevel::Warning,
            format!("{} missing", data_path.display()),
            Some("any edit writes the default rule set".to_string()),
        );
    } else if let Err(err) = read_profiles(&data_path) {
        report.push(
            DoctorLevel::Error,
            format!("{} unreadable: {err}", data_path.display()),
            Some("built-in rules are in use; the file is copied to .bak before it is replaced".to_string()),
        );
    }

    match &settings.active_profile {
        None => report.push(
            DoctorLevel::Warning,
            "active user not set",
            Some("use /user use <name>".to_string()),
        ),
        Some(active) if !profiles.profiles().iter().any(|profile| &profile.id == active) => {
            report.push(
                DoctorLevel::Error,
                format!("active user '{active}' not found"),
                Some("use /user list to pick another one".to_string()),
            )
        }
        Some(_) => {}
    }

    for profile in profiles.profiles() {
        for issue in lint_profile(profile) {
            report.push(
                DoctorLevel::Warning,
                format!("[{}] {}: {}", issue.code, issue.path, issue.message),
                None,
            );
        }
    }

    Ok(report)
}

fn check_dir(report: &mut DoctorReport, path: &Path, label: &str) {
    if !path.exists() {
        report.push(
            DoctorLevel::Error,
            format!("{label} directory missing"),
            Some(format!("create {}", path.display())),
        );
    }
}
