//! Core contracts and helpers for Inkling.
//!
//! This crate defines the rule model (profiles, categories, rule items), the
//! built-in rule set, the editing operations, and rule linting shared by the
//! generator and the CLI.

pub mod defaults;
pub mod edit;
pub mod error;
pub mod ids;
pub mod model;
pub mod validation;

pub use defaults::{DEFAULT_PROFILE_ID, DEFAULT_PROFILE_NAME, default_categories, default_collection};
pub use error::{Error, Result};
pub use ids::new_id;
pub use model::{
    Category, ItemKind, ItemKindTag, MANDATORY_NAME_KEYWORD, PLACEHOLDER, PROTECTED_CATEGORY_ID,
    Profile, ProfileCollection, RuleItem, split_options,
};
pub use validation::{RuleIssue, lint_profile};
