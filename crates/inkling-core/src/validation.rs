use crate::model::{ItemKind, Profile, split_options};

/// Rule that still generates, but probably not the way the user meant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleIssue {
    pub code: &'static str,
    pub path: String,
    pub message: String,
}

/// Lint a profile's rules.
///
/// This reports:
/// - profiles without categories
/// - missing protected category
/// - categories without items (selected but invisible)
/// - range items with `min > max`
/// - list items without usable options
/// - variable items whose template has no placeholder
pub fn lint_profile(profile: &Profile) -> Vec<RuleIssue> {
    let mut issues = Vec::new();

    if profile.data.is_empty() {
        issues.push(RuleIssue {
            code: "no_categories",
            path: profile.name.clone(),
            message: "profile has no categories; challenges will be empty".to_string(),
        });
        return issues;
    }

    if !profile.data.iter().any(|category| category.is_protected()) {
        let fallback = profile
            .mandatory_index()
            .and_then(|index| profile.data.get(index))
            .map(|category| category.name.as_str())
            .unwrap_or_default();
        issues.push(RuleIssue {
            code: "no_protected_category",
            path: profile.name.clone(),
            message: format!("no 'tape' category; '{fallback}' is used as mandatory"),
        });
    }

    for (category_index, category) in profile.data.iter().enumerate() {
        let category_path = format!("{}/{}", profile.name, category_index + 1);
        if category.items.is_empty() {
            issues.push(RuleIssue {
                code: "empty_category",
                path: category_path.clone(),
                message: format!("category '{}' has no items", category.name),
            });
        }

        for (item_index, item) in category.items.iter().enumerate() {
            let path = format!("{category_path}/{}", item_index + 1);
            match &item.kind {
                ItemKind::Range { min, max } if min > max => issues.push(RuleIssue {
                    code: "inverted_range",
                    path: path.clone(),
                    message: format!("range {min}..{max} is inverted; {min} is always used"),
                }),
                ItemKind::List { options } if split_options(options).is_empty() => {
                    issues.push(RuleIssue {
                        code: "empty_options",
                        path: path.clone(),
                        message: "list has no options; resolves to ???".to_string(),
                    })
                }
                _ => {}
            }

            if !matches!(item.kind, ItemKind::Fixed) && !item.has_placeholder() {
                issues.push(RuleIssue {
                    code: "missing_placeholder",
                    path,
                    message: format!("template '{}' has no 【】 marker", item.template),
                });
            }
        }
    }

    issues
}
