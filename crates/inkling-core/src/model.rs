use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};

/// Id of the category that can never be deleted and always joins a challenge.
pub const PROTECTED_CATEGORY_ID: &str = "tape";
/// Name keyword that also marks a category as mandatory ("tape").
pub const MANDATORY_NAME_KEYWORD: &str = "胶带";
/// Marker replaced by the resolved value inside a template.
pub const PLACEHOLDER: &str = "【】";

const DEFAULT_RANGE_MIN: i64 = 1;
const DEFAULT_RANGE_MAX: i64 = 10;

/// A user's rule set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Profile {
    pub id: String,
    pub name: String,
    /// Categories in display order.
    #[serde(default)]
    pub data: Vec<Category>,
}

/// A named group of rule items sharing a theme.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Category {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub items: Vec<RuleItem>,
}

/// One templated, randomizable prompt definition.
///
/// Reading is lenient: numbers may be strings or floats, missing fields take
/// defaults, and an unrecognized `type` reads as a list item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, JsonSchema)]
pub struct RuleItem {
    pub id: String,
    pub template: String,
    #[serde(flatten)]
    pub kind: ItemKind,
}

/// Randomization strategy of a rule item, tagged by `type` on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, JsonSchema)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ItemKind {
    /// No variable content.
    Fixed,
    /// Integer drawn from the closed interval `[min, max]`.
    Range { min: i64, max: i64 },
    /// One phrase picked from a comma separated list.
    List { options: String },
}

/// Kind selector used by the editor when switching an item's strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKindTag {
    Fixed,
    Range,
    List,
}

impl ItemKind {
    pub fn tag(&self) -> ItemKindTag {
        match self {
            ItemKind::Fixed => ItemKindTag::Fixed,
            ItemKind::Range { .. } => ItemKindTag::Range,
            ItemKind::List { .. } => ItemKindTag::List,
        }
    }

    pub fn label(&self) -> &'static str {
        self.tag().as_str()
    }

    /// Fresh fields for an item switched to `tag`.
    pub fn reset(tag: ItemKindTag) -> Self {
        match tag {
            ItemKindTag::Fixed => ItemKind::Fixed,
            ItemKindTag::Range => ItemKind::Range {
                min: DEFAULT_RANGE_MIN,
                max: DEFAULT_RANGE_MAX,
            },
            ItemKindTag::List => ItemKind::List {
                options: String::new(),
            },
        }
    }
}

impl ItemKindTag {
    pub fn as_str(self) -> &'static str {
        match self {
            ItemKindTag::Fixed => "fixed",
            ItemKindTag::Range => "range",
            ItemKindTag::List => "list",
        }
    }
}

impl RuleItem {
    pub fn has_placeholder(&self) -> bool {
        self.template.contains(PLACEHOLDER)
    }
}

impl Category {
    pub fn is_protected(&self) -> bool {
        self.id == PROTECTED_CATEGORY_ID
    }
}

impl Profile {
    /// Index of the category that joins every challenge.
    ///
    /// The first category with the protected id or whose name mentions tape
    /// wins; otherwise the first category. `None` only for an empty profile.
    pub fn mandatory_index(&self) -> Option<usize> {
        self.data
            .iter()
            .position(|category| {
                category.is_protected() || category.name.contains(MANDATORY_NAME_KEYWORD)
            })
            .or_else(|| (!self.data.is_empty()).then_some(0))
    }
}

/// Ordered, non-empty set of profiles; the unit of persistence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, JsonSchema)]
#[serde(transparent)]
pub struct ProfileCollection {
    profiles: Vec<Profile>,
}

impl ProfileCollection {
    /// Wraps `profiles`, or `None` when there is nothing to wrap.
    pub fn from_profiles(profiles: Vec<Profile>) -> Option<Self> {
        if profiles.is_empty() {
            None
        } else {
            Some(Self { profiles })
        }
    }

    pub fn single(profile: Profile) -> Self {
        Self {
            profiles: vec![profile],
        }
    }

    pub fn profiles(&self) -> &[Profile] {
        &self.profiles
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Profile> {
        self.profiles.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Profile> {
        self.profiles.get_mut(index)
    }

    pub(crate) fn profiles_mut(&mut self) -> &mut Vec<Profile> {
        &mut self.profiles
    }
}

/// Split a list item's raw options on ASCII and full-width commas.
///
/// Entries are trimmed and empty entries dropped.
pub fn split_options(raw: &str) -> Vec<&str> {
    raw.split([',', '，'])
        .map(str::trim)
        .filter(|option| !option.is_empty())
        .collect()
}

/// On-disk item before its kind is decided. Any tag other than `fixed` or
/// `range` reads as a list.
#[derive(Deserialize)]
struct RawRuleItem {
    id: String,
    template: String,
    #[serde(default, rename = "type")]
    tag: String,
    #[serde(default, deserialize_with = "coerce_opt_i64")]
    min: Option<i64>,
    #[serde(default, deserialize_with = "coerce_opt_i64")]
    max: Option<i64>,
    #[serde(default)]
    options: Option<String>,
}

impl From<RawRuleItem> for RuleItem {
    fn from(raw: RawRuleItem) -> Self {
        let kind = match raw.tag.as_str() {
            "fixed" => ItemKind::Fixed,
            "range" => ItemKind::Range {
                min: raw.min.unwrap_or(DEFAULT_RANGE_MIN),
                max: raw.max.unwrap_or(DEFAULT_RANGE_MAX),
            },
            _ => ItemKind::List {
                options: raw.options.unwrap_or_default(),
            },
        };
        Self {
            id: raw.id,
            template: raw.template,
            kind,
        }
    }
}

impl<'de> Deserialize<'de> for RuleItem {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        RawRuleItem::deserialize(deserializer).map(RuleItem::from)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LooseNumber {
    Int(i64),
    Float(f64),
    Text(String),
}

fn coerce_opt_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<LooseNumber>::deserialize(deserializer)?
        .map(LooseNumber::into_i64)
        .transpose()
}

impl LooseNumber {
    fn into_i64<E: serde::de::Error>(self) -> Result<i64, E> {
        match self {
            LooseNumber::Int(value) => Ok(value),
            LooseNumber::Float(value) => Ok(value as i64),
            LooseNumber::Text(value) => {
                let trimmed = value.trim();
                trimmed
                    .parse::<i64>()
                    .or_else(|_| trimmed.parse::<f64>().map(|number| number as i64))
                    .map_err(|_| E::custom(format!("expected a number, got '{value}'")))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn category(id: &str, name: &str) -> Category {
        Category {
            id: id.to_string(),
            name: name.to_string(),
            items: Vec::new(),
        }
    }

    fn profile_with(categories: Vec<Category>) -> Profile {
        Profile {
            id: "user_test".to_string(),
            name: "test".to_string(),
            data: categories,
        }
    }

    #[test]
    fn split_options_accepts_both_commas() {
        assert_eq!(split_options(" A,B ，C,, ，"), vec!["A", "B", "C"]);
        assert!(split_options(" , ，").is_empty());
    }

    #[test]
    fn mandatory_prefers_protected_id() {
        let profile = profile_with(vec![category("color", "颜色"), category("tape", "Tape")]);
        assert_eq!(profile.mandatory_index(), Some(1));
    }

    #[test]
    fn mandatory_matches_name_keyword() {
        let profile = profile_with(vec![category("a", "颜色"), category("b", "和纸胶带")]);
        assert_eq!(profile.mandatory_index(), Some(1));
    }

    #[test]
    fn mandatory_falls_back_to_first() {
        let profile = profile_with(vec![category("a", "颜色"), category("b", "印章")]);
        assert_eq!(profile.mandatory_index(), Some(0));
        assert_eq!(profile_with(Vec::new()).mandatory_index(), None);
    }

    #[test]
    fn kind_reset_uses_default_bounds() {
        assert_eq!(
            ItemKind::reset(ItemKindTag::Range),
            ItemKind::Range { min: 1, max: 10 }
        );
        assert_eq!(
            ItemKind::reset(ItemKindTag::List),
            ItemKind::List {
                options: String::new()
            }
        );
    }

    #[test]
    fn empty_collection_is_rejected() {
        assert!(ProfileCollection::from_profiles(Vec::new()).is_none());
    }
}
