//! Mutations driven by the editing UI.
//!
//! Indices are 0-based. Every operation either applies fully or leaves the
//! target untouched; persisting the result is the caller's job.

use crate::defaults::{
    NEW_CATEGORY_NAME, NEW_CATEGORY_OPTIONS, NEW_ITEM_OPTIONS, NEW_ITEM_TEMPLATE,
    default_categories,
};
use crate::error::{Error, Result};
use crate::ids::new_id;
use crate::model::{Category, ItemKind, ItemKindTag, Profile, ProfileCollection, RuleItem};

impl ProfileCollection {
    /// Append a profile seeded with the default rule set; returns its index.
    pub fn add_profile(&mut self, name: &str) -> Result<usize> {
        let name = name.trim();
        if name.is_empty() {
            return Err(Error::EmptyName);
        }
        self.profiles_mut().push(Profile {
            id: new_id("user"),
            name: name.to_string(),
            data: default_categories(),
        });
        Ok(self.len() - 1)
    }

    pub fn rename_profile(&mut self, index: usize, name: &str) -> Result<()> {
        let profile = self
            .get_mut(index)
            .ok_or_else(|| Error::NotFound(format!("profile #{}", index + 1)))?;
        profile.name = name.to_string();
        Ok(())
    }

    /// Remove a profile. The last remaining profile cannot be removed.
    pub fn remove_profile(&mut self, index: usize) -> Result<Profile> {
        if index >= self.len() {
            return Err(Error::NotFound(format!("profile #{}", index + 1)));
        }
        if self.len() == 1 {
            return Err(Error::LastProfile);
        }
        Ok(self.profiles_mut().remove(index))
    }

    /// Find a profile by id, exact name, or 1-based position.
    pub fn resolve_ref(&self, reference: &str) -> Result<usize> {
        let reference = reference.trim();
        if let Some(index) = self
            .profiles()
            .iter()
            .position(|profile| profile.id == reference)
            .or_else(|| {
                self.profiles()
                    .iter()
                    .position(|profile| profile.name == reference)
            })
        {
            return Ok(index);
        }
        match reference.parse::<usize>() {
            Ok(number) if (1..=self.len()).contains(&number) => Ok(number - 1),
            _ => Err(Error::NotFound(format!("profile '{reference}'"))),
        }
    }
}

impl Profile {
    /// Append a new category with one starter list item; returns its index.
    pub fn add_category(&mut self) -> usize {
        self.data.push(Category {
            id: new_id("cat"),
            name: NEW_CATEGORY_NAME.to_string(),
            items: vec![RuleItem {
                id: new_id("item"),
                template: NEW_ITEM_TEMPLATE.to_string(),
                kind: ItemKind::List {
                    options: NEW_CATEGORY_OPTIONS.to_string(),
                },
            }],
        });
        self.data.len() - 1
    }

    pub fn rename_category(&mut self, category: usize, name: &str) -> Result<()> {
        self.category_mut(category)?.name = name.to_string();
        Ok(())
    }

    /// Remove a category unless it is the protected one.
    pub fn remove_category(&mut self, category: usize) -> Result<Category> {
        let target = self.category_mut(category)?;
        if target.is_protected() {
            return Err(Error::ProtectedCategory(target.name.clone()));
        }
        Ok(self.data.remove(category))
    }

    /// Append a starter list item to a category; returns its index.
    pub fn add_item(&mut self, category: usize) -> Result<usize> {
        let target = self.category_mut(category)?;
        target.items.push(RuleItem {
            id: new_id("item"),
            template: NEW_ITEM_TEMPLATE.to_string(),
            kind: ItemKind::List {
                options: NEW_ITEM_OPTIONS.to_string(),
            },
        });
        Ok(target.items.len() - 1)
    }

    pub fn set_template(&mut self, category: usize, item: usize, template: &str) -> Result<()> {
        self.item_mut(category, item)?.template = template.to_string();
        Ok(())
    }

    /// Switch an item's kind, resetting its kind-specific fields.
    ///
    /// Returns `false` when the item already had that kind.
    pub fn set_item_kind(&mut self, category: usize, item: usize, tag: ItemKindTag) -> Result<bool> {
        let target = self.item_mut(category, item)?;
        if target.kind.tag() == tag {
            return Ok(false);
        }
        target.kind = ItemKind::reset(tag);
        Ok(true)
    }

    pub fn set_options(&mut self, category: usize, item: usize, options: &str) -> Result<()> {
        let target = self.item_mut(category, item)?;
        match &mut target.kind {
            ItemKind::List { options: current } => {
                *current = options.to_string();
                Ok(())
            }
            other => Err(Error::KindMismatch {
                expected: ItemKindTag::List.as_str(),
                found: other.label(),
            }),
        }
    }

    pub fn set_range(&mut self, category: usize, item: usize, min: i64, max: i64) -> Result<()> {
        let target = self.item_mut(category, item)?;
        match &mut target.kind {
            ItemKind::Range {
                min: current_min,
                max: current_max,
            } => {
                *current_min = min;
                *current_max = max;
                Ok(())
            }
            other => Err(Error::KindMismatch {
                expected: ItemKindTag::Range.as_str(),
                found: other.label(),
            }),
        }
    }

    pub fn remove_item(&mut self, category: usize, item: usize) -> Result<RuleItem> {
        let target = self.category_mut(category)?;
        if item >= target.items.len() {
            return Err(Error::NotFound(format!(
                "item #{} in '{}'",
                item + 1,
                target.name
            )));
        }
        Ok(target.items.remove(item))
    }

    fn category_mut(&mut self, category: usize) -> Result<&mut Category> {
        self.data
            .get_mut(category)
            .ok_or_else(|| Error::NotFound(format!("category #{}", category + 1)))
    }

    fn item_mut(&mut self, category: usize, item: usize) -> Result<&mut RuleItem> {
        let target = self.category_mut(category)?;
        let name = target.name.clone();
        target
            .items
            .get_mut(item)
            .ok_or_else(|| Error::NotFound(format!("item #{} in '{}'", item + 1, name)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defaults::default_collection;

    fn tape_index(profile: &Profile) -> usize {
        profile
            .data
            .iter()
            .position(|category| category.id == "tape")
            .expect("default data has tape")
    }

    #[test]
    fn protected_category_is_not_removed() {
        let mut collection = default_collection();
        let profile = collection.get_mut(0).expect("profile");
        let before = profile.data.len();
        let tape = tape_index(profile);

        let result = profile.remove_category(tape);

        assert!(matches!(result, Err(Error::ProtectedCategory(_))));
        assert_eq!(profile.data.len(), before);
    }

    #[test]
    fn other_categories_can_be_removed() {
        let mut collection = default_collection();
        let profile = collection.get_mut(0).expect("profile");
        let removed = profile.remove_category(0).expect("remove color");
        assert_eq!(removed.id, "color");
        assert_eq!(profile.data.len(), 4);
    }

    #[test]
    fn last_profile_is_kept() {
        let mut collection = default_collection();
        let result = collection.remove_profile(0);
        assert!(matches!(result, Err(Error::LastProfile)));
        assert_eq!(collection.len(), 1);
    }

    #[test]
    fn added_profile_can_be_removed() {
        let mut collection = default_collection();
        let index = collection.add_profile("小明").expect("add profile");
        assert_eq!(index, 1);
        assert!(collection.get(1).expect("new").id.starts_with("user_"));
        collection.remove_profile(0).expect("remove first");
        assert_eq!(collection.len(), 1);
        assert_eq!(collection.get(0).expect("remaining").name, "小明");
    }

    #[test]
    fn blank_profile_name_is_rejected() {
        let mut collection = default_collection();
        assert!(matches!(collection.add_profile("  "), Err(Error::EmptyName)));
    }

    #[test]
    fn resolve_ref_accepts_id_name_and_position() {
        let mut collection = default_collection();
        collection.add_profile("second").expect("add");
        assert_eq!(collection.resolve_ref("user_1").expect("by id"), 0);
        assert_eq!(collection.resolve_ref("second").expect("by name"), 1);
        assert_eq!(collection.resolve_ref("2").expect("by position"), 1);
        assert!(collection.resolve_ref("3").is_err());
    }

    #[test]
    fn switching_kind_resets_fields() {
        let mut collection = default_collection();
        let profile = collection.get_mut(0).expect("profile");
        let tape = tape_index(profile);

        assert!(
            profile
                .set_item_kind(tape, 0, ItemKindTag::List)
                .expect("switch to list")
        );
        assert_eq!(
            profile.data[tape].items[0].kind,
            ItemKind::List {
                options: String::new()
            }
        );

        assert!(
            profile
                .set_item_kind(tape, 0, ItemKindTag::Range)
                .expect("switch to range")
        );
        assert_eq!(
            profile.data[tape].items[0].kind,
            ItemKind::Range { min: 1, max: 10 }
        );
        assert!(
            !profile
                .set_item_kind(tape, 0, ItemKindTag::Range)
                .expect("same kind")
        );
    }

    #[test]
    fn options_edit_requires_list_item() {
        let mut collection = default_collection();
        let profile = collection.get_mut(0).expect("profile");
        let tape = tape_index(profile);

        let result = profile.set_options(tape, 0, "A,B");
        assert!(matches!(
            result,
            Err(Error::KindMismatch {
                expected: "list",
                found: "range"
            })
        ));
        profile.set_range(tape, 0, 5, 6).expect("set range");
        assert_eq!(
            profile.data[tape].items[0].kind,
            ItemKind::Range { min: 5, max: 6 }
        );
    }

    #[test]
    fn new_category_and_item_use_starter_content() {
        let mut collection = default_collection();
        let profile = collection.get_mut(0).expect("profile");
        let category = profile.add_category();
        let item = profile.add_item(category).expect("add item");

        let added = &profile.data[category];
        assert_eq!(added.name, NEW_CATEGORY_NAME);
        assert_eq!(added.items.len(), 2);
        assert_eq!(added.items[item].template, NEW_ITEM_TEMPLATE);
        assert_eq!(
            added.items[item].kind,
            ItemKind::List {
                options: "A,B".to_string()
            }
        );

        profile.remove_item(category, 0).expect("remove item");
        assert_eq!(profile.data[category].items.len(), 1);
        assert!(profile.remove_item(category, 5).is_err());
    }
}
