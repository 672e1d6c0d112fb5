//! Built-in rule set every new profile starts from.

use crate::model::{Category, ItemKind, Profile, ProfileCollection, RuleItem};

/// Id of the profile created on first run.
pub const DEFAULT_PROFILE_ID: &str = "user_1";
/// Name of the profile created on first run.
pub const DEFAULT_PROFILE_NAME: &str = "默认用户";

/// Name given to a category added from the editor.
pub const NEW_CATEGORY_NAME: &str = "新栏目";
/// Template given to categories and items added from the editor.
pub const NEW_ITEM_TEMPLATE: &str = "使用【】";
pub const NEW_CATEGORY_OPTIONS: &str = "选项1,选项2";
pub const NEW_ITEM_OPTIONS: &str = "A,B";

/// Collection materialized when nothing usable is on disk.
pub fn default_collection() -> ProfileCollection {
    let profile = Profile {
        id: DEFAULT_PROFILE_ID.to_string(),
        name: DEFAULT_PROFILE_NAME.to_string(),
        data: default_categories(),
    };
    ProfileCollection::single(profile)
}

/// Fresh copy of the built-in categories.
pub fn default_categories() -> Vec<Category> {
    vec![
        category(
            "color",
            "颜色",
            vec![list(
                "c1",
                "使用【】色系",
                "蓝,绿,红,黄,橙,黑,紫,蓝黄,紫黄,蓝红,绿黄,灰,低饱和,荧光,蓝黑,绿黑,黑红,黄黑",
            )],
        ),
        category("tape", "胶带", vec![range("t1", "使用第【】个分装版", 1, 90)]),
        category(
            "release_book",
            "离型本",
            vec![list("r1", "使用【】离型本", "橙色,粉色,白色,小黄,小绿,小红")],
        ),
        category(
            "stamp",
            "印章",
            vec![
                range("s1", "使用【】号印章盒", 1, 16),
                list(
                    "s2",
                    "使用【】印章",
                    "松川,makkey,大宇人,som,青空亭,熊猫,tai,文字",
                ),
            ],
        ),
        category(
            "note",
            "便签",
            vec![
                fixed("n1", "本页不使用便签"),
                range("n2", "至少使用【】张便签", 1, 4),
                list(
                    "n3",
                    "使用【】便签",
                    "古川纸工,表现社,4legs,一笔笺,小方,papier,便签卷",
                ),
            ],
        ),
    ]
}

fn category(id: &str, name: &str, items: Vec<RuleItem>) -> Category {
    Category {
        id: id.to_string(),
        name: name.to_string(),
        items,
    }
}

fn fixed(id: &str, template: &str) -> RuleItem {
    RuleItem {
        id: id.to_string(),
        template: template.to_string(),
        kind: ItemKind::Fixed,
    }
}

fn range(id: &str, template: &str, min: i64, max: i64) -> RuleItem {
    RuleItem {
        id: id.to_string(),
        template: template.to_string(),
        kind: ItemKind::Range { min, max },
    }
}

fn list(id: &str, template: &str, options: &str) -> RuleItem {
    RuleItem {
        id: id.to_string(),
        template: template.to_string(),
        kind: ItemKind::List {
            options: options.to_string(),
        },
    }
}
