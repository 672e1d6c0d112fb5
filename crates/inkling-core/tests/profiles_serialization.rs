use inkling_core::{ItemKind, Profile, ProfileCollection, RuleItem, default_collection};

#[test]
fn serializes_rule_items_flat() {
    let item = RuleItem {
        id: "t1".to_string(),
        template: "使用第【】个分装版".to_string(),
        kind: ItemKind::Range { min: 1, max: 90 },
    };

    let json = serde_json::to_string_pretty(&item).expect("serialize item");
    let expected = r#"{
  "id": "t1",
  "template": "使用第【】个分装版",
  "type": "range",
  "min": 1,
  "max": 90
}"#;
    assert_eq!(json, expected);
}

#[test]
fn reads_legacy_profile_records() {
    let raw = r#"[
  {
    "id": "user_1",
    "name": "默认用户",
    "data": [
      {
        "id": "note",
        "name": "便签",
        "items": [
          {"id": "n1", "template": "本页不使用便签", "type": "fixed", "options": ""},
          {"id": "n2", "template": "至少使用【】张便签", "type": "range", "min": "2", "max": 4.0},
          {"id": "n3", "template": "使用【】便签", "type": "list"},
          {"id": "n4", "template": "第【】页", "type": "range"}
        ]
      }
    ]
  }
]"#;

    let profiles: Vec<Profile> = serde_json::from_str(raw).expect("parse profiles");
    let items = &profiles[0].data[0].items;

    assert_eq!(items[0].kind, ItemKind::Fixed);
    assert_eq!(items[1].kind, ItemKind::Range { min: 2, max: 4 });
    assert_eq!(
        items[2].kind,
        ItemKind::List {
            options: String::new()
        }
    );
    assert_eq!(items[3].kind, ItemKind::Range { min: 1, max: 10 });
}

#[test]
fn unknown_item_type_reads_as_list() {
    let raw = r#"[
  {"id": "x", "template": "掷出【】", "type": "dice", "options": "一,二"},
  {"id": "y", "template": "写下【】", "type": "text"},
  {"id": "z", "template": "无类型", "min": 3}
]"#;

    let items: Vec<RuleItem> = serde_json::from_str(raw).expect("parse items");
    assert_eq!(
        items[0].kind,
        ItemKind::List {
            options: "一,二".to_string()
        }
    );
    assert_eq!(
        items[1].kind,
        ItemKind::List {
            options: String::new()
        }
    );
    assert_eq!(items[2].kind.label(), "list");
    assert_eq!(items[0].template, "掷出【】");

    let json = serde_json::to_value(&items[0]).expect("serialize item");
    assert_eq!(json["type"], "list");
    assert_eq!(json["options"], "一,二");
}

#[test]
fn rejects_non_numeric_range_bounds() {
    let raw = r#"{"id": "r", "template": "t", "type": "range", "min": "many"}"#;
    assert!(serde_json::from_str::<RuleItem>(raw).is_err());
}

#[test]
fn collection_serializes_as_plain_array() {
    let collection = default_collection();
    let value = serde_json::to_value(&collection).expect("serialize collection");
    let profiles = value.as_array().expect("array of profiles");
    assert_eq!(profiles.len(), 1);
    assert_eq!(profiles[0]["id"], "user_1");
    assert_eq!(profiles[0]["data"][1]["id"], "tape");

    let restored: Vec<Profile> = serde_json::from_value(value).expect("parse back");
    let restored = ProfileCollection::from_profiles(restored).expect("non-empty");
    assert_eq!(restored, collection);
}
