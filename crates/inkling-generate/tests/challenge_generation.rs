use chrono::{NaiveDate, NaiveDateTime};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use inkling_core::{Category, ItemKind, Profile, RuleItem, default_collection};
use inkling_generate::{ChallengeEngine, GenerationMode, draw_entries, generate};

fn at(year: i32, month: u32, day: u32, hour: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|date| date.and_hms_opt(hour, 30, 0))
        .expect("valid timestamp")
}

fn default_profile() -> Profile {
    default_collection()
        .get(0)
        .cloned()
        .expect("default profile")
}

fn list_item(id: &str, options: &str) -> RuleItem {
    RuleItem {
        id: id.to_string(),
        template: "使用【】".to_string(),
        kind: ItemKind::List {
            options: options.to_string(),
        },
    }
}

fn category(id: &str, name: &str, items: Vec<RuleItem>) -> Category {
    Category {
        id: id.to_string(),
        name: name.to_string(),
        items,
    }
}

#[test]
fn daily_is_stable_within_a_day() {
    let engine = ChallengeEngine::new();
    let profile = default_profile();

    let morning = engine.run_at(&profile, GenerationMode::Daily, at(2025, 11, 24, 8));
    for hour in 9..12 {
        engine.run_at(&profile, GenerationMode::Random, at(2025, 11, 24, hour));
    }
    let evening = engine.run_at(&profile, GenerationMode::Daily, at(2025, 11, 24, 21));

    assert_eq!(morning.entries, evening.entries);
    assert_eq!(morning.label(), "每日挑战");
    assert_eq!(evening.timestamp(), "2025-11-24 21:30");
}

#[test]
fn daily_matches_across_engines() {
    let profile = default_profile();
    let now = at(2025, 11, 24, 8);
    let first = ChallengeEngine::new().run_at(&profile, GenerationMode::Daily, now);
    let second = ChallengeEngine::new().run_at(&profile, GenerationMode::Daily, now);
    assert_eq!(first.entries, second.entries);
}

#[test]
fn daily_is_stable_while_other_threads_draw_random() {
    let engine = ChallengeEngine::new();
    let profile = default_profile();
    let now = at(2025, 11, 24, 8);
    let expected = ChallengeEngine::new()
        .run_at(&profile, GenerationMode::Daily, now)
        .entries;

    std::thread::scope(|scope| {
        for _ in 0..4 {
            scope.spawn(|| {
                for _ in 0..200 {
                    engine.run_at(&profile, GenerationMode::Random, now);
                }
            });
        }
        for _ in 0..200 {
            let daily = engine.run_at(&profile, GenerationMode::Daily, now);
            assert_eq!(daily.entries, expected);
        }
    });
}

#[test]
fn random_results_diverge() {
    let engine = ChallengeEngine::new();
    let profile = default_profile();
    let now = at(2025, 11, 24, 8);

    let baseline = engine.run_at(&profile, GenerationMode::Random, now);
    let diverged = (0..20).any(|_| {
        engine.run_at(&profile, GenerationMode::Random, now).entries != baseline.entries
    });

    assert!(diverged, "20 random draws all matched the first one");
    assert_eq!(baseline.label(), "随机挑战");
}

#[test]
fn tape_appears_exactly_once_and_first() {
    let profile = default_profile();
    let mut rng = ChaCha8Rng::seed_from_u64(42);

    for _ in 0..200 {
        let entries = draw_entries(&profile, &mut rng);
        assert!((2..=3).contains(&entries.len()), "got {} entries", entries.len());
        assert_eq!(entries[0].category, "胶带");
        let tape_count = entries
            .iter()
            .filter(|entry| entry.category == "胶带")
            .count();
        assert_eq!(tape_count, 1);
    }
}

#[test]
fn categories_are_not_repeated() {
    let profile = default_profile();
    let mut rng = ChaCha8Rng::seed_from_u64(7);

    for _ in 0..200 {
        let entries = draw_entries(&profile, &mut rng);
        let mut names: Vec<&str> = entries.iter().map(|entry| entry.category.as_str()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), entries.len());
    }
}

#[test]
fn identical_categories_are_distinct_slots() {
    let twin = category("dup", "同名", vec![list_item("a", "X")]);
    let profile = Profile {
        id: "user_twins".to_string(),
        name: "twins".to_string(),
        data: vec![
            category("tape", "胶带", vec![list_item("t", "T")]),
            twin.clone(),
            twin,
        ],
    };
    let mut rng = ChaCha8Rng::seed_from_u64(3);

    let saw_both = (0..200).any(|_| draw_entries(&profile, &mut rng).len() == 3);
    assert!(saw_both, "two structurally equal categories were never both selected");
}

#[test]
fn empty_category_consumes_a_slot() {
    let profile = Profile {
        id: "user_empty_tape".to_string(),
        name: "empty tape".to_string(),
        data: vec![
            category("tape", "胶带", Vec::new()),
            category("color", "颜色", vec![list_item("c", "蓝")]),
        ],
    };
    let mut rng = ChaCha8Rng::seed_from_u64(9);

    for _ in 0..50 {
        let entries = draw_entries(&profile, &mut rng);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].category, "颜色");
        assert_eq!(entries[0].text, "使用 **蓝** ");
    }
}

#[test]
fn entry_count_never_exceeds_categories() {
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let single = Profile {
        id: "user_single".to_string(),
        name: "single".to_string(),
        data: vec![category("stamp", "印章", vec![list_item("s", "熊猫")])],
    };

    for _ in 0..50 {
        let result = generate(&single, GenerationMode::Random, &mut rng, at(2025, 1, 1, 0));
        assert_eq!(result.entries.len(), 1);
        assert_eq!(result.entries[0].category, "印章");
    }
}

#[test]
fn empty_profile_yields_empty_result() {
    let profile = Profile {
        id: "user_blank".to_string(),
        name: "blank".to_string(),
        data: Vec::new(),
    };
    let result = ChallengeEngine::new().run_at(&profile, GenerationMode::Daily, at(2025, 1, 1, 0));
    assert!(result.is_empty());
}

#[test]
fn generation_leaves_profile_untouched() {
    let profile = default_profile();
    let before = profile.clone();
    ChallengeEngine::new().run(&profile, GenerationMode::Random);
    assert_eq!(profile, before);
}

#[test]
fn result_serializes_with_snake_case_mode() {
    let profile = default_profile();
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let result = generate(&profile, GenerationMode::Random, &mut rng, at(2024, 6, 1, 8));

    let value = serde_json::to_value(&result).expect("serialize result");

    assert_eq!(value["mode"], "random");
    assert_eq!(value["generated_at"], "2024-06-01T08:30:00");
    assert_eq!(value["entries"][0]["category"], "胶带");
}
