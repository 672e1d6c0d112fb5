use chrono::{Local, NaiveDateTime};
use rand::Rng;
use rand::seq::IndexedRandom;
use rand::seq::index;
use tracing::{debug, info};

use inkling_core::Profile;

use crate::model::{ChallengeEntry, GenerationMode, GenerationResult};
use crate::resolve::resolve_item;
use crate::seeding::RandomSource;

/// Smallest and largest number of categories drawn next to the mandatory one.
const EXTRA_CATEGORIES: std::ops::RangeInclusive<usize> = 1..=2;

/// Entry point for drawing challenges with the shared seeding policy.
#[derive(Debug, Default)]
pub struct ChallengeEngine {
    source: RandomSource,
}

impl ChallengeEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_source(source: RandomSource) -> Self {
        Self { source }
    }

    /// Draw a challenge for `profile` stamped with the current local time.
    pub fn run(&self, profile: &Profile, mode: GenerationMode) -> GenerationResult {
        self.run_at(profile, mode, Local::now().naive_local())
    }

    /// Draw a challenge as if requested at `now`.
    ///
    /// Daily mode seeds from `now`'s date, so equal dates give equal entries.
    pub fn run_at(
        &self,
        profile: &Profile,
        mode: GenerationMode,
        now: NaiveDateTime,
    ) -> GenerationResult {
        let mut cycle = self.source.begin(mode, now.date());
        generate(profile, mode, &mut cycle, now)
    }
}

/// Build a challenge from `profile` using `rng` for every draw.
///
/// Pure apart from the draws: the profile is not touched and no I/O happens.
pub fn generate<R: Rng + ?Sized>(
    profile: &Profile,
    mode: GenerationMode,
    rng: &mut R,
    now: NaiveDateTime,
) -> GenerationResult {
    let entries = draw_entries(profile, rng);
    info!(
        profile = %profile.id,
        mode = %mode,
        categories = profile.data.len(),
        entries = entries.len(),
        "challenge generated"
    );
    GenerationResult {
        mode,
        generated_at: now,
        entries,
    }
}

/// Pick the mandatory category plus one or two others and resolve one item
/// from each, in selection order.
pub fn draw_entries<R: Rng + ?Sized>(profile: &Profile, rng: &mut R) -> Vec<ChallengeEntry> {
    let categories = &profile.data;
    let mandatory = profile.mandatory_index();
    let others: Vec<usize> = (0..categories.len())
        .filter(|index| Some(*index) != mandatory)
        .collect();

    let wanted = rng.random_range(EXTRA_CATEGORIES);
    let count = wanted.min(others.len());

    let mut selected: Vec<usize> = mandatory.into_iter().collect();
    selected.extend(
        index::sample(rng, others.len(), count)
            .into_iter()
            .map(|position| others[position]),
    );

    let mut entries = Vec::with_capacity(selected.len());
    for category_index in selected {
        let category = &categories[category_index];
        let Some(item) = category.items.choose(rng) else {
            debug!(category = %category.id, "skipping category without items");
            continue;
        };
        let text = resolve_item(item, rng);
        debug!(category = %category.id, item = %item.id, "resolved item");
        entries.push(ChallengeEntry {
            category: category.name.clone(),
            text,
        });
    }
    entries
}
