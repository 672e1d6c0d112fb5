use rand::Rng;
use rand::seq::IndexedRandom;

use inkling_core::{ItemKind, PLACEHOLDER, RuleItem, split_options};

/// Substituted for a list item whose options are all blank.
pub const EMPTY_OPTIONS_SENTINEL: &str = "???";

/// Resolve a rule item into display text.
///
/// Fixed items never draw. Variable items always draw, even when the
/// template has no placeholder.
pub fn resolve_item<R: Rng + ?Sized>(item: &RuleItem, rng: &mut R) -> String {
    let value = match &item.kind {
        ItemKind::Fixed => return item.template.clone(),
        ItemKind::Range { min, max } => draw_in_range(*min, *max, rng).to_string(),
        ItemKind::List { options } => split_options(options)
            .choose(rng)
            .map(|option| option.to_string())
            .unwrap_or_else(|| EMPTY_OPTIONS_SENTINEL.to_string()),
    };
    substitute(&item.template, &value)
}

/// Replace the placeholder with the emphasized value, if there is one.
pub fn substitute(template: &str, value: &str) -> String {
    if template.contains(PLACEHOLDER) {
        template.replace(PLACEHOLDER, &format!(" **{value}** "))
    } else {
        template.to_string()
    }
}

/// Inclusive draw; an inverted range degrades to `min` without drawing.
fn draw_in_range<R: Rng + ?Sized>(min: i64, max: i64, rng: &mut R) -> i64 {
    if min > max {
        return min;
    }
    rng.random_range(min..=max)
}
