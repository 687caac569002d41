//! The `#slide-N` location fragment (1-based).

use regex::Regex;
use std::sync::LazyLock;

static SLIDE_FRAGMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#?slide-(\d+)").expect("valid fragment pattern"));

/// Fragment for the slide at `index` (0-based).
pub fn format(index: usize) -> String {
    format!("#slide-{}", index + 1)
}

/// 0-based slide index named by `fragment`, if it is in `[0, count)`.
///
/// Only the leading digits count, so `#slide-3-intro` names slide 3.
pub fn parse(fragment: &str, count: usize) -> Option<usize> {
    let caps = SLIDE_FRAGMENT.captures(fragment.trim())?;
    let number: usize = caps[1].parse().ok()?;
    let index = number.checked_sub(1)?;
    (index < count).then_some(index)
}
