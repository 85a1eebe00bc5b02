//! Defensive parsing of free-text price strings.
//!
//! Providers return prices such as `"$249-$299"`, `"$1200"`, `"from $99"` or
//! `"Contact seller"`. Only the first `$N` / `$N-$M` occurrence is read.

use std::sync::LazyLock;

use regex::Regex;

static PRICE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$(\d+)(?:-\$(\d+))?").expect("valid price regex"));

/// Inclusive dollar interval parsed from a price string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceSpan {
    pub min: u64,
    pub max: u64,
}

/// Parses the first `$N` or `$N-$M` in `price`.
///
/// Returns `None` when nothing matches or a number does not fit in `u64`.
/// A single value yields `min == max`. The numbers are taken as written, so
/// an inverted range like `"$300-$200"` yields `min > max`.
#[must_use]
pub fn parse_price(price: &str) -> Option<PriceSpan> {
    let caps = PRICE_RE.captures(price)?;
    let min = caps.get(1)?.as_str().parse::<u64>().ok()?;
    let max = match caps.get(2) {
        Some(m) => m.as_str().parse::<u64>().ok()?,
        None => min,
    };
    Some(PriceSpan { min, max })
}

/// Sort key for price ordering: the first parsed number, or 0 when the
/// string has no parseable price.
#[must_use]
pub fn sort_price(price: &str) -> u64 {
    parse_price(price).map_or(0, |span| span.min)
}
