use crate::models::Symbol;

/// Direction of a confirmed price change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

/// Per-character animation hint for a freshly committed price.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DigitClass {
    Unchanged,
    ChangedUp,
    ChangedDown,
}

/// One character of the new price string with its classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DigitCell {
    pub ch: char,
    pub class: DigitClass,
}

/// Display formatting shared by both sides of a diff: two decimals, four
/// for DOGE.
pub fn format_price(symbol: Symbol, price: f64) -> String {
    format!("{:.*}", symbol.display_decimals(), price)
}

/// Right-aligned per-character diff of two formatted price strings.
///
/// Position `i` of `current` pairs with the character the same distance
/// from the right end of `previous`; a position present only in the new
/// string is always changed. No rounding happens here; both inputs must
/// come from the same formatter ([`format_price`]).
pub fn diff_formatted(previous: &str, current: &str, direction: Direction) -> Vec<DigitCell> {
    let prev: Vec<char> = previous.chars().collect();
    let curr: Vec<char> = current.chars().collect();
    let changed = match direction {
        Direction::Up => DigitClass::ChangedUp,
        Direction::Down => DigitClass::ChangedDown,
    };

    curr.iter()
        .enumerate()
        .map(|(i, &ch)| {
            let from_right = curr.len() - 1 - i;
            let class = match prev.len().checked_sub(from_right + 1) {
                Some(j) if prev[j] == ch => DigitClass::Unchanged,
                _ => changed,
            };
            DigitCell { ch, class }
        })
        .collect()
}

/// Formats both prices and classifies every character of the new string.
/// Callers must have confirmed a real change via the comparator first;
/// numerically equal inputs never reach this engine.
pub fn diff_prices(symbol: Symbol, previous: f64, current: f64) -> Vec<DigitCell> {
    let direction = if current > previous {
        Direction::Up
    } else {
        Direction::Down
    };
    diff_formatted(
        &format_price(symbol, previous),
        &format_price(symbol, current),
        direction,
    )
}
