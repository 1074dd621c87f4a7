//! Schedule-grid arithmetic and time labels.
//!
//! The schedule grid renders time horizontally as one continuous axis
//! spanning Friday evening through Sunday. Each day's time blocks are
//! projected onto disjoint numeric ranges by [`block_offset`], and
//! "midnight" blocks are shifted into the next day's early-morning region
//! so the grid stays contiguous.
//!
//! This module lives in `core` (zero internal deps) so it can be used by
//! both the API layer and any future reporting tooling.

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Grid offset for blocks whose first word is not a known day, and for
/// games missing a block or slot. Renders as the off-grid "unscheduled"
/// column.
pub const UNSCHEDULED_OFFSET: i32 = 100;

/// Grid start coordinate for unscheduled games.
pub const UNSCHEDULED_START: f64 = 100.0;

/// Extra offset applied to "midnight" blocks, pushing them into the next
/// calendar day's early-morning region.
const MIDNIGHT_SHIFT: i32 = 24;

/// Lower bound of an hour-of-day value.
pub const HOUR_MIN: f64 = 0.0;

/// Upper bound of an hour-of-day value.
pub const HOUR_MAX: f64 = 23.99;

/// Base grid offset for a day name, or `None` for unknown words.
fn day_offset(word: &str) -> Option<i32> {
    match word {
        "friday" => Some(-18),
        "saturday" => Some(6),
        "sunday" => Some(30),
        _ => None,
    }
}

/// Weekday names recognised by [`combined_label`].
fn is_weekday(word: &str) -> bool {
    matches!(
        word,
        "monday" | "tuesday" | "wednesday" | "thursday" | "friday" | "saturday" | "sunday"
    )
}

// ---------------------------------------------------------------------------
// Offset / width / start
// ---------------------------------------------------------------------------

/// Grid offset for a time block, derived from its display text.
///
/// The first whitespace-delimited word, lower-cased, selects the day base
/// offset (unknown words get [`UNSCHEDULED_OFFSET`]). A second word equal
/// to `"midnight"` (case-insensitive) adds 24 regardless of whether the
/// first word matched; a single-word block gets no midnight adjustment.
pub fn block_offset(text: &str) -> i32 {
    let mut words = text.split_whitespace();

    let mut offset = words
        .next()
        .and_then(|w| day_offset(&w.to_lowercase()))
        .unwrap_or(UNSCHEDULED_OFFSET);

    if let Some(second) = words.next() {
        if second.eq_ignore_ascii_case("midnight") {
            offset += MIDNIGHT_SHIFT;
        }
    }

    offset
}

/// Grid start coordinate for a game.
///
/// A game is scheduled iff it has both a time block and a time slot;
/// anything else lands in the unscheduled column.
pub fn game_start(block_text: Option<&str>, slot_start: Option<f64>) -> f64 {
    match (block_text, slot_start) {
        (Some(text), Some(start)) => f64::from(block_offset(text)) + start,
        _ => UNSCHEDULED_START,
    }
}

/// Grid width of a time slot's `(start, stop)` hour pair.
///
/// A stop before the start denotes a window wrapping past midnight
/// (e.g. 22:00 - 02:00 has width 4). `None` (no slot assigned) is width 0.
pub fn slot_width(slot: Option<(f64, f64)>) -> f64 {
    match slot {
        Some((start, stop)) => {
            let width = stop - start;
            if width < 0.0 {
                width + 24.0
            } else {
                width
            }
        }
        None => 0.0,
    }
}

/// Zero-based position of `value` in `list`, or `-1` when `value` is
/// `None` or absent.
///
/// The scheduler payload replaces entity references with positions into
/// its parallel arrays; the arrays must be serialized in the same order
/// used here.
pub fn index_of<T: PartialEq>(value: Option<&T>, list: &[T]) -> i64 {
    match value {
        Some(v) => list
            .iter()
            .position(|item| item == v)
            .map(|i| i as i64)
            .unwrap_or(-1),
        None => -1,
    }
}

// ---------------------------------------------------------------------------
// Display labels
// ---------------------------------------------------------------------------

/// 12-hour label for an hour-of-day value, with `Midnight`/`Noon`
/// special-cased at exactly 0 and 12. Fractional hours print their integer
/// part ("18.5" renders as "6 PM").
pub fn am_pm_label(hour: f64) -> String {
    if hour == 0.0 {
        return "Midnight".to_string();
    }
    if hour == 12.0 {
        return "Noon".to_string();
    }
    if hour < 12.0 {
        format!("{} AM", hour.trunc() as i32)
    } else {
        format!("{} PM", (hour - 12.0).trunc() as i32)
    }
}

/// Display label for a time slot, e.g. `"2 PM - 4 PM"`.
pub fn slot_label(start: f64, stop: f64) -> String {
    format!("{} - {}", am_pm_label(start), am_pm_label(stop))
}

/// Combine a block's text with a slot label into a schedule string.
///
/// Weekday blocks collapse to `"Friday 8 PM - Midnight"`; named sessions
/// keep their full text: `"One Shots : 2 PM - 4 PM"`.
pub fn combined_label(block_text: &str, slot: &str) -> String {
    let first_word = block_text.split_whitespace().next().unwrap_or("");
    if is_weekday(&first_word.to_lowercase()) {
        format!("{first_word} {slot}")
    } else {
        format!("{block_text} : {slot}")
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validate an hour-of-day value against `[0, 23.99]`.
pub fn validate_hour(value: f64) -> Result<(), String> {
    if (HOUR_MIN..=HOUR_MAX).contains(&value) {
        Ok(())
    } else {
        Err(format!(
            "Hour of the day must be between {HOUR_MIN} and {HOUR_MAX}, got {value}"
        ))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
