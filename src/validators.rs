//! Per-kind token validators
//!
//! Each validator maps one raw token to a typed value, or `None` when the
//! token does not match the kind. Failure here is never an error: the
//! matcher turns it into `Invalid` or an optional-slot skip.

use crate::fuzzy::{resolve_boss, BossDictionary};
use crate::types::{AliasTable, ArgKind, ArgValue, Meridiem, TimeOfDay};
use chrono::{Datelike, Local, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;

static MONTH_DAY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{1,2})/(\d{1,2})$").expect("Invalid regex pattern"));
static HOUR_MINUTE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?i)(\d{1,2})[:.](\d{2})(am|pm)?$").expect("Invalid regex pattern"));
static TIMER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:(\d{1,2})[:.])?(\d{1,2})[:.](\d{2})$").expect("Invalid regex pattern"));
static TIER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?i)(?:t?([1-5])|m|mega)$").expect("Invalid regex pattern"));

/// Per-call snapshot of externally owned state the validators read.
///
/// The dictionary and alias table are borrowed for the duration of one
/// parse call; the owner swaps in a rebuilt dictionary between calls,
/// never underneath one.
pub struct ParseContext<'a> {
    pub bosses: &'a BossDictionary,
    pub aliases: &'a AliasTable,
    pub today: NaiveDate,
}

impl<'a> ParseContext<'a> {
    pub fn new(bosses: &'a BossDictionary, aliases: &'a AliasTable) -> Self {
        Self {
            bosses,
            aliases,
            today: Local::now().date_naive(),
        }
    }

    /// Pin the reference date instead of reading the clock.
    pub fn with_today(bosses: &'a BossDictionary, aliases: &'a AliasTable, today: NaiveDate) -> Self {
        Self { bosses, aliases, today }
    }
}

/// Run the validator for `kind` on one raw token
pub fn validate(kind: ArgKind, raw: &str, ctx: &ParseContext) -> Option<ArgValue> {
    match kind {
        ArgKind::Str | ArgKind::Variadic => Some(ArgValue::raw(raw)),
        ArgKind::Int => validate_int(raw).map(|value| ArgValue::Integer { value }),
        ArgKind::MonthDay => validate_month_day(raw, ctx.today)
            .map(|(year, month, day)| ArgValue::Date { year, month, day }),
        ArgKind::HourMinute => validate_hour_minute(raw).map(|time| ArgValue::Time { time }),
        ArgKind::Timer => {
            validate_timer(raw).map(|(minutes, seconds)| ArgValue::Timer { minutes, seconds })
        }
        ArgKind::Tier => validate_tier(raw).map(|tier| ArgValue::Tier { tier }),
        ArgKind::Boss => resolve_boss(raw, ctx.bosses, ctx.aliases)
            .map(|m| ArgValue::Boss { canonical: m.canonical, input: m.input }),
    }
}

/// Strict base-10 integer: the parsed value must reproduce the original
/// text exactly, which rejects leading zeros, `+` signs and stray garbage.
pub fn validate_int(raw: &str) -> Option<i64> {
    raw.parse::<i64>().ok().filter(|n| n.to_string() == raw)
}

/// `M/D` date. The year is inferred: this year, unless it is currently
/// December and the given month is January, in which case next year.
pub fn validate_month_day(raw: &str, today: NaiveDate) -> Option<(i32, u32, u32)> {
    let cap = MONTH_DAY.captures(raw)?;
    let month: u32 = cap[1].parse().ok()?;
    let day: u32 = cap[2].parse().ok()?;
    if !(1..=12).contains(&month) || !(1..=31).contains(&day) {
        return None;
    }
    let year = if today.month() == 12 && month == 1 {
        today.year() + 1
    } else {
        today.year()
    };
    Some((year, month, day))
}

/// `H:MM` or `H.MM`, optional trailing am/pm. The literal `hatch` is a
/// distinguished valid value resolved later against the active raid.
pub fn validate_hour_minute(raw: &str) -> Option<TimeOfDay> {
    if raw.eq_ignore_ascii_case("hatch") {
        return Some(TimeOfDay::Hatch);
    }
    let cap = HOUR_MINUTE.captures(raw)?;
    let hour: u32 = cap[1].parse().ok()?;
    let minute: u32 = cap[2].parse().ok()?;
    if hour >= 24 || minute >= 60 {
        return None;
    }
    let meridiem = cap.get(3).map(|m| {
        if m.as_str().eq_ignore_ascii_case("am") {
            Meridiem::Am
        } else {
            Meridiem::Pm
        }
    });
    Some(TimeOfDay::Clock { hour, minute, meridiem })
}

/// Countdown `[H:]M:SS`, returned as total minutes plus seconds
pub fn validate_timer(raw: &str) -> Option<(u32, u32)> {
    let cap = TIMER.captures(raw)?;
    let hours: u32 = match cap.get(1) {
        Some(h) => h.as_str().parse().ok()?,
        None => 0,
    };
    let minutes: u32 = cap[2].parse().ok()?;
    let seconds: u32 = cap[3].parse().ok()?;
    if seconds >= 60 {
        return None;
    }
    Some((hours * 60 + minutes, seconds))
}

/// Tier `1`-`5`, optionally prefixed with `T`/`t`; `m`/`mega` maps to 6
pub fn validate_tier(raw: &str) -> Option<u8> {
    let cap = TIER.captures(raw)?;
    match cap.get(1) {
        Some(digit) => digit.as_str().parse().ok(),
        None => Some(6),
    }
}
