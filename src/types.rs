//! Core data types for argument parsing results

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

/// The kind of value a specification slot accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArgKind {
    /// Any single token, taken verbatim
    Str,
    /// A base-10 integer, strict round-trip form
    Int,
    /// A greedy run of one or more tokens, whitespace preserved
    Variadic,
    /// `M/D` calendar date
    MonthDay,
    /// `H:MM` clock time, optional am/pm, or the literal `hatch`
    HourMinute,
    /// `[H:]M:SS` countdown
    Timer,
    /// Raid tier 1-5, or mega (tier 6)
    Tier,
    /// Fuzzy-matched boss name
    Boss,
}

/// One slot in an argument specification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Arg {
    pub kind: ArgKind,
    pub required: bool,
}

impl Arg {
    pub fn req(kind: ArgKind) -> Self {
        Self { kind, required: true }
    }

    pub fn opt(kind: ArgKind) -> Self {
        Self { kind, required: false }
    }
}

/// An ordered argument specification for one command
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArgSpec {
    /// The whole trimmed input comes back as a single raw string
    Freeform,
    /// Positional slots, matched left to right
    Positional(Vec<Arg>),
}

/// The one place the single-variadic invariant is enforced
pub(crate) fn check_single_variadic(args: &[Arg]) -> Result<(), &'static str> {
    let variadics = args.iter().filter(|a| a.kind == ArgKind::Variadic).count();
    if variadics > 1 {
        return Err("argument spec may contain at most one variadic slot");
    }
    Ok(())
}

impl ArgSpec {
    /// Build a positional spec.
    ///
    /// Panics if more than one slot is `Variadic`; that is a programmer
    /// error caught at registration time, never per parse call.
    pub fn positional(args: Vec<Arg>) -> Self {
        if let Err(msg) = check_single_variadic(&args) {
            panic!("{}", msg);
        }
        ArgSpec::Positional(args)
    }

    pub fn slots(&self) -> &[Arg] {
        match self {
            ArgSpec::Freeform => &[],
            ArgSpec::Positional(args) => args,
        }
    }
}

/// A token's byte-offset range within the original input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn text<'a>(&self, input: &'a str) -> &'a str {
        &input[self.start..self.end]
    }
}

/// am/pm marker on a clock time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Meridiem {
    Am,
    Pm,
}

/// A validated hour/minute argument
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TimeOfDay {
    /// A literal clock time as the user wrote it
    Clock {
        hour: u32,
        minute: u32,
        meridiem: Option<Meridiem>,
    },
    /// "Whenever the active egg hatches" - resolved later by the caller
    Hatch,
}

/// One typed, validated argument value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ArgValue {
    /// A free string or a variadic capture
    Raw { text: String },
    Integer { value: i64 },
    Date { year: i32, month: u32, day: u32 },
    Time { time: TimeOfDay },
    Timer { minutes: u32, seconds: u32 },
    Tier { tier: u8 },
    /// A fuzzy-resolved boss name and the (aliased) text it resolved from
    Boss { canonical: String, input: String },
    /// A token occupied the slot but failed validation
    Invalid { raw: String },
    /// An optional slot with no token assigned
    Missing,
}

impl ArgValue {
    pub fn raw(text: impl Into<String>) -> Self {
        ArgValue::Raw { text: text.into() }
    }

    pub fn invalid(raw: impl Into<String>) -> Self {
        ArgValue::Invalid { raw: raw.into() }
    }

    pub fn is_invalid(&self) -> bool {
        matches!(self, ArgValue::Invalid { .. })
    }
}

/// Nickname -> canonical-input lookup, owned by the caller
pub type AliasTable = AHashMap<String, String>;

/// Fixed per-command table of named argument specifications
#[derive(Debug, Clone, Default)]
pub struct SpecTable {
    specs: AHashMap<String, ArgSpec>,
}

impl SpecTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a spec under a command name. The single-variadic invariant
    /// is checked here, at registration, not per parse call.
    pub fn register(&mut self, name: impl Into<String>, spec: ArgSpec) {
        let spec = match spec {
            ArgSpec::Positional(args) => ArgSpec::positional(args),
            ArgSpec::Freeform => ArgSpec::Freeform,
        };
        self.specs.insert(name.into(), spec);
    }

    pub fn get(&self, name: &str) -> Option<&ArgSpec> {
        self.specs.get(name)
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[should_panic]
    fn two_variadics_rejected_at_registration() {
        let mut table = SpecTable::new();
        table.register(
            "bad",
            ArgSpec::Positional(vec![Arg::req(ArgKind::Variadic), Arg::req(ArgKind::Variadic)]),
        );
    }

    #[test]
    #[should_panic]
    fn two_variadics_rejected_at_construction() {
        let _ = ArgSpec::positional(vec![Arg::req(ArgKind::Variadic), Arg::opt(ArgKind::Variadic)]);
    }

    #[test]
    fn span_text_slices_original_input() {
        let input = "go  fast";
        let span = Span { start: 4, end: 8 };
        assert_eq!(span.text(input), "fast");
    }
}
