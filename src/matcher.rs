//! Backtracking argument matcher
//!
//! Assigns whitespace-delimited tokens to specification slots left to
//! right. The single variadic slot starts with the smallest span that
//! leaves one token per remaining slot and widens one token at a time
//! when a stricter interpretation cannot be satisfied. Optional slots
//! may be skipped, letting later slots slide onto earlier tokens.

use crate::tokenizer::tokenize;
use crate::types::{ArgKind, ArgSpec, ArgValue};
use crate::validators::{validate, ParseContext};

/// Saved matcher state for widening the variadic span.
///
/// Created lazily the first time the variadic slot is reached, mutated on
/// each backtrack, discarded when the parse call returns.
#[derive(Debug, Clone, Copy)]
struct Checkpoint {
    /// Length of the output vector when the variadic was first reached
    out_len: usize,
    /// Specification index of the variadic slot
    spec_idx: usize,
    /// Token cursor when the variadic was first reached
    token_idx: usize,
    /// The minimal span end: every token except one per remaining slot
    min_end: usize,
    /// Current candidate span end, in tokens
    end: usize,
    /// How far `end` may be pushed: one extra token per optional slot
    /// remaining after the variadic, never past the token count
    max_end: usize,
}

/// Match command-argument text against a specification.
///
/// Returns `None` when no assignment of tokens to slots satisfies the
/// spec; otherwise a vector of exactly `spec.len()` values. Malformed
/// user input is always a normal return, never a panic.
pub fn match_args(input: &str, spec: &ArgSpec, ctx: &ParseContext) -> Option<Vec<ArgValue>> {
    let input = input.trim();
    let slots = match spec {
        ArgSpec::Freeform => return Some(vec![ArgValue::raw(input)]),
        ArgSpec::Positional(slots) => slots,
    };

    let required = slots.iter().filter(|a| a.required).count();
    if input.is_empty() {
        if required > 0 {
            return None;
        }
        return Some(vec![ArgValue::Missing; slots.len()]);
    }

    let tokens = tokenize(input);
    if tokens.len() < required {
        return None;
    }

    let mut out: Vec<ArgValue> = Vec::with_capacity(slots.len());
    let mut si = 0;
    let mut ti = 0;
    let mut checkpoint: Option<Checkpoint> = None;

    loop {
        let mut failed = false;

        while si < slots.len() {
            let slot = slots[si];

            if slot.kind == ArgKind::Variadic {
                if checkpoint.is_none() {
                    let remaining = slots.len() - si - 1;
                    let optional_after = slots[si + 1..].iter().filter(|a| !a.required).count();
                    let min_end = tokens.len().saturating_sub(remaining);
                    checkpoint = Some(Checkpoint {
                        out_len: out.len(),
                        spec_idx: si,
                        token_idx: ti,
                        min_end,
                        end: min_end,
                        max_end: (min_end + optional_after).min(tokens.len()),
                    });
                }
                let cp = checkpoint.as_ref().unwrap();
                if cp.end <= ti {
                    // span is empty at this width
                    if slot.required {
                        failed = true;
                        break;
                    }
                    out.push(ArgValue::Missing);
                } else {
                    let text = &input[tokens[ti].start..tokens[cp.end - 1].end];
                    out.push(ArgValue::raw(text));
                    ti = cp.end;
                }
                si += 1;
                continue;
            }

            if ti >= tokens.len() {
                if slot.required {
                    failed = true;
                    break;
                }
                out.push(ArgValue::Missing);
                si += 1;
                continue;
            }

            let raw = tokens[ti].text(input);
            match validate(slot.kind, raw, ctx) {
                Some(value) => {
                    out.push(value);
                    ti += 1;
                }
                None if slot.required || si == slots.len() - 1 => {
                    // the slot is consumed either way; record the failure
                    out.push(ArgValue::invalid(raw));
                    ti += 1;
                }
                None => {
                    // optional mid-spec slot: skip it and retry the same
                    // token against the next slot
                    out.push(ArgValue::Missing);
                }
            }
            si += 1;
        }

        if !failed {
            if let Some(cp) = &checkpoint {
                // A widened attempt may not pay for itself with validation
                // failures: more invalid slots after the variadic than
                // tokens the widening absorbed means the widening was
                // unwarranted.
                let extra = cp.end - cp.min_end;
                if extra > 0 {
                    let invalid = out[cp.out_len + 1..].iter().filter(|v| v.is_invalid()).count();
                    if invalid > extra {
                        failed = true;
                    }
                }
            }
        }

        if !failed && ti < tokens.len() {
            // too many tokens
            failed = true;
        }

        if !failed {
            return Some(out);
        }

        match checkpoint.as_mut() {
            Some(cp) if cp.end < cp.max_end => {
                cp.end += 1;
                out.truncate(cp.out_len);
                si = cp.spec_idx;
                ti = cp.token_idx;
            }
            _ => return None,
        }
    }
}
