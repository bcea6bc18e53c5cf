//! Fuzzy boss-name resolution
//!
//! A prefix trie over the canonical boss names with a weighted
//! edit-distance tie-breaker. Substitutions cost 2, insertions and
//! deletions cost 1: users drop or add characters more often than they
//! substitute them. Any tie for the minimum is a hard failure; the
//! resolver never guesses.

use crate::types::AliasTable;
use ahash::AHashMap;

#[derive(Debug, Default)]
struct TrieNode {
    children: AHashMap<char, TrieNode>,
    entry: Option<usize>,
}

impl TrieNode {
    fn collect(&self, out: &mut Vec<usize>) {
        if let Some(idx) = self.entry {
            out.push(idx);
        }
        for child in self.children.values() {
            child.collect(out);
        }
    }
}

/// The set of canonical lowercase boss names, indexed by a prefix trie.
///
/// Owned by the domain layer; the trie is rebuilt whole on every mutation
/// so a parse call only ever sees a pre- or post-update dictionary.
#[derive(Debug, Default)]
pub struct BossDictionary {
    names: Vec<String>,
    root: TrieNode,
}

impl BossDictionary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut dict = Self::new();
        for name in names {
            let name = name.into().to_lowercase();
            if !dict.names.contains(&name) {
                dict.names.push(name);
            }
        }
        dict.rebuild();
        dict
    }

    pub fn insert(&mut self, name: &str) {
        let name = name.to_lowercase();
        if !self.names.contains(&name) {
            self.names.push(name);
            self.rebuild();
        }
    }

    pub fn remove(&mut self, name: &str) {
        let name = name.to_lowercase();
        let before = self.names.len();
        self.names.retain(|n| *n != name);
        if self.names.len() != before {
            self.rebuild();
        }
    }

    pub fn entries(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// All entries that start with `prefix`
    pub fn entries_with_prefix(&self, prefix: &str) -> Vec<&str> {
        let mut node = &self.root;
        for ch in prefix.chars() {
            match node.children.get(&ch) {
                Some(child) => node = child,
                None => return Vec::new(),
            }
        }
        let mut indices = Vec::new();
        node.collect(&mut indices);
        indices.sort_unstable();
        indices.iter().map(|&i| self.names[i].as_str()).collect()
    }

    fn rebuild(&mut self) {
        let mut root = TrieNode::default();
        for (idx, name) in self.names.iter().enumerate() {
            let mut node = &mut root;
            for ch in name.chars() {
                node = node.children.entry(ch).or_default();
            }
            node.entry = Some(idx);
        }
        self.root = root;
    }
}

/// A successful fuzzy resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BossMatch {
    /// The dictionary's normalized form of the name
    pub canonical: String,
    /// What the user wrote, lowercased and alias-expanded
    pub input: String,
}

impl BossMatch {
    /// False when the input is not a prefix of the canonical name; callers
    /// use this to warn the user about a non-trivial correction.
    pub fn is_exact_prefix(&self) -> bool {
        self.canonical.starts_with(&self.input)
    }
}

/// Resolve a raw boss token against the dictionary.
///
/// Lowercases, expands aliases, tries a unique-prefix match, then a
/// weighted edit-distance search over the first-letter bucket, then over
/// the whole dictionary. Ties fail.
pub fn resolve_boss(raw: &str, dict: &BossDictionary, aliases: &AliasTable) -> Option<BossMatch> {
    let lowered = raw.to_lowercase();
    let input = aliases.get(&lowered).cloned().unwrap_or(lowered);
    if input.is_empty() {
        return None;
    }

    let prefixed = dict.entries_with_prefix(&input);
    if prefixed.len() == 1 {
        return Some(BossMatch { canonical: prefixed[0].to_string(), input });
    }

    let first = input.chars().next()?;
    let bucket: Vec<&str> = dict.entries().filter(|e| e.starts_with(first)).collect();
    if let Some(canonical) = closest_unique(&input, &bucket) {
        return Some(BossMatch { canonical: canonical.to_string(), input });
    }

    let all: Vec<&str> = dict.entries().collect();
    let canonical = closest_unique(&input, &all)?;
    Some(BossMatch { canonical: canonical.to_string(), input })
}

/// The unique minimum-distance candidate, or `None` on a tie or an empty
/// candidate set. Candidates that contain the input as a substring (plain
/// or hyphen-component-wise) are preferred over those that do not.
fn closest_unique<'a>(input: &str, candidates: &[&'a str]) -> Option<&'a str> {
    if candidates.is_empty() {
        return None;
    }
    let preferred: Vec<&str> = candidates
        .iter()
        .copied()
        .filter(|c| contains_input(input, c))
        .collect();
    let pool: &[&str] = if preferred.is_empty() { candidates } else { &preferred };

    let mut best: Option<(&'a str, usize)> = None;
    let mut tied = false;
    for &candidate in pool {
        let dist = edit_distance(input, candidate);
        match best {
            Some((_, d)) if dist > d => {}
            Some((_, d)) if dist == d => tied = true,
            _ => {
                best = Some((candidate, dist));
                tied = false;
            }
        }
    }
    match best {
        Some((candidate, _)) if !tied => Some(candidate),
        _ => None,
    }
}

fn contains_input(input: &str, candidate: &str) -> bool {
    if candidate.contains(input) {
        return true;
    }
    // "mewtwo-a" vs "mewtwo-armored": match segment by segment
    if input.contains('-') && candidate.contains('-') {
        let in_parts: Vec<&str> = input.split('-').collect();
        let cand_parts: Vec<&str> = candidate.split('-').collect();
        return in_parts.len() == cand_parts.len()
            && in_parts.iter().zip(&cand_parts).all(|(i, c)| c.contains(i));
    }
    false
}

/// Weighted Levenshtein distance: substitution 2, insertion/deletion 1.
///
/// Space-optimized two-row dynamic programming.
fn edit_distance(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();
    let n = b_chars.len();

    let mut prev: Vec<usize> = (0..=n).collect();
    let mut curr = vec![0; n + 1];

    for (i, &ac) in a_chars.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &bc) in b_chars.iter().enumerate() {
            let sub = prev[j] + if ac == bc { 0 } else { 2 };
            let del = prev[j + 1] + 1;
            let ins = curr[j] + 1;
            curr[j + 1] = sub.min(del).min(ins);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[n]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dict() -> BossDictionary {
        BossDictionary::from_names(["latios", "latias", "kyogre", "groudon", "rayquaza"])
    }

    #[test]
    fn edit_distance_weights() {
        assert_eq!(edit_distance("abc", "abc"), 0);
        assert_eq!(edit_distance("abc", "abd"), 2); // one substitution
        assert_eq!(edit_distance("abc", "abcd"), 1); // one insertion
        assert_eq!(edit_distance("abcd", "abc"), 1); // one deletion
    }

    #[test]
    fn unique_prefix_matches() {
        let m = resolve_boss("kyo", &dict(), &AliasTable::new()).unwrap();
        assert_eq!(m.canonical, "kyogre");
        assert_eq!(m.input, "kyo");
        assert!(m.is_exact_prefix());
    }

    #[test]
    fn ambiguous_prefix_falls_through_to_distance() {
        // "lati" prefixes both latios and latias: tie, hard failure
        assert_eq!(resolve_boss("lati", &dict(), &AliasTable::new()), None);
        // one more letter disambiguates
        let m = resolve_boss("latio", &dict(), &AliasTable::new()).unwrap();
        assert_eq!(m.canonical, "latios");
    }

    #[test]
    fn typo_resolves_by_distance() {
        let m = resolve_boss("groudn", &dict(), &AliasTable::new()).unwrap();
        assert_eq!(m.canonical, "groudon");
        assert!(!m.is_exact_prefix());
    }

    #[test]
    fn wrong_first_letter_uses_whole_dictionary_fallback() {
        let m = resolve_boss("rayquasa", &dict(), &AliasTable::new()).unwrap();
        assert_eq!(m.canonical, "rayquaza");
        let m = resolve_boss("ayquaza", &dict(), &AliasTable::new()).unwrap();
        assert_eq!(m.canonical, "rayquaza");
    }

    #[test]
    fn alias_applies_before_matching() {
        let mut aliases = AliasTable::new();
        aliases.insert("ray".to_string(), "rayquaza".to_string());
        let m = resolve_boss("Ray", &dict(), &aliases).unwrap();
        assert_eq!(m.canonical, "rayquaza");
        assert_eq!(m.input, "rayquaza");
    }

    #[test]
    fn empty_input_fails() {
        assert_eq!(resolve_boss("", &dict(), &AliasTable::new()), None);
        assert_eq!(resolve_boss("   ".trim(), &dict(), &AliasTable::new()), None);
    }

    #[test]
    fn tie_at_minimum_distance_fails() {
        let two = BossDictionary::from_names(["latios", "latias"]);
        assert_eq!(resolve_boss("latixs", &two, &AliasTable::new()), None);
    }

    #[test]
    fn hyphen_components_match_segment_wise() {
        let forms = BossDictionary::from_names(["mewtwo-armored", "mewtwo-anything"]);
        let m = resolve_boss("mew-arm", &forms, &AliasTable::new()).unwrap();
        assert_eq!(m.canonical, "mewtwo-armored");
    }

    #[test]
    fn substring_candidates_are_preferred() {
        let d = BossDictionary::from_names(["giratina-origin", "giratina-altered"]);
        let m = resolve_boss("origin", &d, &AliasTable::new()).unwrap();
        assert_eq!(m.canonical, "giratina-origin");
    }

    #[test]
    fn trie_rebuilds_on_mutation() {
        let mut d = dict();
        assert_eq!(d.entries_with_prefix("lat").len(), 2);
        d.remove("latias");
        assert_eq!(d.entries_with_prefix("lat"), vec!["latios"]);
        d.insert("Latias");
        assert_eq!(d.entries_with_prefix("lat").len(), 2);
        assert_eq!(d.len(), 5);
    }

    #[test]
    fn prefix_of_unknown_letter_is_empty() {
        assert!(dict().entries_with_prefix("zz").is_empty());
    }
}
