//! Case-insensitive subsequence matching.
//!
//! Every query character must appear in the candidate in order. Among the
//! placements, the best-scoring one wins: matches at the very start, right
//! after a word separator, or directly after the previous match earn bonuses;
//! unmatched characters before the first match cost a little.

use crate::model::snippet::Snippet;

const MATCH_SCORE: i64 = 1;
const FIRST_CHAR_BONUS: i64 = 10;
const BOUNDARY_BONUS: i64 = 8;
const ADJACENT_BONUS: i64 = 5;
const LEADING_PENALTY: i64 = 1;
const MAX_LEADING_PENALTY: i64 = 3;

/// A ranked candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Match {
    /// Position of the candidate in the input slice
    pub index: usize,
    pub score: i64,
}

fn is_separator(c: char) -> bool {
    c.is_whitespace() || matches!(c, '/' | '-' | '_' | '.' | ',' | ':')
}

/// Score `text` against `query`, or `None` when `query` is not a
/// subsequence of `text`. An empty query matches everything with score 0.
pub fn score(query: &str, text: &str) -> Option<i64> {
    let query: Vec<char> = query
        .to_lowercase()
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();
    if query.is_empty() {
        return Some(0);
    }
    let text: Vec<char> = text.to_lowercase().chars().collect();

    (0..text.len())
        .filter(|&start| text[start] == query[0])
        .filter_map(|start| score_from(&query, &text, start))
        .max()
}

/// Greedy placement starting with `query[0]` at `text[start]`
fn score_from(query: &[char], text: &[char], start: usize) -> Option<i64> {
    let mut total = -(start as i64 * LEADING_PENALTY).min(MAX_LEADING_PENALTY);
    let mut prev: Option<usize> = None;
    let mut pos = start;

    for &qc in query {
        let found = (pos..text.len()).find(|&i| text[i] == qc)?;
        total += MATCH_SCORE;
        if found == 0 {
            total += FIRST_CHAR_BONUS;
        }
        if found == 0 || is_separator(text[found - 1]) {
            total += BOUNDARY_BONUS;
        }
        if prev.is_some_and(|p| p + 1 == found) {
            total += ADJACENT_BONUS;
        }
        prev = Some(found);
        pos = found + 1;
    }
    Some(total)
}

/// Rank `candidates` best first. Equal scores keep input order.
pub fn rank<S: AsRef<str>>(query: &str, candidates: &[S]) -> Vec<Match> {
    let mut matches: Vec<Match> = candidates
        .iter()
        .enumerate()
        .filter_map(|(index, text)| {
            score(query, text.as_ref()).map(|score| Match { index, score })
        })
        .collect();
    matches.sort_by(|a, b| b.score.cmp(&a.score));
    matches
}

/// Rank snippets by their searchable text (name, language, tags)
pub fn rank_snippets(query: &str, snippets: &[Snippet]) -> Vec<Match> {
    let texts: Vec<String> = snippets.iter().map(Snippet::search_text).collect();
    rank(query, &texts)
}

/// The single best snippet for `query`, if any matches at all
pub fn find_best<'a>(query: &str, snippets: &'a [Snippet]) -> Option<&'a Snippet> {
    rank_snippets(query, snippets)
        .first()
        .map(|m| &snippets[m.index])
}
