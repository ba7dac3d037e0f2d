//! Incremental case-insensitive search over the visible list.

use std::ops::Range;

use record_proto::protocol::Station;
use serde::{Deserialize, Serialize};

/// Query text plus the catalog indices it matched, in visible order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Search {
    query: String,
    matches: Vec<usize>,
    pointer: usize,
}

impl Search {
    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn matches(&self) -> &[usize] {
        &self.matches
    }

    pub fn pointer(&self) -> usize {
        self.pointer
    }

    /// Clear the query for a fresh entry. Previous matches stay until the
    /// first keystroke recomputes them.
    pub fn begin_entry(&mut self) {
        self.query.clear();
    }

    /// Append one character and re-run the search. Returns the visible
    /// position the cursor should jump to.
    pub fn push_char(&mut self, ch: char, stations: &[Station], visible: &[usize]) -> Option<usize> {
        self.query.push(ch);
        self.run(stations, visible)
    }

    /// Drop the last character and re-run. A no-op on an empty query.
    pub fn pop_char(&mut self, stations: &[Station], visible: &[usize]) -> Option<usize> {
        self.query.pop()?;
        self.run(stations, visible)
    }

    #[cfg(test)]
    pub fn set_query(
        &mut self,
        query: impl Into<String>,
        stations: &[Station],
        visible: &[usize],
    ) -> Option<usize> {
        self.query = query.into();
        self.run(stations, visible)
    }

    /// Recompute matches for the current query. An empty query matches
    /// nothing and leaves the cursor alone.
    fn run(&mut self, stations: &[Station], visible: &[usize]) -> Option<usize> {
        self.matches = find_matches(&self.query, stations, visible);
        self.pointer = 0;
        self.current_position(visible)
    }

    pub fn next_match(&mut self, visible: &[usize]) -> Option<usize> {
        if self.matches.is_empty() {
            return None;
        }
        self.pointer = (self.pointer + 1) % self.matches.len();
        self.current_position(visible)
    }

    pub fn prev_match(&mut self, visible: &[usize]) -> Option<usize> {
        if self.matches.is_empty() {
            return None;
        }
        let len = self.matches.len();
        self.pointer = (self.pointer + len - 1) % len;
        self.current_position(visible)
    }

    /// Leave entry mode with the matches intact for `n` / `N`.
    pub fn commit(&mut self) {
        self.query.clear();
    }

    pub fn clear(&mut self) {
        self.query.clear();
        self.matches.clear();
        self.pointer = 0;
    }

    /// Keep matches consistent with a rebuilt visible list: same relative
    /// order as `visible`, pointer still on the same station when it survived.
    pub fn refresh(&mut self, stations: &[Station], visible: &[usize]) {
        let target = self.matches.get(self.pointer).copied();
        self.matches = if self.query.is_empty() {
            visible
                .iter()
                .copied()
                .filter(|idx| self.matches.contains(idx))
                .collect()
        } else {
            find_matches(&self.query, stations, visible)
        };
        self.pointer = target
            .and_then(|t| self.matches.iter().position(|&idx| idx == t))
            .unwrap_or(0);
    }

    /// Visible position of the match under the pointer.
    pub fn current_position(&self, visible: &[usize]) -> Option<usize> {
        let target = *self.matches.get(self.pointer)?;
        visible.iter().position(|&idx| idx == target)
    }
}

/// Unicode lowercase fold, applied to both the query and station text.
pub fn fold(text: &str) -> String {
    text.chars().flat_map(char::to_lowercase).collect()
}

pub fn station_matches(station: &Station, folded_query: &str) -> bool {
    fold(&station.title).contains(folded_query) || fold(&station.tooltip).contains(folded_query)
}

/// Catalog indices from `visible` whose title or tooltip contains `query`,
/// in visible order.
pub fn find_matches(query: &str, stations: &[Station], visible: &[usize]) -> Vec<usize> {
    if query.is_empty() {
        return Vec::new();
    }
    let needle = fold(query);
    visible
        .iter()
        .copied()
        .filter(|&idx| {
            stations
                .get(idx)
                .is_some_and(|s| station_matches(s, &needle))
        })
        .collect()
}

/// Byte ranges of `text` covered by case-insensitive occurrences of `query`,
/// leftmost first and non-overlapping. Ranges always fall on char boundaries
/// of the original text, even when lowercasing changes a char's length.
pub fn match_spans(text: &str, query: &str) -> Vec<Range<usize>> {
    let needle = fold(query);
    if needle.is_empty() {
        return Vec::new();
    }

    let mut folded = String::with_capacity(text.len());
    // for every byte of `folded`, the source char's range in `text`
    let mut origin: Vec<Range<usize>> = Vec::with_capacity(text.len());
    for (start, ch) in text.char_indices() {
        let source = start..start + ch.len_utf8();
        for lower in ch.to_lowercase() {
            folded.push(lower);
            origin.extend(std::iter::repeat(source.clone()).take(lower.len_utf8()));
        }
    }

    let mut spans: Vec<Range<usize>> = Vec::new();
    let mut from = 0;
    while let Some(found) = folded[from..].find(&needle) {
        let begin = from + found;
        let end = begin + needle.len();
        let span = origin[begin].start..origin[end - 1].end;
        match spans.last_mut() {
            Some(last) if last.end > span.start => last.end = span.end,
            _ => spans.push(span),
        }
        from = end;
    }
    spans
}
