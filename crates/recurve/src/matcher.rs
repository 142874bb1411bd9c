//! Match iteration: turning single attempts into global enumeration.

use std::ops::Range;

use crate::error::{Error, Result};
use crate::ffi::{self, Attempt};
use crate::regex::{Regex, lock};

/// One accepted match: the overall span plus every capture-group span.
///
/// Group 0 is the whole match. Groups that did not participate in the
/// match are `None`. All offsets are byte indices into the subject the
/// match was produced from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match {
    start: usize,
    end: usize,
    groups: Vec<Option<(usize, usize)>>,
}

impl Match {
    /// Byte offset where the whole match starts.
    pub fn start(&self) -> usize {
        self.start
    }

    /// Byte offset just past the whole match.
    pub fn end(&self) -> usize {
        self.end
    }

    /// The whole match as a range, suitable for slicing the subject.
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Span of capture group `index` (0 = whole match), or `None` if the
    /// group did not participate or does not exist.
    pub fn group(&self, index: usize) -> Option<(usize, usize)> {
        self.groups.get(index).copied().flatten()
    }

    /// Capture group `index` sliced out of `subject`.
    pub fn group_bytes<'s>(&self, index: usize, subject: &'s [u8]) -> Option<&'s [u8]> {
        self.group(index).map(|(start, end)| &subject[start..end])
    }

    /// Number of group slots, counting the whole match as slot 0.
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }
}

impl Regex {
    /// Enumerate non-overlapping matches of the pattern over `subject`,
    /// in ascending start order.
    ///
    /// This loop is the single source of truth for every find, replace and
    /// split operation. Each primitive attempt runs under the handle's
    /// match-attempt lock; capture offsets are copied out before the lock
    /// is released. "No match" ends the enumeration normally; a primitive
    /// execution error discards everything accumulated for this call.
    ///
    /// Empty matches follow the adjacency rule: an empty match is dropped
    /// when it is the first occurrence seen or when it starts exactly
    /// where the previous accepted match ended, and the cursor skips one
    /// byte past it. An empty match elsewhere is accepted, also advancing
    /// the cursor past it. Non-empty matches advance the cursor to their
    /// end, so immediately adjacent non-empty matches are all found.
    pub(crate) fn scan(&self, subject: &[u8], want_all: bool) -> Result<Vec<Match>> {
        if subject.is_empty() {
            return Ok(Vec::new());
        }

        // One transient capture buffer per logical search operation, sized
        // from the pattern.
        let data = {
            let guard = lock(&self.inner);
            let inner = guard.as_ref().ok_or(Error::Closed)?;
            ffi::MatchData::from_pattern(&inner.code)?
        };

        let mut matches: Vec<Match> = Vec::new();
        let mut offset = 0;
        while offset < subject.len() {
            let attempt = {
                let guard = lock(&self.inner);
                let inner = guard.as_ref().ok_or(Error::Closed)?;
                ffi::match_once(
                    &inner.code,
                    &inner.context,
                    &data,
                    subject,
                    offset,
                    self.group_slots,
                )?
            };
            let groups = match attempt {
                Attempt::NoMatch => break,
                Attempt::Matched(groups) => groups,
            };
            let Some(&Some((start, end))) = groups.first() else {
                break;
            };

            if start == end {
                let keep = matches.last().is_some_and(|prev| prev.end() != start);
                if keep {
                    matches.push(Match { start, end, groups });
                }
                offset = end + 1;
                continue;
            }

            matches.push(Match { start, end, groups });
            offset = end;

            if !want_all {
                break;
            }
        }
        Ok(matches)
    }
}
