//! The compiled pattern handle and its search surface.

use std::fmt;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::callout::CalloutSlot;
use crate::error::{Error, Result};
use crate::ffi;
use crate::matcher::Match;
use crate::options::Options;

/// Acquire a mutex, treating a poisoned lock as still usable.
///
/// The guarded state stays consistent across a panic: a primitive call
/// either completed or was never started, and the slots hold plain owned
/// resources.
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// The resources released on close: the compiled code and the match
/// context the primitive mutates during attempts.
pub(crate) struct Inner {
    pub(crate) code: ffi::Code,
    pub(crate) context: ffi::MatchContext,
}

/// A compiled PCRE2 regular expression.
///
/// A `Regex` may be shared freely between threads; match attempts against
/// the primitive's mutable execution context are serialized internally, so
/// concurrent searches on disjoint subjects see exactly the results they
/// would get sequentially. Note that a pathological pattern can backtrack
/// for a long time and there is no cancellation: a running attempt holds
/// the handle's match lock until the primitive returns.
///
/// Resources are released by [`Regex::close`] (idempotent) or, as a safety
/// net, when the value is dropped.
pub struct Regex {
    pattern: String,
    /// Capture-group count plus one, fixed at compile time.
    pub(crate) group_slots: usize,
    /// `None` once closed. Doubles as the match-attempt lock.
    pub(crate) inner: Mutex<Option<Inner>>,
    /// Registered callout closure, guarded separately from match attempts.
    pub(crate) callout: Mutex<CalloutSlot>,
}

impl Regex {
    /// Compile `pattern` with no options.
    pub fn new(pattern: &str) -> Result<Self> {
        Self::with_options(pattern, Options::empty())
    }

    /// Compile `pattern` with the given option bits.
    pub fn with_options(pattern: &str, options: Options) -> Result<Self> {
        let code = ffi::compile(pattern, options.bits())?;
        let context = ffi::MatchContext::new()?;
        let group_slots = ffi::capture_count(&code) + 1;
        Ok(Self {
            pattern: pattern.to_owned(),
            group_slots,
            inner: Mutex::new(Some(Inner { code, context })),
            callout: Mutex::new(CalloutSlot::empty()),
        })
    }

    /// The pattern text this regex was compiled from.
    pub fn as_str(&self) -> &str {
        &self.pattern
    }

    /// Number of parenthesized capture groups in the pattern.
    pub fn capture_count(&self) -> usize {
        self.group_slots - 1
    }

    /// Resolve a named capture group to its number, or `None` if the
    /// pattern has no group with that name.
    pub fn capture_index(&self, name: &str) -> Result<Option<usize>> {
        let guard = lock(&self.inner);
        let inner = guard.as_ref().ok_or(Error::Closed)?;
        ffi::group_index_by_name(&inner.code, name)
    }

    /// Whether the pattern matches anywhere in `subject`.
    pub fn is_match(&self, subject: &[u8]) -> Result<bool> {
        Ok(!self.scan(subject, false)?.is_empty())
    }

    /// The leftmost match, as a slice of `subject`.
    pub fn find<'s>(&self, subject: &'s [u8]) -> Result<Option<&'s [u8]>> {
        Ok(self
            .scan(subject, false)?
            .into_iter()
            .next()
            .map(|m| &subject[m.range()]))
    }

    /// Byte span of the leftmost match.
    pub fn find_index(&self, subject: &[u8]) -> Result<Option<(usize, usize)>> {
        Ok(self
            .scan(subject, false)?
            .into_iter()
            .next()
            .map(|m| (m.start(), m.end())))
    }

    /// All non-overlapping matches, at most `limit` of them.
    ///
    /// A negative `limit` returns every match; zero returns none.
    pub fn find_all<'s>(&self, subject: &'s [u8], limit: isize) -> Result<Vec<&'s [u8]>> {
        Ok(capped(self.scan(subject, true)?, limit)
            .map(|m| &subject[m.range()])
            .collect())
    }

    /// Byte spans of all non-overlapping matches, at most `limit` of them.
    pub fn find_all_index(&self, subject: &[u8], limit: isize) -> Result<Vec<(usize, usize)>> {
        Ok(capped(self.scan(subject, true)?, limit)
            .map(|m| (m.start(), m.end()))
            .collect())
    }

    /// The leftmost match together with its capture-group spans.
    pub fn find_captures(&self, subject: &[u8]) -> Result<Option<Match>> {
        Ok(self.scan(subject, false)?.into_iter().next())
    }

    /// All matches together with their capture-group spans, at most
    /// `limit` of them.
    pub fn find_all_captures(&self, subject: &[u8], limit: isize) -> Result<Vec<Match>> {
        Ok(capped(self.scan(subject, true)?, limit).collect())
    }

    /// Split `subject` into the parts between matches of the pattern.
    ///
    /// `limit` bounds the number of parts: negative means all, zero yields
    /// an empty result, and a positive value returns at most `limit` parts
    /// with the unsplit remainder last.
    pub fn split<'s>(&self, subject: &'s [u8], limit: isize) -> Result<Vec<&'s [u8]>> {
        if limit == 0 {
            return Ok(Vec::new());
        }
        if !self.pattern.is_empty() && subject.is_empty() {
            return Ok(vec![&subject[..]]);
        }

        let separators = self.find_all_index(subject, limit)?;
        let mut parts: Vec<&[u8]> = Vec::with_capacity(separators.len());
        let mut begin = 0;
        let mut end = 0;
        for (sep_start, sep_end) in separators {
            if limit > 0 && parts.len() >= (limit as usize) - 1 {
                break;
            }
            end = sep_start;
            // A separator ending at offset zero contributes no leading part.
            if sep_end != 0 {
                parts.push(&subject[begin..end]);
            }
            begin = sep_end;
        }
        if end != subject.len() {
            parts.push(&subject[begin..]);
        }
        Ok(parts)
    }

    /// Release the compiled code and match context.
    ///
    /// Safe to call more than once; later calls are no-ops. Any operation
    /// after the first close reports [`Error::Closed`]. Dropping the value
    /// releases anything still held, but explicit close is the documented
    /// discipline.
    pub fn close(&self) {
        // Lock order matches set_callout: callout slot first, then the
        // match-attempt lock. Holding the latter guarantees no attempt is
        // mid-flight while the callout closure is freed.
        let mut slot = lock(&self.callout);
        let mut inner = lock(&self.inner);
        *inner = None;
        slot.clear();
    }
}

impl fmt::Debug for Regex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Regex")
            .field("pattern", &self.pattern)
            .finish_non_exhaustive()
    }
}

impl Drop for Regex {
    fn drop(&mut self) {
        self.close();
    }
}

/// Apply the caller-side cap: negative = unlimited, zero = none.
fn capped(matches: Vec<Match>, limit: isize) -> impl Iterator<Item = Match> {
    let take = if limit < 0 { usize::MAX } else { limit as usize };
    matches.into_iter().take(take)
}
