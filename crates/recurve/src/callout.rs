//! Callout bridge: marshaling per-step matching telemetry to user code.

use std::ffi::{CStr, c_int, c_void};
use std::panic::{self, AssertUnwindSafe};
use std::ptr::{self, NonNull};
use std::slice;

use bitflags::bitflags;
use pcre2_sys::{PCRE2_CALLOUT_BACKTRACK, PCRE2_CALLOUT_STARTMATCH, PCRE2_ERROR_CALLOUT};

use crate::error::{Error, Result};
use crate::ffi;
use crate::ffi::{pcre2_callout_block_8, pcre2_set_callout_8};
use crate::regex::{Regex, lock};

bitflags! {
    /// Why the primitive invoked this callout.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct CalloutFlags: u32 {
        /// First callout of a new match attempt.
        const START_MATCH = PCRE2_CALLOUT_STARTMATCH;
        /// The matcher backtracked since the previous callout.
        const BACKTRACK = PCRE2_CALLOUT_BACKTRACK;
    }
}

/// Snapshot of the matcher's state at one callout point.
///
/// Every field is copied out of primitive-owned memory before the user
/// closure runs, so the record stays valid for the duration of the call
/// and owes nothing to the primitive afterwards.
#[derive(Debug, Clone)]
pub struct CalloutBlock {
    /// Callout block format version reported by the primitive.
    pub version: u32,
    /// Number of the callout (0 for `(?C)`, 255 for auto-callouts).
    pub callout_number: u32,
    /// One more than the highest capture group set so far.
    pub capture_top: u32,
    /// The most recently captured group.
    pub capture_last: u32,
    /// Text captured so far, per group, walking the live offset table up
    /// to `capture_top`. A degenerate trailing entry runs to the end of
    /// the subject; a group that has not captured is empty.
    pub substrings: Vec<Vec<u8>>,
    /// Most recently passed `(*MARK)`, if any.
    pub mark: Option<String>,
    /// The subject being matched.
    pub subject: Vec<u8>,
    /// Offset where the current match attempt started.
    pub start_match: usize,
    /// Current scan offset within the subject.
    pub current_position: usize,
    /// Offset in the pattern of the item being matched.
    pub pattern_position: usize,
    /// Length in the pattern of the item being matched.
    pub next_item_length: usize,
    /// Offset in the pattern of a string callout's argument.
    pub callout_string_offset: usize,
    /// Argument of a string callout (`(?C'...')`), if this is one.
    pub callout_string: Option<String>,
    /// Start-of-attempt / backtrack flags.
    pub flags: CalloutFlags,
}

type CalloutFn = dyn FnMut(&CalloutBlock) -> i32 + Send + 'static;

/// The closure storage the C trampoline points at. Boxed so the address
/// handed to the primitive stays stable for as long as it is registered.
pub(crate) struct CalloutHook {
    hook: Box<CalloutFn>,
}

/// Owner of the registered callout closure.
///
/// Held as a raw pointer because the trampoline dereferences it without
/// taking any lock; the registration path guarantees the pointee is never
/// freed while a match attempt could still call it.
pub(crate) struct CalloutSlot(Option<NonNull<CalloutHook>>);

unsafe impl Send for CalloutSlot {}

impl CalloutSlot {
    pub(crate) const fn empty() -> Self {
        Self(None)
    }

    /// Take ownership of a freshly registered hook, freeing the previous
    /// one. Callers must have already repointed the primitive.
    fn store(&mut self, hook: NonNull<CalloutHook>) {
        self.clear();
        self.0 = Some(hook);
    }

    pub(crate) fn clear(&mut self) {
        if let Some(hook) = self.0.take() {
            drop(unsafe { Box::from_raw(hook.as_ptr()) });
        }
    }
}

impl Drop for CalloutSlot {
    fn drop(&mut self) {
        self.clear();
    }
}

impl Regex {
    /// Register `callout` to be invoked at the pattern's callout points
    /// during every subsequent match attempt.
    ///
    /// The closure returns 0 to continue matching; any nonzero value is
    /// handed back to the primitive verbatim and forces the attempt to
    /// fail with that code. Only one callout is registered per handle;
    /// setting a new one replaces the previous one.
    pub fn set_callout<F>(&self, callout: F) -> Result<()>
    where
        F: FnMut(&CalloutBlock) -> i32 + Send + 'static,
    {
        // Slot lock first, then the match-attempt lock: registration
        // mutates the match context, and the old closure may only be freed
        // while no attempt can be running.
        let mut slot = lock(&self.callout);
        let guard = lock(&self.inner);
        let inner = guard.as_ref().ok_or(Error::Closed)?;

        let hook = NonNull::from(Box::leak(Box::new(CalloutHook {
            hook: Box::new(callout),
        })));
        let rc = unsafe {
            pcre2_set_callout_8(
                inner.context.as_ptr(),
                Some(trampoline),
                hook.as_ptr().cast::<c_void>(),
            )
        };
        if rc < 0 {
            drop(unsafe { Box::from_raw(hook.as_ptr()) });
            return Err(Error::Match {
                code: rc,
                message: ffi::error_message(rc),
            });
        }
        slot.store(hook);
        Ok(())
    }

    /// Remove any registered callout.
    pub fn clear_callout(&self) -> Result<()> {
        let mut slot = lock(&self.callout);
        let guard = lock(&self.inner);
        let inner = guard.as_ref().ok_or(Error::Closed)?;
        unsafe { pcre2_set_callout_8(inner.context.as_ptr(), None, ptr::null_mut()) };
        slot.clear();
        Ok(())
    }
}

/// The function the primitive calls at each callout point. Snapshots the
/// block, invokes the stored closure, and relays its return code. A panic
/// in the closure is reported as the primitive's callout error rather
/// than unwinding across the C boundary.
unsafe extern "C" fn trampoline(block: *mut pcre2_callout_block_8, data: *mut c_void) -> c_int {
    if block.is_null() || data.is_null() {
        return PCRE2_ERROR_CALLOUT;
    }
    let record = unsafe { snapshot(&*block) };
    let hook = unsafe { &mut *data.cast::<CalloutHook>() };
    match panic::catch_unwind(AssertUnwindSafe(|| (hook.hook)(&record))) {
        Ok(code) => code,
        Err(_) => PCRE2_ERROR_CALLOUT,
    }
}

/// Copy one callout block into an owned record.
unsafe fn snapshot(block: &pcre2_callout_block_8) -> CalloutBlock {
    let subject = if block.subject.is_null() {
        Vec::new()
    } else {
        unsafe { slice::from_raw_parts(block.subject, block.subject_length) }.to_vec()
    };

    let mark = if block.mark.is_null() {
        None
    } else {
        let mark = unsafe { CStr::from_ptr(block.mark.cast()) };
        Some(mark.to_string_lossy().into_owned())
    };

    let callout_string = if block.callout_string.is_null() {
        None
    } else {
        let text =
            unsafe { slice::from_raw_parts(block.callout_string, block.callout_string_length) };
        Some(String::from_utf8_lossy(text).into_owned())
    };

    CalloutBlock {
        version: block.version,
        callout_number: block.callout_number,
        capture_top: block.capture_top,
        capture_last: block.capture_last,
        substrings: unsafe { captured_substrings(block, &subject) },
        mark,
        subject,
        start_match: block.start_match,
        current_position: block.current_position,
        pattern_position: block.pattern_position,
        next_item_length: block.next_item_length,
        callout_string_offset: block.callout_string_offset,
        callout_string,
        flags: CalloutFlags::from_bits_truncate(block.callout_flags),
    }
}

/// Rebuild the captured-so-far substrings from the live offset vector.
///
/// Pairs run from group 1 up to `capture_top`; the table may end on a lone
/// start offset, in which case that capture runs to the end of the
/// subject. Unset or out-of-range offsets yield an empty capture.
unsafe fn captured_substrings(block: &pcre2_callout_block_8, subject: &[u8]) -> Vec<Vec<u8>> {
    let top = block.capture_top as usize;
    if top < 2 || block.offset_vector.is_null() {
        return Vec::new();
    }
    let table = unsafe { slice::from_raw_parts(block.offset_vector, 2 * top - 1) };

    let mut substrings = Vec::with_capacity(top - 1);
    let mut i = 2;
    while i < table.len() {
        let start = table[i];
        let end = if i + 1 < table.len() {
            table[i + 1]
        } else {
            subject.len()
        };
        i += 2;
        if start == ffi::UNSET || end == ffi::UNSET || start > end || end > subject.len() {
            substrings.push(Vec::new());
        } else {
            substrings.push(subject[start..end].to_vec());
        }
    }
    substrings
}
