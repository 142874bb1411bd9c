//! Narrow bridge to the PCRE2 primitive.
//!
//! Everything the crate needs from `pcre2-sys` goes through this module:
//! RAII owners for the compiled code, match context and match data, plus
//! thin safe wrappers around the handful of entry points we consume.
//! Capture offsets are copied out of the primitive's ovector before any
//! wrapper returns, so no caller ever sees primitive-owned memory.

use std::ffi::{CString, c_int, c_void};
use std::ptr::{self, NonNull};
use std::slice;

use pcre2_sys::{
    PCRE2_CONFIG_VERSION, PCRE2_CONVERT_GLOB, PCRE2_ERROR_NOMATCH, PCRE2_ERROR_NOSUBSTRING,
    PCRE2_INFO_CAPTURECOUNT, pcre2_code_8, pcre2_code_free_8, pcre2_compile_8, pcre2_config_8,
    pcre2_converted_pattern_free_8, pcre2_get_error_message_8, pcre2_get_ovector_count_8,
    pcre2_get_ovector_pointer_8, pcre2_match_8, pcre2_match_context_8,
    pcre2_match_context_create_8, pcre2_match_context_free_8, pcre2_match_data_8,
    pcre2_match_data_create_from_pattern_8, pcre2_match_data_free_8, pcre2_pattern_convert_8,
    pcre2_pattern_info_8, pcre2_substring_number_from_name_8,
};

use crate::error::{CompileError, Error, Result};

// `pcre2-sys` builds and links the full libpcre2-8 but does not declare
// its callout entry points; bind them here, mirroring pcre2.h.
#[repr(C)]
#[allow(non_camel_case_types)]
pub(crate) struct pcre2_callout_block_8 {
    pub(crate) version: u32,
    pub(crate) callout_number: u32,
    pub(crate) capture_top: u32,
    pub(crate) capture_last: u32,
    pub(crate) offset_vector: *mut usize,
    pub(crate) mark: *const u8,
    pub(crate) subject: *const u8,
    pub(crate) subject_length: usize,
    pub(crate) start_match: usize,
    pub(crate) current_position: usize,
    pub(crate) pattern_position: usize,
    pub(crate) next_item_length: usize,
    pub(crate) callout_string_offset: usize,
    pub(crate) callout_string_length: usize,
    pub(crate) callout_string: *const u8,
    pub(crate) callout_flags: u32,
}

unsafe extern "C" {
    pub(crate) fn pcre2_set_callout_8(
        mcontext: *mut pcre2_match_context_8,
        callout: Option<unsafe extern "C" fn(*mut pcre2_callout_block_8, *mut c_void) -> c_int>,
        callout_data: *mut c_void,
    ) -> c_int;
}

/// PCRE2 reports a group that did not participate as `~(PCRE2_SIZE)0`.
pub(crate) const UNSET: usize = usize::MAX;

/// Owner of a compiled pattern. Immutable after creation; PCRE2 documents
/// the compiled code as safe to share between threads.
pub(crate) struct Code {
    ptr: NonNull<pcre2_code_8>,
}

// The compiled code is never mutated after pcre2_compile.
unsafe impl Send for Code {}
unsafe impl Sync for Code {}

impl Code {
    pub(crate) fn as_ptr(&self) -> *mut pcre2_code_8 {
        self.ptr.as_ptr()
    }
}

impl Drop for Code {
    fn drop(&mut self) {
        unsafe { pcre2_code_free_8(self.ptr.as_ptr()) };
    }
}

/// Owner of a match context. Mutated in place by match attempts and by
/// callout registration, so access must be serialized by the caller.
pub(crate) struct MatchContext {
    ptr: NonNull<pcre2_match_context_8>,
}

unsafe impl Send for MatchContext {}

impl MatchContext {
    pub(crate) fn new() -> Result<Self> {
        let ptr = unsafe { pcre2_match_context_create_8(ptr::null_mut()) };
        NonNull::new(ptr)
            .map(|ptr| Self { ptr })
            .ok_or(Error::Resource("match context"))
    }

    pub(crate) fn as_ptr(&self) -> *mut pcre2_match_context_8 {
        self.ptr.as_ptr()
    }
}

impl Drop for MatchContext {
    fn drop(&mut self) {
        unsafe { pcre2_match_context_free_8(self.ptr.as_ptr()) };
    }
}

/// Owner of the transient per-search capture buffer, sized from the
/// pattern's capture-group count.
pub(crate) struct MatchData {
    ptr: NonNull<pcre2_match_data_8>,
}

unsafe impl Send for MatchData {}

impl MatchData {
    pub(crate) fn from_pattern(code: &Code) -> Result<Self> {
        let ptr = unsafe { pcre2_match_data_create_from_pattern_8(code.as_ptr(), ptr::null_mut()) };
        NonNull::new(ptr)
            .map(|ptr| Self { ptr })
            .ok_or(Error::Resource("match data"))
    }
}

impl Drop for MatchData {
    fn drop(&mut self) {
        unsafe { pcre2_match_data_free_8(self.ptr.as_ptr()) };
    }
}

/// Outcome of a single match attempt.
pub(crate) enum Attempt {
    NoMatch,
    /// Capture spans, index 0 = whole match, `None` = group did not
    /// participate. Always `group_slots` entries.
    Matched(Vec<Option<(usize, usize)>>),
}

/// Compile `pattern` with the given option bits.
pub(crate) fn compile(pattern: &str, options: u32) -> Result<Code> {
    let mut error_code: c_int = 0;
    let mut error_offset: usize = 0;
    let ptr = unsafe {
        pcre2_compile_8(
            pattern.as_ptr(),
            pattern.len(),
            options,
            &mut error_code,
            &mut error_offset,
            ptr::null_mut(),
        )
    };
    NonNull::new(ptr).map(|ptr| Code { ptr }).ok_or_else(|| {
        Error::Compile(CompileError {
            message: error_message(error_code),
            offset: error_offset,
        })
    })
}

/// Run one match attempt at `offset` and copy the resulting capture spans
/// out of the match data.
///
/// `group_slots` is the pattern's capture count plus one; the returned
/// vector always has that many entries so group numbering is stable across
/// attempts.
pub(crate) fn match_once(
    code: &Code,
    context: &MatchContext,
    data: &MatchData,
    subject: &[u8],
    offset: usize,
    group_slots: usize,
) -> Result<Attempt> {
    let rc = unsafe {
        pcre2_match_8(
            code.as_ptr(),
            subject.as_ptr(),
            subject.len(),
            offset,
            0,
            data.ptr.as_ptr(),
            context.as_ptr(),
        )
    };
    if rc == PCRE2_ERROR_NOMATCH {
        return Ok(Attempt::NoMatch);
    }
    if rc < 0 {
        return Err(Error::Match {
            code: rc,
            message: error_message(rc),
        });
    }

    // rc is the number of ovector pairs that were set; rc == 0 would mean
    // the ovector was too small, which cannot happen for match data created
    // from the pattern itself.
    let set_pairs = if rc == 0 { group_slots } else { rc as usize };
    let pair_count = unsafe { pcre2_get_ovector_count_8(data.ptr.as_ptr()) } as usize;
    let ovector =
        unsafe { slice::from_raw_parts(pcre2_get_ovector_pointer_8(data.ptr.as_ptr()), 2 * pair_count) };

    let mut groups = Vec::with_capacity(group_slots);
    for i in 0..group_slots {
        let span = if i < set_pairs && i < pair_count {
            let (start, end) = (ovector[2 * i], ovector[2 * i + 1]);
            if start == UNSET || end == UNSET {
                None
            } else {
                Some((start, end))
            }
        } else {
            None
        };
        groups.push(span);
    }
    Ok(Attempt::Matched(groups))
}

/// Number of parenthesized capture groups in the compiled pattern.
pub(crate) fn capture_count(code: &Code) -> usize {
    let mut count: u32 = 0;
    unsafe {
        pcre2_pattern_info_8(
            code.as_ptr(),
            PCRE2_INFO_CAPTURECOUNT,
            (&mut count as *mut u32).cast::<c_void>(),
        )
    };
    count as usize
}

/// Resolve a named capture group to its number. `None` if the pattern has
/// no group with that name.
pub(crate) fn group_index_by_name(code: &Code, name: &str) -> Result<Option<usize>> {
    // Group names cannot contain NUL, so a name that does simply does not
    // exist in the pattern.
    let Ok(c_name) = CString::new(name) else {
        return Ok(None);
    };
    let rc = unsafe {
        pcre2_substring_number_from_name_8(code.as_ptr(), c_name.as_ptr().cast::<u8>())
    };
    if rc == PCRE2_ERROR_NOSUBSTRING {
        Ok(None)
    } else if rc < 0 {
        Err(Error::Match {
            code: rc,
            message: error_message(rc),
        })
    } else {
        Ok(Some(rc as usize))
    }
}

/// Translate a shell glob into an equivalent regular expression using the
/// primitive's pattern-conversion facility.
pub(crate) fn convert_glob(glob: &str) -> Result<String> {
    let mut out: *mut u8 = ptr::null_mut();
    let mut out_len: usize = 0;
    let rc = unsafe {
        pcre2_pattern_convert_8(
            glob.as_ptr(),
            glob.len(),
            PCRE2_CONVERT_GLOB,
            &mut out,
            &mut out_len,
            ptr::null_mut(),
        )
    };
    if rc != 0 {
        return Err(Error::Convert {
            code: rc,
            message: error_message(rc),
        });
    }
    let pattern = unsafe {
        let converted = slice::from_raw_parts(out, out_len);
        let pattern = String::from_utf8_lossy(converted).into_owned();
        pcre2_converted_pattern_free_8(out);
        pattern
    };
    Ok(pattern)
}

/// Version string of the embedded PCRE2 library.
pub(crate) fn version() -> String {
    let needed = unsafe { pcre2_config_8(PCRE2_CONFIG_VERSION, ptr::null_mut()) };
    if needed <= 0 {
        return String::new();
    }
    let mut buf = vec![0u8; needed as usize];
    let len = unsafe { pcre2_config_8(PCRE2_CONFIG_VERSION, buf.as_mut_ptr().cast::<c_void>()) };
    if len <= 0 {
        return String::new();
    }
    // The reported length counts the trailing NUL.
    String::from_utf8_lossy(&buf[..len as usize - 1]).into_owned()
}

/// Human-readable message for a PCRE2 error code.
pub(crate) fn error_message(code: c_int) -> String {
    let mut buf = [0u8; 256];
    let len = unsafe { pcre2_get_error_message_8(code, buf.as_mut_ptr(), buf.len()) };
    if len < 0 {
        format!("unknown pcre2 error code {code}")
    } else {
        String::from_utf8_lossy(&buf[..len as usize]).into_owned()
    }
}
