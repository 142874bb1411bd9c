//! Compile-time option bits, passed through verbatim to PCRE2.

use bitflags::bitflags;
use pcre2_sys::{
    PCRE2_ALLOW_EMPTY_CLASS, PCRE2_ALT_BSUX, PCRE2_ALT_CIRCUMFLEX, PCRE2_ALT_VERBNAMES,
    PCRE2_ANCHORED, PCRE2_AUTO_CALLOUT, PCRE2_CASELESS, PCRE2_DOLLAR_ENDONLY, PCRE2_DOTALL,
    PCRE2_DUPNAMES, PCRE2_ENDANCHORED, PCRE2_EXTENDED, PCRE2_FIRSTLINE, PCRE2_LITERAL,
    PCRE2_MATCH_INVALID_UTF, PCRE2_MATCH_UNSET_BACKREF, PCRE2_MULTILINE, PCRE2_NEVER_BACKSLASH_C,
    PCRE2_NEVER_UCP, PCRE2_NEVER_UTF, PCRE2_NO_AUTO_CAPTURE, PCRE2_NO_AUTO_POSSESS,
    PCRE2_NO_DOTSTAR_ANCHOR, PCRE2_NO_START_OPTIMIZE, PCRE2_NO_UTF_CHECK, PCRE2_UCP,
    PCRE2_UNGREEDY, PCRE2_USE_OFFSET_LIMIT, PCRE2_UTF,
};

bitflags! {
    /// Options applied when compiling a pattern.
    ///
    /// Each flag maps to the PCRE2 compile option of the same name and the
    /// set is handed to the compiler unmodified, so the exact semantics are
    /// those documented by pcre2api(3).
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Options: u32 {
        /// Force the match to start at the first matching position only.
        const ANCHORED = PCRE2_ANCHORED;
        /// Allow `[]` to be an empty class rather than an error.
        const ALLOW_EMPTY_CLASS = PCRE2_ALLOW_EMPTY_CLASS;
        /// Alternative handling of `\u`, `\U` and `\x`.
        const ALT_BSUX = PCRE2_ALT_BSUX;
        /// `^` matches after a newline that ends the subject.
        const ALT_CIRCUMFLEX = PCRE2_ALT_CIRCUMFLEX;
        /// Allow `\` and `)` in verb names.
        const ALT_VERBNAMES = PCRE2_ALT_VERBNAMES;
        /// Insert an automatic callout before each pattern item.
        const AUTO_CALLOUT = PCRE2_AUTO_CALLOUT;
        /// Case-insensitive matching.
        const CASELESS = PCRE2_CASELESS;
        /// `$` matches only at end of subject.
        const DOLLAR_END_ONLY = PCRE2_DOLLAR_ENDONLY;
        /// `.` also matches newlines.
        const DOT_ALL = PCRE2_DOTALL;
        /// Allow duplicate capture group names.
        const DUP_NAMES = PCRE2_DUPNAMES;
        /// The match must end at the end of the subject.
        const END_ANCHORED = PCRE2_ENDANCHORED;
        /// Ignore unescaped whitespace and `#` comments in the pattern.
        const EXTENDED = PCRE2_EXTENDED;
        /// The match must start in the first line of the subject.
        const FIRST_LINE = PCRE2_FIRSTLINE;
        /// Treat the whole pattern as literal text.
        const LITERAL = PCRE2_LITERAL;
        /// Permit matching against subjects with invalid UTF.
        const MATCH_INVALID_UTF = PCRE2_MATCH_INVALID_UTF;
        /// A backreference to an unset group matches the empty string.
        const MATCH_UNSET_BACKREF = PCRE2_MATCH_UNSET_BACKREF;
        /// `^` and `$` match at internal newlines.
        const MULTILINE = PCRE2_MULTILINE;
        /// Reject `\C` in patterns.
        const NEVER_BACKSLASH_C = PCRE2_NEVER_BACKSLASH_C;
        /// Forbid `(*UCP)` from enabling Unicode properties.
        const NEVER_UCP = PCRE2_NEVER_UCP;
        /// Forbid `(*UTF)` from enabling UTF matching.
        const NEVER_UTF = PCRE2_NEVER_UTF;
        /// Plain parentheses do not capture.
        const NO_AUTO_CAPTURE = PCRE2_NO_AUTO_CAPTURE;
        /// Disable auto-possessification of quantifiers.
        const NO_AUTO_POSSESS = PCRE2_NO_AUTO_POSSESS;
        /// Disable the implicit `.*` start anchor optimization.
        const NO_DOTSTAR_ANCHOR = PCRE2_NO_DOTSTAR_ANCHOR;
        /// Disable match-time start optimizations.
        const NO_START_OPTIMIZE = PCRE2_NO_START_OPTIMIZE;
        /// Skip UTF validity checking of pattern and subjects.
        const NO_UTF_CHECK = PCRE2_NO_UTF_CHECK;
        /// `\d`, `\w` etc. use Unicode properties.
        const UCP = PCRE2_UCP;
        /// Quantifiers are lazy by default, greedy when followed by `?`.
        const UNGREEDY = PCRE2_UNGREEDY;
        /// Honor an offset limit set in the match context.
        const USE_OFFSET_LIMIT = PCRE2_USE_OFFSET_LIMIT;
        /// Treat pattern and subjects as UTF-8.
        const UTF = PCRE2_UTF;
    }
}
