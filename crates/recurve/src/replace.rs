//! Replacement: drift-tracked splicing of expansions over a subject.

use crate::error::Result;
use crate::matcher::Match;
use crate::regex::Regex;

impl Regex {
    /// Replace every match of the pattern in `subject` with the expansion
    /// of `template`.
    ///
    /// Inside the template, `$1`/`${1}` select a capture group by number
    /// (0 is the whole match) and `$name`/`${name}` select one by name.
    /// A reference to a group that does not exist or did not participate
    /// expands to nothing, never an error. A `$` that does not introduce a
    /// reference is kept literally.
    pub fn replace_all(&self, subject: &[u8], template: &[u8]) -> Result<Vec<u8>> {
        let matches = self.scan(subject, true)?;
        let mut out = subject.to_vec();
        let mut drift = 0isize;
        for m in &matches {
            let expansion = self.expand_template(template, m, subject)?;
            splice(&mut out, &expansion, m.start(), m.end(), &mut drift);
        }
        Ok(out)
    }

    /// Replace every match with the bytes returned by `replacer`, which
    /// receives the literally matched bytes. No template expansion is
    /// applied to its result.
    pub fn replace_all_with<F>(&self, subject: &[u8], mut replacer: F) -> Result<Vec<u8>>
    where
        F: FnMut(&[u8]) -> Vec<u8>,
    {
        let matches = self.scan(subject, true)?;
        let mut out = subject.to_vec();
        let mut drift = 0isize;
        for m in &matches {
            let expansion = replacer(&subject[m.range()]);
            splice(&mut out, &expansion, m.start(), m.end(), &mut drift);
        }
        Ok(out)
    }

    /// Replace every match with `replacement`, inserted verbatim.
    pub fn replace_all_literal(&self, subject: &[u8], replacement: &[u8]) -> Result<Vec<u8>> {
        let matches = self.scan(subject, true)?;
        let mut out = subject.to_vec();
        let mut drift = 0isize;
        for m in &matches {
            splice(&mut out, replacement, m.start(), m.end(), &mut drift);
        }
        Ok(out)
    }

    /// Expand one template against one match, slicing group text out of
    /// the original subject.
    fn expand_template(&self, template: &[u8], m: &Match, subject: &[u8]) -> Result<Vec<u8>> {
        let mut out = Vec::with_capacity(template.len());
        let mut rest = template;
        while let Some(dollar) = rest.iter().position(|&b| b == b'$') {
            out.extend_from_slice(&rest[..dollar]);
            rest = &rest[dollar + 1..];

            let (name, consumed) = match reference_name(rest) {
                Some(parsed) => parsed,
                None => {
                    // Not a reference; the dollar is literal.
                    out.push(b'$');
                    continue;
                }
            };
            rest = &rest[consumed..];
            out.extend_from_slice(&self.resolve_reference(&name, m, subject)?);
        }
        out.extend_from_slice(rest);
        Ok(out)
    }

    /// Resolve a `$`-reference to the bytes it stands for. Anything that
    /// does not name a participating group is empty.
    fn resolve_reference<'s>(
        &self,
        name: &str,
        m: &Match,
        subject: &'s [u8],
    ) -> Result<&'s [u8]> {
        let index = if let Ok(number) = name.parse::<usize>() {
            Some(number)
        } else {
            self.capture_index(name)?
        };
        Ok(index
            .and_then(|index| m.group_bytes(index, subject))
            .unwrap_or_default())
    }
}

/// Parse the reference following a `$`. Returns the referenced name and
/// how many template bytes it consumed, or `None` if no reference starts
/// here.
///
/// Accepted forms: `{name}` and `{digits}` (the full braced text), a bare
/// name (`[A-Za-z_][A-Za-z0-9_]*`), or a single digit / shell-special
/// character (`$12` references group 1 followed by a literal `2`).
fn reference_name(rest: &[u8]) -> Option<(String, usize)> {
    let (&first, tail) = rest.split_first()?;
    if first == b'{' {
        let close = tail.iter().position(|&b| b == b'}')?;
        let name = String::from_utf8_lossy(&tail[..close]).into_owned();
        return Some((name, close + 2));
    }
    if first.is_ascii_digit() || matches!(first, b'*' | b'#' | b'$' | b'@' | b'!' | b'?') {
        return Some(((first as char).to_string(), 1));
    }
    if first == b'_' || first.is_ascii_alphabetic() {
        let len = 1 + tail
            .iter()
            .take_while(|&&b| b == b'_' || b.is_ascii_alphanumeric())
            .count();
        let name = String::from_utf8_lossy(&rest[..len]).into_owned();
        return Some((name, len));
    }
    None
}

/// Splice `replacement` over the original span `[start, end)` of a buffer
/// whose length has already drifted by `drift` bytes relative to the
/// original subject, then update the drift.
fn splice(out: &mut Vec<u8>, replacement: &[u8], start: usize, end: usize, drift: &mut isize) {
    let spliced_start = start.wrapping_add_signed(*drift);
    let spliced_end = end.wrapping_add_signed(*drift);
    out.splice(spliced_start..spliced_end, replacement.iter().copied());
    *drift += replacement.len() as isize - (end - start) as isize;
}
