//! Structural scanner for call expressions in generated PHP sources.
//!
//! This is not a parser. It walks the text once, skipping string literals and
//! comments, and tracks bracket nesting so that it can find the argument list
//! of a call such as:
//!
//! ```text
//! AppBuilder::init(__DIR__ . '/../', [
//!     \App\Provider::class,
//! ]);
//! ```

use std::ops::Range;

/// Location of a call expression and its top-level arguments.
///
/// All offsets are byte offsets into the scanned text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallSpan {
    /// Offset of the first byte of the anchor.
    pub start: usize,
    /// Offset of the opening parenthesis.
    pub open: usize,
    /// Offset of the matching closing parenthesis.
    pub close: usize,
    /// Top-level arguments, trimmed of surrounding whitespace. Empty
    /// arguments (such as after a trailing comma) are not listed.
    pub args: Vec<Range<usize>>,
}

impl CallSpan {
    /// The first argument that is a single list literal `[...]`.
    pub fn list_argument(&self, text: &str) -> Option<Range<usize>> {
        let bytes = text.as_bytes();
        self.args
            .iter()
            .find(|arg| {
                bytes.get(arg.start) == Some(&b'[')
                    && matching_close(bytes, arg.start) == Some(arg.end - 1)
            })
            .cloned()
    }

    /// Whether the argument list ends with a comma, e.g. `init($a, )`.
    pub fn has_trailing_comma(&self, text: &str) -> bool {
        let tail_start = self.args.last().map_or(self.open + 1, |arg| arg.end);
        text[tail_start..self.close].contains(',')
    }
}

/// Find the first call of `anchor` in code (not in strings or comments).
///
/// Returns `None` when the anchor never appears as a call, or when its
/// parentheses are unbalanced.
///
/// # Example
/// ```
/// use takeoff_patch::scanner::find_call;
///
/// let text = "<?php\nAppBuilder::init(__DIR__, [\\A::class]);\n";
/// let call = find_call(text, "AppBuilder::init").unwrap();
/// assert_eq!(call.args.len(), 2);
/// assert_eq!(&text[call.args[0].clone()], "__DIR__");
/// ```
pub fn find_call(text: &str, anchor: &str) -> Option<CallSpan> {
    if anchor.is_empty() {
        return None;
    }
    let bytes = text.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if let Some(next) = skip_literal(bytes, i) {
            i = next;
            continue;
        }
        if bytes[i..].starts_with(anchor.as_bytes()) && at_word_start(bytes, i) {
            let mut open = i + anchor.len();
            while open < bytes.len() && bytes[open].is_ascii_whitespace() {
                open += 1;
            }
            if bytes.get(open) == Some(&b'(') {
                if let Some((close, args)) = split_arguments(bytes, open) {
                    return Some(CallSpan {
                        start: i,
                        open,
                        close,
                        args,
                    });
                }
                return None;
            }
        }
        i += 1;
    }
    None
}

/// Offset of the bracket closing the one at `open`.
pub fn matching_close(bytes: &[u8], open: usize) -> Option<usize> {
    let mut stack = vec![*bytes.get(open)?];
    let mut i = open + 1;
    while i < bytes.len() {
        if let Some(next) = skip_literal(bytes, i) {
            i = next;
            continue;
        }
        match bytes[i] {
            b'(' | b'[' | b'{' => stack.push(bytes[i]),
            b')' | b']' | b'}' => {
                if stack.pop().map(closer) != Some(bytes[i]) {
                    return None;
                }
                if stack.is_empty() {
                    return Some(i);
                }
            }
            _ => {}
        }
        i += 1;
    }
    None
}

/// Parts of `range` that are code, with string literals and comments cut out.
pub fn code_segments(text: &str, range: Range<usize>) -> Vec<Range<usize>> {
    let bytes = text.as_bytes();
    let end = range.end.min(bytes.len());
    let mut segments = Vec::new();
    let mut start = range.start;
    let mut i = range.start;
    while i < end {
        if let Some(next) = skip_literal(bytes, i) {
            if start < i {
                segments.push(start..i);
            }
            i = next;
            start = next;
            continue;
        }
        i += 1;
    }
    if start < end {
        segments.push(start..end);
    }
    segments
}

fn split_arguments(bytes: &[u8], open: usize) -> Option<(usize, Vec<Range<usize>>)> {
    let mut depth = 0usize;
    let mut args = Vec::new();
    let mut arg_start = open + 1;
    let mut i = open + 1;
    while i < bytes.len() {
        if let Some(next) = skip_literal(bytes, i) {
            i = next;
            continue;
        }
        match bytes[i] {
            b'(' | b'[' | b'{' => depth += 1,
            b')' if depth == 0 => {
                push_trimmed(bytes, arg_start..i, &mut args);
                return Some((i, args));
            }
            b')' | b']' | b'}' => depth = depth.checked_sub(1)?,
            b',' if depth == 0 => {
                push_trimmed(bytes, arg_start..i, &mut args);
                arg_start = i + 1;
            }
            _ => {}
        }
        i += 1;
    }
    None
}

fn push_trimmed(bytes: &[u8], range: Range<usize>, args: &mut Vec<Range<usize>>) {
    let mut start = range.start;
    let mut end = range.end;
    while start < end && bytes[start].is_ascii_whitespace() {
        start += 1;
    }
    while end > start && bytes[end - 1].is_ascii_whitespace() {
        end -= 1;
    }
    if start < end {
        args.push(start..end);
    }
}

/// If a string literal or comment starts at `i`, the offset just past it.
fn skip_literal(bytes: &[u8], i: usize) -> Option<usize> {
    match bytes[i] {
        quote @ (b'\'' | b'"') => {
            let mut j = i + 1;
            while j < bytes.len() {
                match bytes[j] {
                    b'\\' => j += 2,
                    c if c == quote => return Some(j + 1),
                    _ => j += 1,
                }
            }
            Some(bytes.len())
        }
        b'/' if bytes.get(i + 1) == Some(&b'/') => Some(line_end(bytes, i)),
        b'#' if bytes.get(i + 1) != Some(&b'[') => Some(line_end(bytes, i)),
        b'/' if bytes.get(i + 1) == Some(&b'*') => {
            let rest = &bytes[i + 2..];
            let end = rest
                .windows(2)
                .position(|w| w == b"*/")
                .map_or(bytes.len(), |pos| i + 2 + pos + 2);
            Some(end)
        }
        _ => None,
    }
}

fn line_end(bytes: &[u8], i: usize) -> usize {
    bytes[i..]
        .iter()
        .position(|&b| b == b'\n')
        .map_or(bytes.len(), |pos| i + pos)
}

fn at_word_start(bytes: &[u8], i: usize) -> bool {
    match i.checked_sub(1).map(|p| bytes[p]) {
        None => true,
        Some(prev) => !(prev.is_ascii_alphanumeric() || prev == b'_' || prev == b'$'),
    }
}

fn closer(open: u8) -> u8 {
    match open {
        b'(' => b')',
        b'[' => b']',
        _ => b'}',
    }
}
