//! Balanced-delimiter scanning.
//!
//! The one primitive everything else builds on: walk source text
//! tracking delimiter depth while skipping string literals (single,
//! double, and backtick quoted, with escapes) and `//`/`/* */`
//! comments. Skipped regions stay part of the returned slices; they are
//! only opaque to delimiter and stop-character matching.

/// Delimiter pairs honored while scanning.
#[derive(Debug, Clone, Copy)]
pub struct DelimTable {
    pairs: &'static [(char, char)],
}

impl DelimTable {
    fn is_open(&self, ch: char) -> bool {
        self.pairs.iter().any(|&(o, _)| o == ch)
    }

    fn is_close(&self, ch: char) -> bool {
        self.pairs.iter().any(|&(_, c)| c == ch)
    }
}

/// Code contexts: `()`, `[]`, `{}`.
pub const CODE_DELIMS: DelimTable = DelimTable {
    pairs: &[('(', ')'), ('[', ']'), ('{', '}')],
};

/// Type contexts: code pairs plus `<>` for generics.
pub const TYPE_DELIMS: DelimTable = DelimTable {
    pairs: &[('(', ')'), ('[', ']'), ('{', '}'), ('<', '>')],
};

fn close_for(open: char) -> Option<char> {
    match open {
        '(' => Some(')'),
        '[' => Some(']'),
        '{' => Some('}'),
        '<' => Some('>'),
        _ => None,
    }
}

/// Advance past a quoted literal. `start` is the byte offset of the
/// opening quote; returns the offset just past the closing quote, or
/// `src.len()` when unterminated.
fn skip_string(src: &str, start: usize, quote: char) -> usize {
    let mut iter = src[start..].char_indices();
    iter.next();
    let mut escaped = false;
    for (off, ch) in iter {
        if escaped {
            escaped = false;
            continue;
        }
        match ch {
            '\\' => escaped = true,
            c if c == quote => return start + off + c.len_utf8(),
            _ => {}
        }
    }
    src.len()
}

/// Advance past a comment starting at `start` (which points at `/`).
/// Returns `start + 1` when the slash is not actually a comment opener.
fn skip_comment(src: &str, start: usize) -> usize {
    let rest = &src[start..];
    if rest.starts_with("//") {
        match rest.find('\n') {
            Some(n) => start + n + 1,
            None => src.len(),
        }
    } else if rest.starts_with("/*") {
        match rest[2..].find("*/") {
            Some(n) => start + n + 4,
            None => src.len(),
        }
    } else {
        start + 1
    }
}

/// Inner region of the balanced pair opening at byte offset `at`.
///
/// `at` must point at one of `( [ { <`. Returns the text between the
/// opener and its matching closer, exclusive of both, or `None` when
/// the pair never closes.
pub fn extract_balanced(src: &str, at: usize) -> Option<&str> {
    let (content_start, close_idx) = scan_balanced(src, at)?;
    Some(&src[content_start..close_idx])
}

/// Byte offset of the closer matching the opener at `at`.
pub fn matching_close(src: &str, at: usize) -> Option<usize> {
    scan_balanced(src, at).map(|(_, close_idx)| close_idx)
}

fn scan_balanced(src: &str, at: usize) -> Option<(usize, usize)> {
    let open = src.get(at..)?.chars().next()?;
    let close = close_for(open)?;
    let content_start = at + open.len_utf8();

    let mut depth = 1usize;
    let mut prev: Option<char> = None;
    let mut i = content_start;
    while i < src.len() {
        let Some(ch) = src[i..].chars().next() else {
            break;
        };
        if matches!(ch, '\'' | '"' | '`') {
            i = skip_string(src, i, ch);
            prev = Some(ch);
            continue;
        }
        if ch == '/' {
            let after = skip_comment(src, i);
            if after > i + 1 {
                i = after;
                prev = None;
                continue;
            }
        }
        if ch == close {
            // `=>` inside a generic region is an arrow, not a closer.
            if !(close == '>' && prev == Some('=')) {
                depth -= 1;
                if depth == 0 {
                    return Some((content_start, i));
                }
            }
        } else if ch == open {
            depth += 1;
        }
        prev = Some(ch);
        i += ch.len_utf8();
    }
    None
}

/// Read from `from` until the first stop character at delimiter depth
/// zero. Returns the consumed slice and the byte offset of the stop (or
/// `src.len()` when no stop occurs).
pub fn read_until_unnested<'a>(
    src: &'a str,
    from: usize,
    stops: &[char],
    table: DelimTable,
) -> (&'a str, usize) {
    let mut depth = 0usize;
    let mut prev: Option<char> = None;
    let mut i = from;
    while i < src.len() {
        let Some(ch) = src[i..].chars().next() else {
            break;
        };
        if matches!(ch, '\'' | '"' | '`') {
            i = skip_string(src, i, ch);
            prev = Some(ch);
            continue;
        }
        if ch == '/' {
            let after = skip_comment(src, i);
            if after > i + 1 {
                i = after;
                prev = None;
                continue;
            }
        }
        if depth == 0 && stops.contains(&ch) {
            return (&src[from..i], i);
        }
        if table.is_open(ch) {
            depth += 1;
        } else if table.is_close(ch) && !(ch == '>' && prev == Some('=')) {
            depth = depth.saturating_sub(1);
        }
        prev = Some(ch);
        i += ch.len_utf8();
    }
    (&src[from..], src.len())
}

/// Split `src` on `sep` at delimiter depth zero. Empty pieces are kept;
/// callers trim and filter as needed.
pub fn split_top_level(src: &str, sep: char, table: DelimTable) -> Vec<&str> {
    let mut pieces = Vec::new();
    let mut from = 0;
    loop {
        let (piece, stop) = read_until_unnested(src, from, &[sep], table);
        pieces.push(piece);
        if stop >= src.len() {
            return pieces;
        }
        from = stop + sep.len_utf8();
    }
}
