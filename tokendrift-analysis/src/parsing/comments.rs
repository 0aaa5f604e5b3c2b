//! Doc comment helpers: deprecation markers, descriptions, line mapping.

/// 1-based line number of a byte offset.
pub fn line_of_offset(src: &str, offset: usize) -> u32 {
    let clamped = offset.min(src.len());
    let newlines = src[..clamped].bytes().filter(|&b| b == b'\n').count();
    u32::try_from(newlines + 1).unwrap_or(u32::MAX)
}

/// True when a `@deprecated` marker appears in `text`.
pub fn contains_deprecated(text: &str) -> bool {
    text.contains("@deprecated")
}

/// Whether the declaration whose text starts at `offset` carries a
/// `@deprecated` marker in the comment block directly above it.
pub fn deprecated_above(src: &str, offset: usize) -> bool {
    raw_block_above(src, offset).is_some_and(contains_deprecated)
}

/// Cleaned text of the comment block directly above the line containing
/// `offset`: either a `/* */` block or a contiguous run of `//` lines.
/// Tag lines (`@param`, `@returns`, …) are dropped.
pub fn doc_block_above(src: &str, offset: usize) -> Option<String> {
    let raw = raw_block_above(src, offset)?;
    let cleaned = if raw.trim_start().starts_with("/*") {
        clean_doc_block(raw)
    } else {
        clean_line_comments(raw)
    };
    (!cleaned.is_empty()).then_some(cleaned)
}

/// Raw comment text directly above the line containing `offset`, or
/// `None` when the preceding non-blank text is not a comment.
fn raw_block_above(src: &str, offset: usize) -> Option<&str> {
    let clamped = offset.min(src.len());
    let line_start = src[..clamped].rfind('\n').map_or(0, |i| i + 1);
    let before = &src[..line_start];
    let above = before.trim_end();
    if above.is_empty() {
        return None;
    }
    // A blank line between the comment and the declaration breaks the
    // association.
    let gap = &before[above.len()..];
    if gap.bytes().filter(|&b| b == b'\n').count() > 1 {
        return None;
    }

    if above.ends_with("*/") {
        let open = above.rfind("/*")?;
        return Some(&above[open..]);
    }

    // Contiguous trailing run of // lines.
    let mut start = above.len();
    for line in above.lines().rev() {
        if !line.trim().starts_with("//") {
            break;
        }
        // offset of this line within `above`
        let line_offset = line.as_ptr() as usize - above.as_ptr() as usize;
        start = line_offset;
    }
    (start < above.len()).then(|| &above[start..])
}

/// Strip `/* */` syntax and per-line `*` gutters; drop `@tag` lines.
pub(crate) fn clean_doc_block(block: &str) -> String {
    let inner = block
        .trim()
        .trim_start_matches('/')
        .trim_start_matches('*')
        .trim_end_matches('/')
        .trim_end_matches('*');
    join_doc_lines(inner.lines().map(|line| line.trim().trim_start_matches('*')))
}

/// Strip `//` prefixes; drop `@tag` lines.
pub(crate) fn clean_line_comments(raw: &str) -> String {
    join_doc_lines(raw.lines().map(|line| line.trim().trim_start_matches('/')))
}

fn join_doc_lines<'a>(lines: impl Iterator<Item = &'a str>) -> String {
    let mut parts: Vec<&str> = Vec::new();
    for line in lines {
        let t = line.trim();
        if t.is_empty() || t.starts_with('@') {
            continue;
        }
        parts.push(t);
    }
    parts.join(" ")
}
