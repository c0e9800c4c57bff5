//! Removal of marker-delimited blocks.
//!
//! A block starts at a line containing `cleanup:<tag>-start` and ends at the
//! next line containing `cleanup:<tag>-end`. Matching is by substring, so the
//! marker can sit inside any comment syntax (`//`, `{/* */}`, `#`).

/// Render the start-marker substring for `tag`.
pub fn start_marker(tag: &str) -> String {
    format!("cleanup:{tag}-start")
}

/// Render the end-marker substring for `tag`.
pub fn end_marker(tag: &str) -> String {
    format!("cleanup:{tag}-end")
}

/// Remove every block marked with `tag`, marker lines included.
///
/// Lines outside the blocks (including blocks of other tags) are kept in
/// their original order. A start marker seen while already removing keeps
/// removing; there is no nesting counter. A start marker that is never
/// closed removes everything up to the end of the content.
pub fn strip_marked_blocks(content: &str, tag: &str) -> String {
    let start = start_marker(tag);
    let end = end_marker(tag);

    let mut kept: Vec<&str> = Vec::new();
    let mut removing = false;
    for line in content.split('\n') {
        if line.contains(&start) {
            removing = true;
            continue;
        }
        if removing && line.contains(&end) {
            removing = false;
            continue;
        }
        if !removing {
            kept.push(line);
        }
    }
    kept.join("\n")
}

/// Return the 1-based line number of a `tag` start marker that is never closed.
///
/// Mirrors the scan in [`strip_marked_blocks`], so a reported line is exactly
/// where removal would run to the end of the content.
pub fn find_unterminated_block(content: &str, tag: &str) -> Option<usize> {
    let start = start_marker(tag);
    let end = end_marker(tag);

    let mut open_at = None;
    for (idx, line) in content.split('\n').enumerate() {
        if line.contains(&start) {
            // Re-entering keeps the first open marker as the culprit.
            open_at.get_or_insert(idx + 1);
            continue;
        }
        if open_at.is_some() && line.contains(&end) {
            open_at = None;
        }
    }
    open_at
}
