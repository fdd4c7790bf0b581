//! Colored line-by-line diff of the original vs modified document text.

use similar::{ChangeTag, TextDiff};

const RED: &str = "\x1b[31m";
const GREEN: &str = "\x1b[32m";
const RESET: &str = "\x1b[0m";

/// Renders a colored line diff: deletions prefixed `-` in red, insertions
/// `+` in green, unchanged runs of more than six lines elided to their
/// first and last three. Blank lines are skipped.
pub fn render_diff(original: &str, modified: &str) -> String {
    let diff = TextDiff::from_lines(original, modified);
    let mut out = String::new();
    let mut context: Vec<&str> = Vec::new();

    for change in diff.iter_all_changes() {
        let line = change.value().trim_end_matches('\n');
        match change.tag() {
            ChangeTag::Equal => context.push(line),
            ChangeTag::Delete => {
                flush_context(&mut out, &context);
                context.clear();
                push_line(&mut out, line, RED, '-');
            }
            ChangeTag::Insert => {
                flush_context(&mut out, &context);
                context.clear();
                push_line(&mut out, line, GREEN, '+');
            }
        }
    }
    flush_context(&mut out, &context);

    out
}

fn push_line(out: &mut String, line: &str, color: &str, sign: char) {
    if !line.is_empty() {
        out.push_str(color);
        out.push(sign);
        out.push_str(line);
        out.push_str(RESET);
        out.push('\n');
    }
}

fn flush_context(out: &mut String, lines: &[&str]) {
    if lines.len() <= 6 {
        for line in lines {
            push_context_line(out, line);
        }
        return;
    }

    for line in &lines[..3] {
        push_context_line(out, line);
    }
    out.push_str(" ...\n");
    for line in &lines[lines.len() - 3..] {
        push_context_line(out, line);
    }
}

fn push_context_line(out: &mut String, line: &str) {
    if !line.is_empty() {
        out.push(' ');
        out.push_str(line);
        out.push('\n');
    }
}
