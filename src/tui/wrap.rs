use unicode_segmentation::UnicodeSegmentation;

use crate::util::unicode;

/// Word-wrap `text` into lines of at most `width` cells.
///
/// Explicit newlines are kept. Words wider than `width` are broken at
/// grapheme boundaries. Whitespace at a break is dropped.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return vec![text.to_string()];
    }
    let mut lines = Vec::new();
    for logical in text.split('\n') {
        wrap_logical(logical.trim_end_matches('\r'), width, &mut lines);
    }
    lines
}

/// Like `wrap_text` but at most `max_lines`; the last kept line gets an
/// ellipsis when text was cut.
pub fn wrap_clamped(text: &str, width: usize, max_lines: usize) -> Vec<String> {
    let mut lines = wrap_text(text, width);
    if max_lines > 0 && lines.len() > max_lines {
        lines.truncate(max_lines);
        if let Some(last) = lines.last_mut() {
            let cut = unicode::truncate_to_width(last, width.saturating_sub(1));
            *last = format!("{}\u{2026}", cut.trim_end_matches('\u{2026}'));
        }
    }
    lines
}

fn wrap_logical(line: &str, width: usize, out: &mut Vec<String>) {
    if unicode::display_width(line) <= width {
        out.push(line.to_string());
        return;
    }

    let mut current = String::new();
    let mut col = 0;
    for word in line.split_word_bounds() {
        let is_space = word.chars().all(char::is_whitespace);
        let w = unicode::display_width(word);

        if col + w <= width {
            if !(is_space && col == 0) {
                current.push_str(word);
                col += w;
            }
            continue;
        }
        if is_space {
            out.push(std::mem::take(&mut current).trim_end().to_string());
            col = 0;
            continue;
        }
        if col > 0 && w <= width {
            out.push(std::mem::take(&mut current).trim_end().to_string());
            current.push_str(word);
            col = w;
            continue;
        }
        // Word longer than a whole line: break it by graphemes
        for g in word.graphemes(true) {
            let gw = unicode::display_width(g);
            if col + gw > width && col > 0 {
                out.push(std::mem::take(&mut current));
                col = 0;
            }
            current.push_str(g);
            col += gw;
        }
    }
    if !current.is_empty() || out.is_empty() {
        out.push(current.trim_end().to_string());
    }
}
