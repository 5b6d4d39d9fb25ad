//! Choosing where an oversized paragraph breaks.
//!
//! All offsets here count chars (Unicode scalar values), never bytes. A
//! boundary `b` is *balanced* when every marker opened in `paragraph[..b]` is
//! also closed there and `b` does not fall between the two chars of a token.

use poster_folio::{marker_tokens, MarkerState, MarkerToken};

/// Chars that end a sentence, CJK and ASCII.
pub const SENTENCE_TERMINATORS: [char; 11] =
    ['。', '！', '？', '；', '”', '』', '》', '.', '!', '?', ';'];

const DEFAULT_PUNCTUATION_FLOOR: f64 = 0.4;

/// Whether `ch` ends a sentence.
pub fn is_sentence_terminator(ch: char) -> bool {
    SENTENCE_TERMINATORS.contains(&ch)
}

/// Safe break offset at or before `raw_offset`.
///
/// Prefers the char after the nearest sentence terminator at or before
/// `raw_offset`, as long as that terminator sits past 40% of `raw_offset`.
/// The result is then walked back to the last balanced boundary, which may
/// be `0` when no safe break exists.
pub fn resolve_safe_split(paragraph: &str, raw_offset: usize) -> usize {
    resolve_safe_split_with(paragraph, raw_offset, DEFAULT_PUNCTUATION_FLOOR)
}

/// [`resolve_safe_split`] with an explicit punctuation floor ratio.
///
/// Reads at most `raw_offset + 2` chars of `paragraph`.
pub fn resolve_safe_split_with(paragraph: &str, raw_offset: usize, punctuation_floor: f64) -> usize {
    let candidate = sentence_break(paragraph, raw_offset, punctuation_floor).unwrap_or(raw_offset);
    let available = split_paragraph(paragraph, candidate).0.chars().count();
    last_balanced_boundary(paragraph, available)
}

fn sentence_break(paragraph: &str, raw_offset: usize, punctuation_floor: f64) -> Option<usize> {
    let idx = paragraph
        .chars()
        .take(raw_offset.saturating_add(1))
        .enumerate()
        .filter(|&(_, ch)| is_sentence_terminator(ch))
        .map(|(idx, _)| idx)
        .last()?;
    (idx as f64 > raw_offset as f64 * punctuation_floor).then_some(idx + 1)
}

/// Last balanced boundary `<= limit`. `0` is always balanced.
pub fn last_balanced_boundary(paragraph: &str, limit: usize) -> usize {
    // A token starting at `limit` or later never moves the result.
    let (window, _) = split_paragraph(paragraph, limit.saturating_add(1));
    let mut best = 0;
    let mut state = MarkerState::new();
    let mut segment_start = 0;
    for span in marker_tokens(window) {
        if state.is_balanced() && segment_start <= limit {
            best = limit.min(span.char_offset);
        }
        if span.char_offset >= limit {
            return best;
        }
        state.apply(span.token);
        segment_start = span.char_offset + MarkerToken::LEN;
    }
    if state.is_balanced() && segment_start <= limit {
        best = limit;
    }
    best
}

/// First balanced boundary `>= from`, or the paragraph length if there is none.
///
/// Scanning stops at the returned boundary, or at the first token after it.
pub fn next_safe_boundary(paragraph: &str, from: usize) -> usize {
    let from = split_paragraph(paragraph, from).0.chars().count();
    if last_balanced_boundary(paragraph, from) == from {
        return from;
    }
    let mut state = MarkerState::new();
    let mut segment_start = 0;
    for span in marker_tokens(paragraph) {
        let lo = segment_start.max(from);
        if state.is_balanced() && lo <= span.char_offset {
            return lo;
        }
        state.apply(span.token);
        segment_start = span.char_offset + MarkerToken::LEN;
        if state.is_balanced() && segment_start >= from {
            return segment_start;
        }
    }
    let len = paragraph.chars().count();
    let lo = segment_start.max(from);
    if state.is_balanced() && lo <= len {
        lo
    } else {
        len
    }
}

/// Split `paragraph` at a char offset. Offsets past the end yield `(paragraph, "")`.
pub fn split_paragraph(paragraph: &str, char_offset: usize) -> (&str, &str) {
    let byte = paragraph
        .char_indices()
        .nth(char_offset)
        .map_or(paragraph.len(), |(byte, _)| byte);
    paragraph.split_at(byte)
}

#[cfg(test)]
mod tests {
    use super::*;

    const MARKED: &str = "**重点**这是一段很长的句子。后面还有内容。";

    #[test]
    fn never_cuts_inside_an_open_span() {
        assert_eq!(resolve_safe_split(MARKED, 3), 0);
        assert_eq!(resolve_safe_split(MARKED, 1), 0);
    }

    #[test]
    fn prefers_sentence_end_past_floor() {
        let cut = resolve_safe_split(MARKED, 20);
        assert_eq!(cut, 16);
        let (head, tail) = split_paragraph(MARKED, cut);
        assert_eq!(head, "**重点**这是一段很长的句子。");
        assert_eq!(tail, "后面还有内容。");
    }

    #[test]
    fn early_terminator_is_ignored() {
        // Terminator at index 1 is not past 0.4 * 10, so the raw offset stands.
        let paragraph = "好。这是一段没有标点的很长的句子内容";
        assert_eq!(resolve_safe_split(paragraph, 10), 10);
    }

    #[test]
    fn terminator_exactly_at_raw_offset_is_used() {
        let paragraph = "abcdefghi.jklmnop";
        assert_eq!(resolve_safe_split(paragraph, 9), 10);
    }

    #[test]
    fn offset_past_end_clamps_to_length() {
        assert_eq!(resolve_safe_split("短句", 50), 2);
        assert_eq!(split_paragraph("短句", 50), ("短句", ""));
    }

    #[test]
    fn never_cuts_between_token_chars() {
        // Boundary 5 sits between the two '*' of the closer.
        assert_eq!(last_balanced_boundary("**ab**cd", 5), 0);
        assert_eq!(last_balanced_boundary("**ab**cd", 6), 6);
        assert_eq!(last_balanced_boundary("ab**cd**", 3), 2);
    }

    #[test]
    fn asymmetric_markers_track_depth() {
        let paragraph = "((外((内))还在))之后";
        // Inside the outer aside until offset 12.
        assert_eq!(last_balanced_boundary(paragraph, 9), 0);
        assert_eq!(last_balanced_boundary(paragraph, 13), 13);
    }

    #[test]
    fn interleaved_markers_stay_closed() {
        let paragraph = "**a==b**c==d";
        // Strong closes at 8 but highlight is still open there.
        assert_eq!(last_balanced_boundary(paragraph, 8), 0);
        assert_eq!(last_balanced_boundary(paragraph, 10), 0);
        assert_eq!(last_balanced_boundary(paragraph, 11), 11);
    }

    #[test]
    fn closed_aside_before_the_cut_is_kept_whole() {
        // Depth tracking sees `((注))` closed, so the break stays after the
        // sentence end instead of backing up to the opener.
        let paragraph = "((注))后文。继续写下去的内容很长";
        assert_eq!(last_balanced_boundary(paragraph, 6), 6);
        let cut = resolve_safe_split(paragraph, 10);
        assert_eq!(cut, 8);
        assert_eq!(split_paragraph(paragraph, cut).0, "((注))后文。");
        assert_eq!(resolve_safe_split("[[标签]]正文内容没有标点继续", 10), 10);
    }

    #[test]
    fn boundary_search_ignores_text_far_past_the_limit() {
        let mut paragraph = "前文".repeat(20);
        paragraph.push_str("**未闭合");
        // The unclosed opener sits past the window and cannot move the cut.
        assert_eq!(last_balanced_boundary(&paragraph, 30), 30);
        assert_eq!(resolve_safe_split(&paragraph, 30), 30);
        assert_eq!(next_safe_boundary(&paragraph, 30), 30);
        assert_eq!(next_safe_boundary(&paragraph, 41), 45);
    }

    #[test]
    fn unclosed_marker_blocks_later_cuts() {
        assert_eq!(last_balanced_boundary("ab**cdefg", 7), 2);
        assert_eq!(next_safe_boundary("ab**cdefg", 4), 9);
    }

    #[test]
    fn next_boundary_skips_forward_past_spans() {
        assert_eq!(next_safe_boundary(MARKED, 3), 6);
        assert_eq!(next_safe_boundary(MARKED, 8), 8);
        assert_eq!(next_safe_boundary("plain", 2), 2);
        assert_eq!(next_safe_boundary("plain", 99), 5);
    }

    #[test]
    fn split_is_char_based() {
        let (head, tail) = split_paragraph("重点内容", 2);
        assert_eq!(head, "重点");
        assert_eq!(tail, "内容");
        assert_eq!(split_paragraph("abc", 0), ("", "abc"));
    }

    #[test]
    fn terminator_set() {
        for ch in "。！？；”』》.!?;".chars() {
            assert!(is_sentence_terminator(ch), "{ch}");
        }
        assert!(!is_sentence_terminator('>'));
        assert!(!is_sentence_terminator('，'));
    }
}
