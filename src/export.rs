//! File naming for exported page images.
//!
//! Rasterizing pages happens outside this workspace; these helpers only
//! decide what each exported file is called and in which order pages go out.

use core::fmt;

use serde::{Deserialize, Serialize};

const SLUG_MAX_CHARS: usize = 10;
const SLUG_FALLBACK: &str = "poster";

/// Calendar date stamped into export file names.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateStamp {
    pub year: u16,
    pub month: u8,
    pub day: u8,
}

impl DateStamp {
    /// Create a stamp. Values are not range-checked.
    pub const fn new(year: u16, month: u8, day: u8) -> Self {
        Self { year, month, day }
    }
}

impl fmt::Display for DateStamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}{:02}{:02}", self.year, self.month, self.day)
    }
}

/// Short filesystem-safe slug of a poster title.
///
/// Keeps the first ten chars, replacing anything other than ASCII
/// alphanumerics and common CJK ideographs with `_`.
pub fn slugify(title: &str) -> String {
    if title.is_empty() {
        return SLUG_FALLBACK.to_string();
    }
    title
        .chars()
        .take(SLUG_MAX_CHARS)
        .map(|ch| {
            if ch.is_ascii_alphanumeric() || ('\u{4e00}'..='\u{9fa5}').contains(&ch) {
                ch
            } else {
                '_'
            }
        })
        .collect()
}

/// `{date}_{slug}_P{n}.png` for the zero-based `page_index`.
pub fn export_file_name(date: DateStamp, title: &str, page_index: usize) -> String {
    format!("{}_{}_P{}.png", date, slugify(title), page_index + 1)
}

/// One page image to produce.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportTarget {
    /// Zero-based page index.
    pub page_index: usize,
    /// Suggested file name.
    pub file_name: String,
}

/// Export targets for `page_count` pages, last page first.
pub fn export_plan(page_count: usize, date: DateStamp, title: &str) -> Vec<ExportTarget> {
    (0..page_count)
        .rev()
        .map(|page_index| ExportTarget {
            page_index,
            file_name: export_file_name(date, title, page_index),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slug_keeps_cjk_and_ascii_alphanumerics() {
        assert_eq!(slugify("优质小红书审美排版指南"), "优质小红书审美排版指");
        assert_eq!(slugify("Hello, World!"), "Hello__Wor");
        assert_eq!(slugify(""), "poster");
        assert_eq!(slugify("a b"), "a_b");
    }

    #[test]
    fn date_stamp_is_zero_padded() {
        assert_eq!(DateStamp::new(2024, 3, 7).to_string(), "20240307");
    }

    #[test]
    fn file_names_are_one_based() {
        let date = DateStamp::new(2024, 12, 1);
        assert_eq!(export_file_name(date, "Guide", 0), "20241201_Guide_P1.png");
    }

    #[test]
    fn plan_runs_last_page_first() {
        let plan = export_plan(3, DateStamp::new(2024, 1, 2), "");
        let indices: Vec<_> = plan.iter().map(|t| t.page_index).collect();
        assert_eq!(indices, vec![2, 1, 0]);
        assert_eq!(plan[0].file_name, "20240102_poster_P3.png");
        assert!(export_plan(0, DateStamp::new(2024, 1, 2), "x").is_empty());
    }
}
