//! Content length and reading-time metrics.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use crate::markers::strip_markers;

/// Reading speed used for poster metadata, in content chars per minute.
pub const READING_SPEED_CHARS_PER_MINUTE: u32 = 400;

/// Count renderable chars: markers and whitespace excluded.
pub fn count_content_length(text: &str) -> usize {
    strip_markers(text)
        .chars()
        .filter(|ch| !ch.is_whitespace())
        .count()
}

/// Minutes to read `length` content chars at the default speed.
///
/// `0` means "under a minute", not "no content".
pub fn estimate_reading_time(length: usize) -> u32 {
    estimate_reading_time_at(length, READING_SPEED_CHARS_PER_MINUTE)
}

/// Minutes to read `length` content chars at `chars_per_minute`.
pub fn estimate_reading_time_at(length: usize, chars_per_minute: u32) -> u32 {
    let speed = u64::from(chars_per_minute.max(1));
    let minutes = (length as u64).div_ceil(speed);
    u32::try_from(minutes).unwrap_or(u32::MAX)
}

/// Convert `\r\n` line endings to `\n`, borrowing when nothing changes.
pub fn normalize_line_endings(text: &str) -> Cow<'_, str> {
    if text.contains("\r\n") {
        Cow::Owned(text.replace("\r\n", "\n"))
    } else {
        Cow::Borrowed(text)
    }
}

/// Whole-document metrics shared by every page of a run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentStats {
    /// Renderable char count.
    pub content_length: usize,
    /// Estimated reading time in minutes.
    pub reading_time_minutes: u32,
}

impl ContentStats {
    /// Measure `text`.
    pub fn measure(text: &str) -> Self {
        let content_length = count_content_length(text);
        Self {
            content_length,
            reading_time_minutes: estimate_reading_time(content_length),
        }
    }
}
