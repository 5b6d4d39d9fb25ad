//! Marker lexicon, content metrics, and style model for paginated text posters.
//!
//! This crate holds the text-side building blocks. Pagination itself lives in
//! `poster-folio-layout`, which consumes these types.

#![cfg_attr(
    not(test),
    deny(
        clippy::disallowed_methods,
        clippy::expect_used,
        clippy::unwrap_used,
        clippy::panic,
        clippy::panic_in_result_fn,
        clippy::todo,
        clippy::unimplemented
    )
)]

pub mod error;
pub mod export;
pub mod markers;
pub mod metrics;
pub mod style;

pub use error::{ErrorPhase, PosterError};
pub use export::{export_file_name, export_plan, slugify, DateStamp, ExportTarget};
pub use markers::{
    close_for, is_marker_open, marker_tokens, strip_markers, MarkerKind, MarkerSpan, MarkerState,
    MarkerToken, MarkerTokens, TokenRole,
};
pub use metrics::{
    count_content_length, estimate_reading_time, estimate_reading_time_at,
    normalize_line_endings, ContentStats, READING_SPEED_CHARS_PER_MINUTE,
};
pub use style::{AspectRatio, StyleMetrics, StyleOverrides, StylePreset};
