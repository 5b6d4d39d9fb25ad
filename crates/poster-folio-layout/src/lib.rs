//! Pagination engine for poster-folio.
//!
//! Takes raw text plus [`StyleMetrics`](poster_folio::StyleMetrics) and packs
//! paragraphs into pages of a fixed canvas, estimating line counts instead of
//! shaping text. Oversized paragraphs are split at sentence ends where
//! possible and never inside an inline marker span.
//!
//! ```
//! use poster_folio::StyleMetrics;
//! use poster_folio_layout::paginate;
//!
//! let style = StyleMetrics::with_title("周末读书笔记");
//! let result = paginate("第一段。\n第二段。", &style)?;
//! assert_eq!(result.len(), 1);
//! assert_eq!(result.pages[0].title.as_deref(), Some("周末读书笔记"));
//! # Ok::<(), poster_folio::PosterError>(())
//! ```

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

pub mod estimate;
pub mod page;
pub mod paginate;
pub mod split;

pub use estimate::{
    chars_per_line, estimate_visual_lines, estimate_visual_lines_with, lines_for_visible_chars,
    usable_height, visible_chars, CanvasModel, LayoutTuning,
};
pub use page::{Page, PageBreak, PageLayout, PaginationResult};
pub use paginate::{paginate, Paginator};
pub use split::{
    is_sentence_terminator, last_balanced_boundary, next_safe_boundary, resolve_safe_split,
    resolve_safe_split_with, split_paragraph, SENTENCE_TERMINATORS,
};
