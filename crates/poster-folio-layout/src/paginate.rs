//! Greedy paragraph packing into fixed-height pages.

use std::collections::VecDeque;

use poster_folio::{normalize_line_endings, ContentStats, PosterError, StyleMetrics};

use crate::estimate::{visible_chars, CanvasModel, LayoutTuning};
use crate::page::{Page, PageBreak, PageLayout, PaginationResult};
use crate::split::{next_safe_boundary, resolve_safe_split_with, split_paragraph};

/// Splits text into poster pages for one set of style metrics.
#[derive(Clone, Debug)]
pub struct Paginator {
    style: StyleMetrics,
    canvas: CanvasModel,
}

impl Paginator {
    /// Create a paginator. Fails only if `style` does not validate.
    pub fn new(style: &StyleMetrics) -> Result<Self, PosterError> {
        style.validate()?;
        Ok(Self {
            style: style.clone(),
            canvas: CanvasModel::new(style, LayoutTuning::default()),
        })
    }

    /// Replace the estimation constants.
    pub fn with_tuning(mut self, tuning: LayoutTuning) -> Self {
        self.canvas = CanvasModel::new(&self.style, tuning);
        self
    }

    /// Style metrics in use.
    pub fn style(&self) -> &StyleMetrics {
        &self.style
    }

    /// Derived canvas geometry.
    pub fn canvas(&self) -> &CanvasModel {
        &self.canvas
    }

    /// Paginate `text` into an owned result.
    pub fn paginate(&self, text: &str) -> PaginationResult {
        let mut pages = Vec::new();
        let stats = self.paginate_with(text, |page| pages.push(page));
        PaginationResult { pages, stats }
    }

    /// Paginate `text`, handing each page to `on_page` as soon as it closes.
    pub fn paginate_with<F: FnMut(Page)>(&self, text: &str, mut on_page: F) -> ContentStats {
        let stats = ContentStats::measure(text);
        let normalized = normalize_line_endings(text);
        let mut run = PaginationRun::new(&self.canvas, &normalized);
        let mut index = 0;
        while let Some(draft) = run.next_page() {
            let is_first = index == 0;
            log::debug!(
                "page {} closed ({:?}): {} paragraphs, height {:.1}/{:.1}",
                index,
                draft.layout.page_break,
                draft.paragraphs.len(),
                draft.layout.used_height,
                draft.layout.capacity
            );
            on_page(Page {
                index,
                is_first,
                title: is_first.then(|| self.style.title.clone()),
                author: self.style.author.clone(),
                content: draft.paragraphs.join("\n"),
                content_length: stats.content_length,
                reading_time_minutes: stats.reading_time_minutes,
                layout: draft.layout,
            });
            index += 1;
        }
        stats
    }
}

/// Validate `style` and paginate `text` with default tuning.
pub fn paginate(text: &str, style: &StyleMetrics) -> Result<PaginationResult, PosterError> {
    Ok(Paginator::new(style)?.paginate(text))
}

/// Accumulates the current page.
#[derive(Debug, Default)]
struct PageBuilder {
    paragraphs: Vec<String>,
    height: f64,
}

impl PageBuilder {
    fn is_empty(&self) -> bool {
        self.paragraphs.is_empty()
    }

    fn push(&mut self, paragraph: String, height: f64) {
        self.paragraphs.push(paragraph);
        self.height += height;
    }

    /// Trailing split fragment; its height is not tracked.
    fn push_fragment(&mut self, fragment: &str) {
        self.paragraphs.push(fragment.to_string());
    }
}

/// Unplaced remainder of one source paragraph.
///
/// Splits advance `start` instead of copying the tail, and the visible char
/// count is carried forward so a long paragraph is measured once.
#[derive(Debug)]
struct Pending {
    text: String,
    start: usize,
    visible: usize,
}

impl Pending {
    fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
            start: 0,
            visible: visible_chars(text),
        }
    }

    fn rest(&self) -> &str {
        &self.text[self.start..]
    }

    /// Drop a placed head of `byte_len` bytes holding `visible` visible chars.
    fn advance(&mut self, byte_len: usize, visible: usize) {
        self.start += byte_len;
        self.visible = self.visible.saturating_sub(visible);
    }

    fn into_rest(mut self) -> String {
        self.text.drain(..self.start);
        self.text
    }
}

struct PageDraft {
    paragraphs: Vec<String>,
    layout: PageLayout,
}

struct PaginationRun<'c> {
    canvas: &'c CanvasModel,
    queue: VecDeque<Pending>,
    builder: PageBuilder,
    on_first_page: bool,
    capacity: f64,
}

impl<'c> PaginationRun<'c> {
    fn new(canvas: &'c CanvasModel, text: &str) -> Self {
        Self {
            canvas,
            queue: text.split('\n').map(Pending::new).collect(),
            builder: PageBuilder::default(),
            on_first_page: true,
            capacity: canvas.page_capacity(true),
        }
    }

    fn is_done(&self) -> bool {
        self.queue.is_empty() && self.builder.is_empty()
    }

    /// Advance until a page closes or input runs out.
    fn next_page(&mut self) -> Option<PageDraft> {
        while !self.is_done() {
            let Some(pending) = self.queue.pop_front() else {
                return Some(self.close_page(PageBreak::EndOfContent, false));
            };
            if let Some(draft) = self.place(pending) {
                return Some(draft);
            }
        }
        None
    }

    fn place(&mut self, pending: Pending) -> Option<PageDraft> {
        let has_content = !self.builder.is_empty();
        if !has_content && pending.rest().trim().is_empty() {
            log::trace!("skipping blank paragraph at page top");
            return None;
        }

        let height = self.canvas.effective_height_for(pending.visible, has_content);
        if self.builder.height + height <= self.capacity {
            log::trace!(
                "placed paragraph ({} visible chars, {:.1} high)",
                pending.visible,
                height
            );
            self.builder.push(pending.into_rest(), height);
            return None;
        }

        let gap = if has_content {
            self.canvas.paragraph_gap_px()
        } else {
            0.0
        };
        let available = self.capacity - self.builder.height - gap;
        let lines = self.canvas.splittable_lines(available);
        let tuning = *self.canvas.tuning();

        if lines < i64::from(tuning.min_split_lines) {
            if has_content {
                log::trace!("{} lines left, deferring paragraph", lines);
                self.queue.push_front(pending);
                return Some(self.close_page(PageBreak::Deferred, false));
            }
            return self.place_unsplittable(pending, None);
        }

        let raw_offset = usize::try_from(lines)
            .unwrap_or(0)
            .saturating_mul(self.canvas.chars_per_line());
        let cut = resolve_safe_split_with(pending.rest(), raw_offset, tuning.punctuation_floor_ratio);
        let (head, _) = split_paragraph(pending.rest(), cut);
        if !head.trim().is_empty() {
            log::trace!("split paragraph at char {} (raw {})", cut, raw_offset);
            return Some(self.emit_head(pending, cut, PageBreak::Split));
        }
        if has_content {
            log::trace!("no safe split before char {}, deferring paragraph", raw_offset);
            self.queue.push_front(pending);
            return Some(self.close_page(PageBreak::Deferred, false));
        }
        self.place_unsplittable(pending, Some(raw_offset))
    }

    /// `pending` cannot be placed on the current empty page by the normal rules.
    fn place_unsplittable(&mut self, pending: Pending, raw_offset: Option<usize>) -> Option<PageDraft> {
        if self.on_first_page {
            log::trace!("paragraph does not fit under the title block, moving to a full page");
            self.enter_full_page();
            self.queue.push_front(pending);
            return None;
        }

        let rest = pending.rest();
        let cut = raw_offset
            .map(|raw| next_safe_boundary(rest, raw))
            .filter(|&cut| !split_paragraph(rest, cut).0.trim().is_empty())
            .unwrap_or(usize::MAX);
        log::warn!(
            "paragraph has no break within page capacity {:.1}; placing {} chars on an overfull page",
            self.capacity,
            split_paragraph(rest, cut).0.chars().count()
        );
        Some(self.emit_head(pending, cut, PageBreak::Forced))
    }

    /// Put the first `cut` chars of `pending` on the page and close it.
    /// A non-blank tail goes back to the front of the queue.
    fn emit_head(&mut self, mut pending: Pending, cut: usize, page_break: PageBreak) -> PageDraft {
        let (head, tail) = split_paragraph(pending.rest(), cut);
        let continues = !tail.trim().is_empty();
        let (head_len, head_visible) = (head.len(), visible_chars(head));
        self.builder.push_fragment(head);
        if continues {
            pending.advance(head_len, head_visible);
            self.queue.push_front(pending);
        }
        self.close_page(page_break, continues)
    }

    fn enter_full_page(&mut self) {
        self.on_first_page = false;
        self.capacity = self.canvas.page_capacity(false);
    }

    fn close_page(&mut self, page_break: PageBreak, continues: bool) -> PageDraft {
        let builder = core::mem::take(&mut self.builder);
        let draft = PageDraft {
            paragraphs: builder.paragraphs,
            layout: PageLayout {
                capacity: self.capacity,
                used_height: builder.height,
                page_break,
                continues,
            },
        };
        self.enter_full_page();
        draft
    }
}
