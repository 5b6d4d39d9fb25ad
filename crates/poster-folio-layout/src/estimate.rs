//! Line estimation and page capacity, without a shaping pass.
//!
//! Heights are in canvas units: the canvas is `canvas_width` units wide and
//! as tall as the aspect ratio makes it.

use poster_folio::{marker_tokens, MarkerToken, StyleMetrics};
use serde::{Deserialize, Serialize};

/// Empirical constants of the estimation model.
///
/// None of these has a closed-form derivation; they were tuned by eye against
/// rendered posters. Calibrate against a real shaping engine before relying on
/// finer visual fidelity.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LayoutTuning {
    /// Normalized canvas width.
    pub canvas_width: f64,
    /// Share of the width available to text.
    pub usable_width_ratio: f64,
    /// Share of the height available to text.
    pub usable_height_ratio: f64,
    /// Average glyph advance as a multiple of font size.
    pub glyph_width_ratio: f64,
    /// Multiplier on estimated lines for variable glyph widths.
    pub line_inflation: f64,
    /// Title line height multiplier.
    pub title_line_height: f64,
    /// Fixed height of the metadata row and title spacing.
    pub title_chrome: f64,
    /// First page keeps at least this share of the usable height for body text.
    pub first_page_floor_ratio: f64,
    /// Per-paragraph allowance for ascenders/descenders, in lines.
    pub descender_buffer_lines: f64,
    /// Lines held back from the page edge when splitting.
    pub split_safety_lines: u32,
    /// Fewest lines worth splitting a paragraph for.
    pub min_split_lines: u32,
    /// Sentence breaks before this share of the split offset are ignored.
    pub punctuation_floor_ratio: f64,
}

impl Default for LayoutTuning {
    fn default() -> Self {
        Self {
            canvas_width: 1000.0,
            usable_width_ratio: 0.82,
            usable_height_ratio: 0.76,
            glyph_width_ratio: 1.2,
            line_inflation: 1.05,
            title_line_height: 1.4,
            title_chrome: 240.0,
            first_page_floor_ratio: 0.2,
            descender_buffer_lines: 0.3,
            split_safety_lines: 2,
            min_split_lines: 2,
            punctuation_floor_ratio: 0.4,
        }
    }
}

/// Chars that fit on one line: `floor(usable_width / (font_size * glyph_ratio))`, at least 1.
pub fn chars_per_line(usable_width: f64, font_size: f64, glyph_width_ratio: f64) -> usize {
    let per_line = (usable_width / (font_size * glyph_width_ratio)).floor();
    if per_line.is_finite() && per_line >= 1.0 {
        per_line as usize
    } else {
        1
    }
}

/// Visual lines a paragraph occupies, with the default 5% inflation.
///
/// An empty paragraph still takes one line so blank separator lines keep
/// their spacing.
pub fn estimate_visual_lines(paragraph: &str, chars_per_line: usize) -> usize {
    estimate_visual_lines_with(paragraph, chars_per_line, LayoutTuning::default().line_inflation)
}

/// [`estimate_visual_lines`] with an explicit inflation factor.
pub fn estimate_visual_lines_with(paragraph: &str, chars_per_line: usize, inflation: f64) -> usize {
    lines_for_visible_chars(visible_chars(paragraph), chars_per_line, inflation)
}

/// Chars that take width: everything except marker tokens.
pub fn visible_chars(paragraph: &str) -> usize {
    let marker_chars = marker_tokens(paragraph).count() * MarkerToken::LEN;
    paragraph.chars().count().saturating_sub(marker_chars)
}

/// Visual lines for a paragraph with `visible` width-taking chars. At least 1.
pub fn lines_for_visible_chars(visible: usize, chars_per_line: usize, inflation: f64) -> usize {
    let raw_lines = visible.div_ceil(chars_per_line.max(1));
    let inflated = (raw_lines as f64 * inflation).ceil();
    (inflated as usize).max(1)
}

/// Usable height for a canvas `base_height` units tall, with the default ratio.
pub fn usable_height(base_height: f64) -> f64 {
    base_height * LayoutTuning::default().usable_height_ratio
}

/// Derived geometry for one pagination run.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CanvasModel {
    tuning: LayoutTuning,
    usable_width: f64,
    usable_height: f64,
    chars_per_line: usize,
    title_block_height: f64,
    line_height_px: f64,
    paragraph_gap_px: f64,
}

impl CanvasModel {
    /// Derive geometry from validated style metrics.
    pub fn new(style: &StyleMetrics, tuning: LayoutTuning) -> Self {
        let usable_width = tuning.canvas_width * tuning.usable_width_ratio;
        let base_height = style.aspect_ratio.height_for_width(tuning.canvas_width);
        let usable_height = base_height * tuning.usable_height_ratio;

        let title_per_line =
            chars_per_line(usable_width, style.title_font_size, tuning.glyph_width_ratio);
        let title_lines = style.title_chars().div_ceil(title_per_line);
        let title_block_height = style.title_font_size * tuning.title_line_height
            * title_lines as f64
            + tuning.title_chrome;

        Self {
            tuning,
            usable_width,
            usable_height,
            chars_per_line: chars_per_line(usable_width, style.font_size, tuning.glyph_width_ratio),
            title_block_height,
            line_height_px: (style.font_size * style.line_height).max(f64::MIN_POSITIVE),
            paragraph_gap_px: style.font_size * style.paragraph_gap,
        }
    }

    /// Tuning constants in effect.
    pub fn tuning(&self) -> &LayoutTuning {
        &self.tuning
    }

    /// Text column width.
    pub fn usable_width(&self) -> f64 {
        self.usable_width
    }

    /// Text column height on a page without a title block.
    pub fn usable_height(&self) -> f64 {
        self.usable_height
    }

    /// Body chars per line.
    pub fn chars_per_line(&self) -> usize {
        self.chars_per_line
    }

    /// Height reserved for title and metadata on the first page.
    pub fn title_block_height(&self) -> f64 {
        self.title_block_height
    }

    /// Body line height.
    pub fn line_height_px(&self) -> f64 {
        self.line_height_px
    }

    /// Gap inserted before a paragraph that is not first on its page.
    pub fn paragraph_gap_px(&self) -> f64 {
        self.paragraph_gap_px
    }

    /// Vertical budget of a page.
    ///
    /// The first page loses the title block but always keeps
    /// `first_page_floor_ratio` of the usable height.
    pub fn page_capacity(&self, is_first: bool) -> f64 {
        if !is_first {
            return self.usable_height;
        }
        let floor = self.usable_height * self.tuning.first_page_floor_ratio;
        floor.max(self.usable_height - self.title_block_height)
    }

    /// Estimated visual lines of `paragraph` in the body column.
    pub fn visual_lines(&self, paragraph: &str) -> usize {
        estimate_visual_lines_with(paragraph, self.chars_per_line, self.tuning.line_inflation)
    }

    /// Height a paragraph adds to a page, gap and descender buffer included.
    pub fn effective_height(&self, paragraph: &str, page_has_content: bool) -> f64 {
        self.effective_height_for(visible_chars(paragraph), page_has_content)
    }

    /// [`effective_height`](Self::effective_height) from a known visible char count.
    pub fn effective_height_for(&self, visible: usize, page_has_content: bool) -> f64 {
        let lines =
            lines_for_visible_chars(visible, self.chars_per_line, self.tuning.line_inflation) as f64;
        let gap = if page_has_content {
            self.paragraph_gap_px
        } else {
            0.0
        };
        lines * self.line_height_px + gap + self.line_height_px * self.tuning.descender_buffer_lines
    }

    /// Whole lines that fit in `available`, minus the safety margin. May be negative.
    pub fn splittable_lines(&self, available: f64) -> i64 {
        (available / self.line_height_px).floor() as i64 - i64::from(self.tuning.split_safety_lines)
    }
}
