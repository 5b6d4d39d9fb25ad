//! Paginated output.

use poster_folio::ContentStats;
use serde::{Deserialize, Serialize};

/// Why a page ended where it did.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageBreak {
    /// Input ran out.
    EndOfContent,
    /// A paragraph was split; the page ends with its head.
    Split,
    /// The next paragraph did not fit and moved to the next page whole.
    Deferred,
    /// An oversized paragraph with no usable break was placed on an otherwise
    /// empty page. The page may overflow its capacity.
    Forced,
}

/// Layout diagnostics for one page.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PageLayout {
    /// Vertical budget the page was filled against.
    pub capacity: f64,
    /// Estimated height of the whole paragraphs placed. A trailing split
    /// fragment is not counted.
    pub used_height: f64,
    /// How the page ended.
    pub page_break: PageBreak,
    /// The last paragraph continues at the top of the next page.
    pub continues: bool,
}

/// One rendered-to-be poster page.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Page {
    /// Zero-based position in the output.
    pub index: usize,
    /// `true` only for index 0; the renderer draws the title block there.
    pub is_first: bool,
    /// Poster title, present on the first page only.
    pub title: Option<String>,
    /// Author line, repeated on every page.
    pub author: Option<String>,
    /// Paragraphs joined with `\n`.
    pub content: String,
    /// Visible char count of the whole input.
    pub content_length: usize,
    /// Reading time of the whole input.
    pub reading_time_minutes: u32,
    /// Layout diagnostics.
    pub layout: PageLayout,
}

impl Page {
    /// Paragraphs on this page.
    pub fn paragraphs(&self) -> impl Iterator<Item = &str> + '_ {
        self.content.split('\n')
    }
}

/// Result of paginating one text.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PaginationResult {
    /// Pages in order. Empty for blank input.
    pub pages: Vec<Page>,
    /// Statistics over the whole input.
    pub stats: ContentStats,
}

impl PaginationResult {
    /// Number of pages.
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    /// `true` when the input produced no pages.
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Iterate pages.
    pub fn iter(&self) -> core::slice::Iter<'_, Page> {
        self.pages.iter()
    }

    /// Page contents in order.
    pub fn page_texts(&self) -> impl Iterator<Item = &str> + '_ {
        self.pages.iter().map(|page| page.content.as_str())
    }
}

impl<'a> IntoIterator for &'a PaginationResult {
    type Item = &'a Page;
    type IntoIter = core::slice::Iter<'a, Page>;

    fn into_iter(self) -> Self::IntoIter {
        self.pages.iter()
    }
}

impl IntoIterator for PaginationResult {
    type Item = Page;
    type IntoIter = std::vec::IntoIter<Page>;

    fn into_iter(self) -> Self::IntoIter {
        self.pages.into_iter()
    }
}
