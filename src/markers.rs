//! Inline marker lexicon.
//!
//! Every marker is a doubled ASCII character. Nine kinds toggle with the same
//! token (`**bold**`); two use distinct open/close tokens (`((aside))`,
//! `[[badge]]`). Because no two kinds share a character, scanning all kinds in
//! one left-to-right pass finds exactly the occurrences a per-kind search would.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Closed set of inline marker kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkerKind {
    /// `**strong**`
    Strong,
    /// `==highlight==`
    Highlight,
    /// `!!alert!!`
    Alert,
    /// `~~strikethrough~~`
    Strikethrough,
    /// `__wavy underline__`
    Wavy,
    /// `""pull quote""`
    Quote,
    /// ``` ``code`` ```
    Code,
    /// `%%gradient%%`
    Gradient,
    /// `##dotted##`
    Dotted,
    /// `((aside))`
    Aside,
    /// `[[badge]]`
    Badge,
}

impl MarkerKind {
    /// All kinds in lexicon order.
    pub const ALL: [MarkerKind; 11] = [
        Self::Strong,
        Self::Highlight,
        Self::Alert,
        Self::Strikethrough,
        Self::Wavy,
        Self::Quote,
        Self::Code,
        Self::Gradient,
        Self::Dotted,
        Self::Aside,
        Self::Badge,
    ];

    /// Opening token.
    pub const fn open(self) -> &'static str {
        match self {
            Self::Strong => "**",
            Self::Highlight => "==",
            Self::Alert => "!!",
            Self::Strikethrough => "~~",
            Self::Wavy => "__",
            Self::Quote => "\"\"",
            Self::Code => "``",
            Self::Gradient => "%%",
            Self::Dotted => "##",
            Self::Aside => "((",
            Self::Badge => "[[",
        }
    }

    /// Closing token. Equal to [`open`](Self::open) for symmetric kinds.
    pub const fn close(self) -> &'static str {
        match self {
            Self::Aside => "))",
            Self::Badge => "]]",
            other => other.open(),
        }
    }

    /// Whether the same token opens and closes this kind.
    pub const fn is_symmetric(self) -> bool {
        !matches!(self, Self::Aside | Self::Badge)
    }

    /// Look up a kind by its opening token.
    pub fn from_open(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.open() == token)
    }

    /// Look up a kind by its closing token.
    pub fn from_close(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.close() == token)
    }
}

/// Returns `true` if `token` opens a marker span.
pub fn is_marker_open(token: &str) -> bool {
    MarkerKind::from_open(token).is_some()
}

/// Closing token for an opening token, or `None` if `open` is not a marker.
pub fn close_for(open: &str) -> Option<&'static str> {
    MarkerKind::from_open(open).map(MarkerKind::close)
}

/// What a token occurrence does to its kind's open state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TokenRole {
    /// Symmetric token: opens when closed, closes when open.
    Toggle,
    /// Asymmetric opener.
    Open,
    /// Asymmetric closer.
    Close,
}

/// One recognized marker token.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MarkerToken {
    /// Marker kind.
    pub kind: MarkerKind,
    /// Effect on the open state.
    pub role: TokenRole,
}

impl MarkerToken {
    /// Width of every token, in chars and in bytes.
    pub const LEN: usize = 2;

    fn from_char(ch: char) -> Option<Self> {
        let (kind, role) = match ch {
            '*' => (MarkerKind::Strong, TokenRole::Toggle),
            '=' => (MarkerKind::Highlight, TokenRole::Toggle),
            '!' => (MarkerKind::Alert, TokenRole::Toggle),
            '~' => (MarkerKind::Strikethrough, TokenRole::Toggle),
            '_' => (MarkerKind::Wavy, TokenRole::Toggle),
            '"' => (MarkerKind::Quote, TokenRole::Toggle),
            '`' => (MarkerKind::Code, TokenRole::Toggle),
            '%' => (MarkerKind::Gradient, TokenRole::Toggle),
            '#' => (MarkerKind::Dotted, TokenRole::Toggle),
            '(' => (MarkerKind::Aside, TokenRole::Open),
            ')' => (MarkerKind::Aside, TokenRole::Close),
            '[' => (MarkerKind::Badge, TokenRole::Open),
            ']' => (MarkerKind::Badge, TokenRole::Close),
            _ => return None,
        };
        Some(Self { kind, role })
    }
}

/// A token occurrence located in its source text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MarkerSpan {
    /// Offset of the first token char, counted in chars.
    pub char_offset: usize,
    /// Offset of the first token byte.
    pub byte_offset: usize,
    /// The token.
    pub token: MarkerToken,
}

/// Left-to-right, non-overlapping marker token scanner.
#[derive(Clone, Debug)]
pub struct MarkerTokens<'a> {
    chars: core::iter::Peekable<core::str::CharIndices<'a>>,
    char_offset: usize,
}

/// Scan `text` for marker tokens.
pub fn marker_tokens(text: &str) -> MarkerTokens<'_> {
    MarkerTokens {
        chars: text.char_indices().peekable(),
        char_offset: 0,
    }
}

impl Iterator for MarkerTokens<'_> {
    type Item = MarkerSpan;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((byte_offset, ch)) = self.chars.next() {
            let char_offset = self.char_offset;
            self.char_offset += 1;
            let Some(token) = MarkerToken::from_char(ch) else {
                continue;
            };
            if self.chars.peek().map(|&(_, next)| next) == Some(ch) {
                self.chars.next();
                self.char_offset += 1;
                return Some(MarkerSpan {
                    char_offset,
                    byte_offset,
                    token,
                });
            }
        }
        None
    }
}

/// Remove every marker token, keeping everything else verbatim.
pub fn strip_markers(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut cursor = 0;
    for span in marker_tokens(text) {
        out.push_str(&text[cursor..span.byte_offset]);
        cursor = span.byte_offset + MarkerToken::LEN;
    }
    out.push_str(&text[cursor..]);
    out
}

/// Running open/closed state across a token stream.
///
/// Symmetric kinds track parity; asymmetric kinds track depth. A stray
/// closer with nothing open is ignored.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MarkerState {
    open: SmallVec<[MarkerKind; 4]>,
}

impl MarkerState {
    /// Fresh state with nothing open.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one token into the state.
    pub fn apply(&mut self, token: MarkerToken) {
        match token.role {
            TokenRole::Toggle => match self.open.iter().rposition(|&k| k == token.kind) {
                Some(pos) => {
                    self.open.remove(pos);
                }
                None => self.open.push(token.kind),
            },
            TokenRole::Open => self.open.push(token.kind),
            TokenRole::Close => {
                if let Some(pos) = self.open.iter().rposition(|&k| k == token.kind) {
                    self.open.remove(pos);
                }
            }
        }
    }

    /// `true` when no marker is open.
    pub fn is_balanced(&self) -> bool {
        self.open.is_empty()
    }

    /// Whether `kind` is currently open.
    pub fn is_open(&self, kind: MarkerKind) -> bool {
        self.open.contains(&kind)
    }

    /// State after consuming every token in `text`.
    pub fn after(text: &str) -> Self {
        let mut state = Self::new();
        for span in marker_tokens(text) {
            state.apply(span.token);
        }
        state
    }
}
