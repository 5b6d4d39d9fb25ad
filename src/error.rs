//! Error types for poster-folio.
//!
//! Pagination itself is total; errors only come from invalid style input and
//! from the external exporter reporting back through [`PosterError::export_failed`].

use core::fmt;

/// Stable processing phases for typed failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorPhase {
    /// Style metrics / configuration validation.
    Config,
    /// Layout/pagination work.
    Layout,
    /// Page image export (performed outside this workspace).
    Export,
}

impl fmt::Display for ErrorPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config => write!(f, "config"),
            Self::Layout => write!(f, "layout"),
            Self::Export => write!(f, "export"),
        }
    }
}

/// Typed error with explicit processing phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PosterError {
    /// Stable processing phase.
    pub phase: ErrorPhase,
    /// Stable machine-readable code.
    pub code: &'static str,
    /// Human-readable message.
    pub message: Box<str>,
    /// Offending style field, when there is one.
    pub field: Option<&'static str>,
    /// Page the error relates to (export failures).
    pub page_index: Option<usize>,
}

impl PosterError {
    /// Create a typed error.
    pub fn new(phase: ErrorPhase, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            phase,
            code,
            message: message.into().into_boxed_str(),
            field: None,
            page_index: None,
        }
    }

    pub(crate) fn invalid_field(
        code: &'static str,
        field: &'static str,
        message: impl Into<String>,
    ) -> Self {
        Self::new(ErrorPhase::Config, code, message).with_field(field)
    }

    /// Report that rendering or rasterizing a page failed downstream.
    ///
    /// Pagination is stateless per call, so the caller can regenerate and retry.
    pub fn export_failed(page_index: usize, reason: impl Into<String>) -> Self {
        Self::new(ErrorPhase::Export, "export_failed", reason).with_page_index(page_index)
    }

    fn with_field(mut self, field: &'static str) -> Self {
        self.field = Some(field);
        self
    }

    fn with_page_index(mut self, page_index: usize) -> Self {
        self.page_index = Some(page_index);
        self
    }

    /// Whether retrying the same request can succeed.
    pub fn is_recoverable(&self) -> bool {
        matches!(self.phase, ErrorPhase::Export)
    }
}

impl fmt::Display for PosterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}: {}", self.phase, self.code, self.message)?;
        if let Some(field) = self.field {
            write!(f, " [field={}]", field)?;
        }
        if let Some(page_index) = self.page_index {
            write!(f, " [page_index={}]", page_index)?;
        }
        Ok(())
    }
}

impl std::error::Error for PosterError {}
