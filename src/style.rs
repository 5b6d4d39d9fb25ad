//! Style metrics consumed by pagination.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PosterError;

/// Canvas aspect ratio, width to height.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AspectRatio {
    /// Named `"3:4"` portrait card.
    #[default]
    ThreeByFour,
    /// Named `"9:16"` story format.
    NineBySixteen,
    /// Explicit width/height pair (the `"custom"` ratio).
    Custom {
        /// Relative width.
        width: f64,
        /// Relative height.
        height: f64,
    },
}

impl AspectRatio {
    /// Relative `(width, height)`.
    pub fn dimensions(self) -> (f64, f64) {
        match self {
            Self::ThreeByFour => (3.0, 4.0),
            Self::NineBySixteen => (9.0, 16.0),
            Self::Custom { width, height } => (width, height),
        }
    }

    /// Canvas height for a canvas `width` units wide.
    pub fn height_for_width(self, width: f64) -> f64 {
        let (w, h) = self.dimensions();
        width / w * h
    }

    /// Build from the caller's ratio name plus the custom dimensions, which
    /// are only consulted when `name` is `"custom"`.
    pub fn from_parts(name: &str, custom_width: f64, custom_height: f64) -> Result<Self, PosterError> {
        if name.trim().eq_ignore_ascii_case("custom") {
            let ratio = Self::Custom {
                width: custom_width,
                height: custom_height,
            };
            ratio.validate()?;
            return Ok(ratio);
        }
        name.parse()
    }

    /// Check custom dimensions are positive and finite.
    pub fn validate(self) -> Result<(), PosterError> {
        let (w, h) = self.dimensions();
        if !(w.is_finite() && h.is_finite() && w > 0.0 && h > 0.0) {
            return Err(PosterError::invalid_field(
                "invalid_aspect_ratio",
                "aspect_ratio",
                format!("aspect ratio dimensions must be positive, got {}:{}", w, h),
            ));
        }
        Ok(())
    }
}

impl FromStr for AspectRatio {
    type Err = PosterError;

    /// Parses `"3:4"`, `"9:16"`, or any other positive `"W:H"` pair.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        match s {
            "3:4" => return Ok(Self::ThreeByFour),
            "9:16" => return Ok(Self::NineBySixteen),
            _ => {}
        }
        let invalid = || {
            PosterError::invalid_field(
                "invalid_aspect_ratio",
                "aspect_ratio",
                format!("expected \"3:4\", \"9:16\" or \"W:H\", got {:?}", s),
            )
        };
        let (w, h) = s.split_once(':').ok_or_else(invalid)?;
        let width = w.trim().parse::<f64>().map_err(|_| invalid())?;
        let height = h.trim().parse::<f64>().map_err(|_| invalid())?;
        let ratio = Self::Custom { width, height };
        ratio.validate()?;
        Ok(ratio)
    }
}

impl fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ThreeByFour => write!(f, "3:4"),
            Self::NineBySixteen => write!(f, "9:16"),
            Self::Custom { width, height } => write!(f, "{}:{}", width, height),
        }
    }
}

/// Style metrics for one pagination run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StyleMetrics {
    /// Body font size in canvas units.
    pub font_size: f64,
    /// Title font size in canvas units.
    pub title_font_size: f64,
    /// Line height multiplier.
    pub line_height: f64,
    /// Paragraph gap multiplier of `font_size`.
    pub paragraph_gap: f64,
    /// Canvas aspect ratio.
    pub aspect_ratio: AspectRatio,
    /// Title shown on the first page.
    pub title: String,
    /// Author shown in every page's metadata row.
    pub author: Option<String>,
    /// First-line indentation; passed through to the renderer.
    pub use_indentation: bool,
}

impl Default for StyleMetrics {
    fn default() -> Self {
        Self {
            font_size: 22.0,
            title_font_size: 52.0,
            line_height: 1.8,
            paragraph_gap: 1.6,
            aspect_ratio: AspectRatio::ThreeByFour,
            title: String::new(),
            author: None,
            use_indentation: true,
        }
    }
}

impl StyleMetrics {
    /// Default metrics with a title.
    pub fn with_title(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Metrics from a built-in preset.
    pub fn from_preset(preset: &StylePreset, title: impl Into<String>) -> Self {
        let mut style = Self::with_title(title);
        preset.apply_to(&mut style);
        style
    }

    /// Title length in chars.
    pub fn title_chars(&self) -> usize {
        self.title.chars().count()
    }

    /// Check the invariants pagination relies on.
    pub fn validate(&self) -> Result<(), PosterError> {
        if !(self.font_size.is_finite() && self.font_size > 0.0) {
            return Err(PosterError::invalid_field(
                "invalid_font_size",
                "font_size",
                format!("font size must be positive, got {}", self.font_size),
            ));
        }
        if !(self.title_font_size.is_finite() && self.title_font_size > 0.0) {
            return Err(PosterError::invalid_field(
                "invalid_title_font_size",
                "title_font_size",
                format!("title font size must be positive, got {}", self.title_font_size),
            ));
        }
        if !(self.line_height.is_finite() && self.line_height > 0.0) {
            return Err(PosterError::invalid_field(
                "invalid_line_height",
                "line_height",
                format!("line height must be positive, got {}", self.line_height),
            ));
        }
        if !(self.paragraph_gap.is_finite() && self.paragraph_gap >= 0.0) {
            return Err(PosterError::invalid_field(
                "invalid_paragraph_gap",
                "paragraph_gap",
                format!("paragraph gap must be non-negative, got {}", self.paragraph_gap),
            ));
        }
        self.aspect_ratio.validate()
    }
}

/// Built-in layout preset: the metric half of a poster theme.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StylePreset {
    /// Stable identifier.
    pub id: &'static str,
    /// Display name.
    pub name: &'static str,
    /// Grouping shown in pickers.
    pub category: &'static str,
    /// Body font size.
    pub font_size: f64,
    /// Title font size.
    pub title_font_size: f64,
    /// Line height multiplier.
    pub line_height: f64,
    /// Paragraph gap multiplier.
    pub paragraph_gap: f64,
}

impl StylePreset {
    /// Presets shipped with the library. All use the 3:4 canvas with indentation.
    pub const BUILT_IN: &'static [StylePreset] = &[
        StylePreset::new("xhs-1", "Dopamine Pink", "social", 22.0, 54.0, 1.8, 1.6),
        StylePreset::new("xhs-2", "Morandi Green", "social", 21.0, 50.0, 1.7, 1.5),
        StylePreset::new("xhs-3", "Minimal White", "social", 22.0, 52.0, 1.8, 1.6),
        StylePreset::new("xhs-4", "Premium Grey", "social", 21.0, 48.0, 1.7, 1.5),
        StylePreset::new("default-1", "Classic Editorial", "professional", 22.0, 48.0, 1.8, 1.5),
        StylePreset::new("default-2", "Modern Minimal", "professional", 20.0, 42.0, 1.6, 1.2),
        StylePreset::new("default-3", "Night Reflection", "professional", 24.0, 52.0, 1.9, 1.8),
        StylePreset::new("default-4", "Greyscale", "professional", 21.0, 44.0, 1.7, 1.4),
        StylePreset::new("default-5", "Strawberry Cream", "cute", 24.0, 50.0, 1.7, 1.4),
        StylePreset::new("default-6", "Butter Yellow", "cute", 23.0, 48.0, 1.6, 1.3),
        StylePreset::new("default-cute-3", "Peach Sweetheart", "cute", 22.0, 46.0, 1.8, 1.5),
        StylePreset::new("default-cute-4", "Mint Soda", "cute", 22.0, 46.0, 1.8, 1.5),
        StylePreset::new("default-7", "Lazy Afternoon", "relaxed", 22.0, 46.0, 1.9, 1.6),
        StylePreset::new("default-8", "Sea Breeze", "relaxed", 21.0, 44.0, 1.7, 1.4),
        StylePreset::new("default-relaxed-3", "Morning Coffee", "relaxed", 22.0, 46.0, 1.8, 1.5),
        StylePreset::new("default-relaxed-4", "Dusk Forest", "relaxed", 22.0, 46.0, 1.8, 1.5),
        StylePreset::new("default-retro-1", "Parchment Scroll", "retro", 22.0, 48.0, 1.8, 1.5),
        StylePreset::new("default-retro-2", "Film Era", "retro", 21.0, 44.0, 1.7, 1.4),
        StylePreset::new("default-retro-3", "Front Page", "retro", 20.0, 52.0, 1.6, 1.2),
        StylePreset::new("default-retro-4", "Golden Age", "retro", 22.0, 48.0, 1.8, 1.5),
        StylePreset::new("default-art-1", "Ink Wash", "art", 24.0, 56.0, 2.0, 2.0),
        StylePreset::new("default-art-2", "Aurora", "art", 21.0, 46.0, 1.7, 1.4),
        StylePreset::new("default-art-3", "Neon City", "art", 20.0, 48.0, 1.6, 1.2),
        StylePreset::new("default-art-4", "White Space", "art", 18.0, 36.0, 2.2, 1.8),
    ];

    const fn new(
        id: &'static str,
        name: &'static str,
        category: &'static str,
        font_size: f64,
        title_font_size: f64,
        line_height: f64,
        paragraph_gap: f64,
    ) -> Self {
        Self {
            id,
            name,
            category,
            font_size,
            title_font_size,
            line_height,
            paragraph_gap,
        }
    }

    /// Look up a built-in preset.
    pub fn by_id(id: &str) -> Option<&'static StylePreset> {
        Self::BUILT_IN.iter().find(|preset| preset.id == id)
    }

    /// Overwrite the metric fields of `style`, keeping title and author.
    pub fn apply_to(&self, style: &mut StyleMetrics) {
        style.font_size = self.font_size;
        style.title_font_size = self.title_font_size;
        style.line_height = self.line_height;
        style.paragraph_gap = self.paragraph_gap;
        style.aspect_ratio = AspectRatio::ThreeByFour;
        style.use_indentation = true;
    }
}

/// Partial style, e.g. loaded from a JSON file.
///
/// Field names follow the poster editor's camelCase config, so a full editor
/// config (colors and fonts included) deserializes with the extra keys ignored.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StyleOverrides {
    pub title: Option<String>,
    pub author: Option<String>,
    pub font_size: Option<f64>,
    pub title_font_size: Option<f64>,
    pub line_height: Option<f64>,
    pub paragraph_gap: Option<f64>,
    pub use_indentation: Option<bool>,
    /// `"3:4"`, `"9:16"`, `"custom"` or `"W:H"`.
    pub aspect_ratio: Option<String>,
    pub custom_width: Option<f64>,
    pub custom_height: Option<f64>,
}

impl StyleOverrides {
    /// Layer these overrides onto `style` and re-validate.
    pub fn apply_to(&self, style: &mut StyleMetrics) -> Result<(), PosterError> {
        if let Some(title) = &self.title {
            style.title = title.clone();
        }
        if let Some(author) = &self.author {
            style.author = Some(author.clone()).filter(|a| !a.trim().is_empty());
        }
        if let Some(v) = self.font_size {
            style.font_size = v;
        }
        if let Some(v) = self.title_font_size {
            style.title_font_size = v;
        }
        if let Some(v) = self.line_height {
            style.line_height = v;
        }
        if let Some(v) = self.paragraph_gap {
            style.paragraph_gap = v;
        }
        if let Some(v) = self.use_indentation {
            style.use_indentation = v;
        }
        match (&self.aspect_ratio, self.custom_width, self.custom_height) {
            (Some(name), w, h) => {
                let (cur_w, cur_h) = style.aspect_ratio.dimensions();
                style.aspect_ratio =
                    AspectRatio::from_parts(name, w.unwrap_or(cur_w), h.unwrap_or(cur_h))?;
            }
            (None, Some(width), Some(height)) => {
                style.aspect_ratio = AspectRatio::Custom { width, height };
            }
            (None, Some(_), None) | (None, None, Some(_)) => {
                log::warn!(
                    "custom canvas needs both width and height; keeping {}",
                    style.aspect_ratio
                );
            }
            (None, None, None) => {}
        }
        style.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorPhase;

    #[test]
    fn named_ratios_parse() {
        assert_eq!("3:4".parse::<AspectRatio>().unwrap(), AspectRatio::ThreeByFour);
        assert_eq!(" 9:16 ".parse::<AspectRatio>().unwrap(), AspectRatio::NineBySixteen);
        assert_eq!(
            "2:3".parse::<AspectRatio>().unwrap(),
            AspectRatio::Custom {
                width: 2.0,
                height: 3.0
            }
        );
    }

    #[test]
    fn bad_ratios_are_rejected() {
        for bad in ["custom", "3x4", "0:4", "3:-1", "a:b", ""] {
            let err = bad.parse::<AspectRatio>().unwrap_err();
            assert_eq!(err.code, "invalid_aspect_ratio", "input {:?}", bad);
            assert_eq!(err.phase, ErrorPhase::Config);
        }
    }

    #[test]
    fn custom_three_by_four_matches_named_height() {
        let custom = AspectRatio::from_parts("custom", 3.0, 4.0).unwrap();
        assert_eq!(
            custom.height_for_width(1000.0),
            AspectRatio::ThreeByFour.height_for_width(1000.0)
        );
        assert_eq!(
            AspectRatio::from_parts("9:16", 3.0, 4.0).unwrap(),
            AspectRatio::NineBySixteen
        );
    }

    #[test]
    fn validate_rejects_non_positive_metrics() {
        let mut style = StyleMetrics::default();
        assert!(style.validate().is_ok());

        style.font_size = 0.0;
        assert_eq!(style.validate().unwrap_err().code, "invalid_font_size");

        style = StyleMetrics {
            line_height: -1.0,
            ..StyleMetrics::default()
        };
        assert_eq!(style.validate().unwrap_err().field, Some("line_height"));

        style = StyleMetrics {
            paragraph_gap: f64::NAN,
            ..StyleMetrics::default()
        };
        assert_eq!(style.validate().unwrap_err().code, "invalid_paragraph_gap");

        style = StyleMetrics {
            paragraph_gap: 0.0,
            ..StyleMetrics::default()
        };
        assert!(style.validate().is_ok());
    }

    #[test]
    fn presets_are_valid_and_unique() {
        for preset in StylePreset::BUILT_IN {
            let style = StyleMetrics::from_preset(preset, "t");
            assert!(style.validate().is_ok(), "preset {}", preset.id);
            assert_eq!(
                StylePreset::BUILT_IN
                    .iter()
                    .filter(|p| p.id == preset.id)
                    .count(),
                1
            );
        }
        assert_eq!(StylePreset::by_id("default-2").map(|p| p.font_size), Some(20.0));
        assert!(StylePreset::by_id("missing").is_none());
    }

    #[test]
    fn preset_table_covers_every_theme() {
        assert_eq!(StylePreset::BUILT_IN.len(), 24);
        for category in ["social", "professional", "cute", "relaxed", "retro", "art"] {
            assert_eq!(
                StylePreset::BUILT_IN
                    .iter()
                    .filter(|p| p.category == category)
                    .count(),
                4,
                "category {}",
                category
            );
        }

        let ink = StylePreset::by_id("default-art-1").unwrap();
        assert_eq!(
            (ink.font_size, ink.title_font_size, ink.line_height, ink.paragraph_gap),
            (24.0, 56.0, 2.0, 2.0)
        );
        let front_page = StylePreset::by_id("default-retro-3").unwrap();
        assert_eq!(
            (
                front_page.font_size,
                front_page.title_font_size,
                front_page.line_height,
                front_page.paragraph_gap
            ),
            (20.0, 52.0, 1.6, 1.2)
        );
    }

    #[test]
    fn overrides_accept_editor_config_json() {
        let json = r##"{
            "title": "Guide",
            "themeColor": "#ffffff",
            "fontSize": 20,
            "lineHeight": 1.6,
            "aspectRatio": "custom",
            "customWidth": 3,
            "customHeight": 4
        }"##;
        let overrides: StyleOverrides = serde_json::from_str(json).unwrap();
        let mut style = StyleMetrics::default();
        overrides.apply_to(&mut style).unwrap();
        assert_eq!(style.title, "Guide");
        assert_eq!(style.font_size, 20.0);
        assert_eq!(style.line_height, 1.6);
        assert_eq!(
            style.aspect_ratio,
            AspectRatio::Custom {
                width: 3.0,
                height: 4.0
            }
        );
    }

    #[test]
    fn overrides_surface_validation_errors() {
        let overrides = StyleOverrides {
            font_size: Some(-3.0),
            ..StyleOverrides::default()
        };
        let mut style = StyleMetrics::default();
        assert_eq!(
            overrides.apply_to(&mut style).unwrap_err().code,
            "invalid_font_size"
        );
    }
}
