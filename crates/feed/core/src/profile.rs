//! Feed profile: the category set, colour table, templates and time format.
//!
//! A profile is pure configuration. The same runtime can simulate different
//! feeds by swapping profiles instead of code paths.
use std::collections::HashSet;
use std::fmt;

use strum::{Display, EnumString};

use crate::error::ProfileError;
use crate::state::ItemId;

const CATEGORY_PLACEHOLDER: &str = "{category}";
const ID_PLACEHOLDER: &str = "{id}";

/// Opaque colour token handed to presentation layers (ARGB).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ColorToken(pub u32);

impl ColorToken {
    pub const INDIGO: Self = Self(0xFF3F_51B5);
    pub const PINK: Self = Self(0xFFE9_1E63);
    pub const TEAL: Self = Self(0xFF00_9688);
    pub const ORANGE: Self = Self(0xFFFF_9800);
    pub const GREEN: Self = Self(0xFF4C_AF50);

    /// `#RRGGBB`, alpha dropped.
    pub fn hex_rgb(self) -> String {
        format!("#{:06X}", self.0 & 0x00FF_FFFF)
    }
}

impl fmt::Display for ColorToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.hex_rgb())
    }
}

/// Clock rendering for [`crate::DisplayItem::time_formatted`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum TimeFormat {
    /// `HH:MM`
    #[default]
    HourMinute,
    /// `HH:MM:SS`
    HourMinuteSecond,
}

impl TimeFormat {
    pub const fn pattern(self) -> &'static str {
        match self {
            TimeFormat::HourMinute => "%H:%M",
            TimeFormat::HourMinuteSecond => "%H:%M:%S",
        }
    }
}

/// A category and its colour. Categories without a colour use
/// [`FeedProfile::default_color`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CategoryStyle {
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub color: Option<ColorToken>,
}

impl CategoryStyle {
    pub fn new(name: impl Into<String>, color: Option<ColorToken>) -> Self {
        Self {
            name: name.into(),
            color,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FeedProfile {
    pub categories: Vec<CategoryStyle>,
    pub default_color: ColorToken,
    /// Headline templates; `{category}` is replaced by the category name.
    pub title_templates: Vec<String>,
    /// Detail body; `{id}` is replaced by the bare item number.
    pub detail_template: String,
    pub time_format: TimeFormat,
    /// Fixed offset for time rendering. `None` renders in local time.
    pub utc_offset_minutes: Option<i32>,
}

impl Default for FeedProfile {
    fn default() -> Self {
        Self {
            categories: vec![
                CategoryStyle::new("Teknologi", Some(ColorToken::INDIGO)),
                CategoryStyle::new("Olahraga", Some(ColorToken::PINK)),
                CategoryStyle::new("Bisnis", Some(ColorToken::TEAL)),
                CategoryStyle::new("Politik", Some(ColorToken::ORANGE)),
                CategoryStyle::new("Kesehatan", None),
            ],
            default_color: ColorToken::GREEN,
            title_templates: vec![
                "Inovasi Terbaru di Sektor {category}".into(),
                "Tren Global {category} Tahun 2026".into(),
                "Laporan Khusus: Perkembangan {category}".into(),
                "Pendapat Ahli Mengenai {category}".into(),
                "Update Strategis Industri {category}".into(),
            ],
            detail_template: "Detail lengkap berita #{id}: Berita ini merangkum perkembangan \
                terbaru yang terjadi secara signifikan. Analisis menunjukkan bahwa dampak \
                jangka panjang akan mulai terlihat dalam beberapa bulan ke depan."
                .into(),
            time_format: TimeFormat::HourMinute,
            utc_offset_minutes: None,
        }
    }
}

impl FeedProfile {
    pub fn validate(&self) -> Result<(), ProfileError> {
        if self.categories.is_empty() {
            return Err(ProfileError::NoCategories);
        }
        if self.title_templates.is_empty() {
            return Err(ProfileError::NoTitleTemplates);
        }

        let mut seen = HashSet::new();
        for category in &self.categories {
            if category.name.trim().is_empty() {
                return Err(ProfileError::EmptyCategoryName);
            }
            if !seen.insert(category.name.as_str()) {
                return Err(ProfileError::DuplicateCategory {
                    name: category.name.clone(),
                });
            }
        }

        Ok(())
    }

    pub fn category_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.categories.iter().map(|c| c.name.as_str())
    }

    pub fn is_known_category(&self, name: &str) -> bool {
        self.category_names().any(|known| known == name)
    }

    /// Colour for `category`, falling back to [`Self::default_color`] for
    /// uncoloured or unknown categories.
    pub fn color_for(&self, category: &str) -> ColorToken {
        self.categories
            .iter()
            .find(|c| c.name == category)
            .and_then(|c| c.color)
            .unwrap_or(self.default_color)
    }

    /// `"<template with category> #<id>"`
    pub fn render_title(&self, template: &str, category: &str, id: ItemId) -> String {
        format!("{} #{}", template.replace(CATEGORY_PLACEHOLDER, category), id.get())
    }

    pub fn render_detail(&self, id: ItemId) -> String {
        self.detail_template
            .replace(ID_PLACEHOLDER, &id.get().to_string())
    }
}
