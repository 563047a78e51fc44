//! Input validation for untrusted request data.
//!
//! Chart dimensions, series sizes and label lengths are checked here before
//! anything is rendered. Numeric parsing of analysis fields lives in
//! `analytics_core::parse`.

use analytics_core::Series;
use thiserror::Error;

/// Smallest accepted chart width.
pub const MIN_WIDTH: u32 = 400;
/// Largest accepted chart width.
pub const MAX_WIDTH: u32 = 1200;
/// Smallest accepted chart height.
pub const MIN_HEIGHT: u32 = 300;
/// Largest accepted chart height.
pub const MAX_HEIGHT: u32 = 800;
/// Maximum entries in one series.
pub const MAX_DATA_POINTS: usize = 500;
/// Maximum length of a title, axis label or category label.
pub const MAX_LABEL_LEN: usize = 200;
/// Maximum request body size.
pub const MAX_BODY_BYTES: usize = 256 * 1024;

/// Validation error types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Width outside the accepted range.
    #[error("width {0} out of range ({MIN_WIDTH}-{MAX_WIDTH})")]
    WidthOutOfRange(u32),
    /// Height outside the accepted range.
    #[error("height {0} out of range ({MIN_HEIGHT}-{MAX_HEIGHT})")]
    HeightOutOfRange(u32),
    /// Series has too many entries.
    #[error("{field} has too many points (max {MAX_DATA_POINTS})")]
    TooManyPoints {
        /// Offending field.
        field: &'static str,
    },
    /// A label exceeds the maximum length.
    #[error("{field} too long (max {MAX_LABEL_LEN} chars)")]
    LabelTooLong {
        /// Offending field.
        field: &'static str,
    },
}

impl ValidationError {
    /// Name of the field that failed, used as a metrics label.
    #[must_use]
    pub fn field(&self) -> &'static str {
        match self {
            Self::WidthOutOfRange(_) => "width",
            Self::HeightOutOfRange(_) => "height",
            Self::TooManyPoints { field } | Self::LabelTooLong { field } => field,
        }
    }
}

/// Validate explicit chart dimensions.
///
/// # Errors
///
/// Returns [`ValidationError::WidthOutOfRange`] or
/// [`ValidationError::HeightOutOfRange`] for sizes outside
/// 400-1200 x 300-800.
pub fn validate_dimensions(width: u32, height: u32) -> Result<(), ValidationError> {
    if !(MIN_WIDTH..=MAX_WIDTH).contains(&width) {
        return Err(ValidationError::WidthOutOfRange(width));
    }
    if !(MIN_HEIGHT..=MAX_HEIGHT).contains(&height) {
        return Err(ValidationError::HeightOutOfRange(height));
    }
    Ok(())
}

/// Validate a title or axis label.
///
/// # Errors
///
/// Returns [`ValidationError::LabelTooLong`] past [`MAX_LABEL_LEN`] characters.
pub fn validate_label(field: &'static str, label: &str) -> Result<(), ValidationError> {
    if label.chars().count() > MAX_LABEL_LEN {
        return Err(ValidationError::LabelTooLong { field });
    }
    Ok(())
}

/// Validate a series: entry count and every category label.
///
/// Empty series are valid; they render as a "No data" image.
///
/// # Errors
///
/// Returns [`ValidationError::TooManyPoints`] or
/// [`ValidationError::LabelTooLong`].
pub fn validate_series(field: &'static str, series: &Series) -> Result<(), ValidationError> {
    validate_count(field, series.len())?;
    series.labels().try_for_each(|label| validate_label(field, label))
}

/// Validate the number of values in a delimited field.
///
/// # Errors
///
/// Returns [`ValidationError::TooManyPoints`] past [`MAX_DATA_POINTS`].
pub fn validate_count(field: &'static str, count: usize) -> Result<(), ValidationError> {
    if count > MAX_DATA_POINTS {
        return Err(ValidationError::TooManyPoints { field });
    }
    Ok(())
}
