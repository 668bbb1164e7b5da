//! Advisory warnings raised while validating the form.

use std::fmt;

use crate::request::{
    ErrorCorrection, MAX_BORDER, MAX_BOX_SIZE, MAX_CONTENT_CHARS, MAX_VERSION, MIN_BOX_SIZE,
    MIN_VERSION,
};

/// Which color input a [`Warning::InvalidColor`] refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorField {
    Fill,
    Background,
}

impl fmt::Display for ColorField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColorField::Fill => f.write_str("fill"),
            ColorField::Background => f.write_str("background"),
        }
    }
}

/// A problem with the current form values.
///
/// Warnings never abort anything. Each one is shown next to the form and, while any is
/// present, the download stays disabled.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Warning {
    #[error("content is empty")]
    EmptyContent,

    #[error("content is {len} characters long, the limit is {limit}", limit = MAX_CONTENT_CHARS)]
    ContentTooLarge { len: usize },

    #[error("file name is empty")]
    MissingFileName,

    /// The file name is a path, not a base name.
    #[error("file name `{0}` must not contain path separators or be `.` or `..`")]
    InvalidFileName(String),

    #[error("unsupported output format `{0}` (expected jpeg, png or svg)")]
    UnsupportedFormat(String),

    #[error("version {0} is outside {min}..={max}", min = MIN_VERSION, max = MAX_VERSION)]
    VersionOutOfRange(u32),

    #[error("box size {0} is outside {min}..={max}", min = MIN_BOX_SIZE, max = MAX_BOX_SIZE)]
    BoxSizeOutOfRange(u32),

    #[error("border {0} is outside 0..={max}", max = MAX_BORDER)]
    BorderOutOfRange(u32),

    #[error("invalid {field} color `{value}`")]
    InvalidColor { field: ColorField, value: String },

    /// The encoder could not fit the content into any version from the requested one up to 40.
    #[error(
        "content does not fit a version {min_version}..={max} symbol at error correction {ecc}",
        max = MAX_VERSION
    )]
    ContentDoesNotFit { min_version: u8, ecc: ErrorCorrection },
}

/// The collected outcome of validating a form. Empty means valid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationResult {
    warnings: Vec<Warning>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.warnings.is_empty()
    }

    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    pub fn contains(&self, warning: &Warning) -> bool {
        self.warnings.contains(warning)
    }

    pub fn push(&mut self, warning: Warning) {
        self.warnings.push(warning);
    }

    pub fn into_warnings(self) -> Vec<Warning> {
        self.warnings
    }
}

impl From<Vec<Warning>> for ValidationResult {
    fn from(warnings: Vec<Warning>) -> Self {
        Self { warnings }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_result_is_valid() {
        let result = ValidationResult::default();
        assert!(result.is_valid());
        assert!(result.warnings().is_empty());
    }

    #[test]
    fn pushed_warning_invalidates() {
        let mut result = ValidationResult::default();
        result.push(Warning::MissingFileName);
        assert!(!result.is_valid());
        assert!(result.contains(&Warning::MissingFileName));
        assert!(!result.contains(&Warning::EmptyContent));
    }

    #[test]
    fn messages_name_the_limits() {
        assert_eq!(
            Warning::ContentTooLarge { len: 3000 }.to_string(),
            "content is 3000 characters long, the limit is 2953"
        );
        assert_eq!(Warning::VersionOutOfRange(41).to_string(), "version 41 is outside 1..=40");
        assert_eq!(
            Warning::InvalidColor { field: ColorField::Background, value: "nope".into() }
                .to_string(),
            "invalid background color `nope`"
        );
    }
}
