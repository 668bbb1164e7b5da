//! The export request builder.
//!
//! Every interaction with the form re-runs [`evaluate`] on the current [`FormValues`]. The
//! result is either an enabled [`Download`] or a disabled action carrying the warnings to
//! show. Nothing is remembered between calls.
//!
//! Content that is too large blocks the download; it is never exported truncated or
//! oversized.

use qrcode::types::QrError;
use tracing::debug;

use crate::color::Color;
use crate::encode::encode;
use crate::error::{Error, Result};
use crate::render::render;
use crate::encode::ModuleGrid;
use crate::request::{
    ExportRequest, FormValues, OutputFormat, MAX_BORDER, MAX_BOX_SIZE, MAX_CONTENT_CHARS,
    MAX_VERSION, MIN_BOX_SIZE, MIN_VERSION,
};
use crate::warning::{ColorField, ValidationResult, Warning};

/// The payload of an enabled download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Download {
    pub bytes: Vec<u8>,
    /// `<file name>.<extension>`.
    pub file_name: String,
    pub mime_type: &'static str,
    /// The encoded symbol. Its version may exceed the requested one.
    pub grid: ModuleGrid,
}

/// What the form's download button should do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadAction {
    Enabled(Download),
    Disabled { warnings: Vec<Warning> },
}

impl DownloadAction {
    pub fn is_enabled(&self) -> bool {
        matches!(self, DownloadAction::Enabled(_))
    }

    pub fn download(&self) -> Option<&Download> {
        match self {
            DownloadAction::Enabled(download) => Some(download),
            DownloadAction::Disabled { .. } => None,
        }
    }

    pub fn warnings(&self) -> &[Warning] {
        match self {
            DownloadAction::Enabled(_) => &[],
            DownloadAction::Disabled { warnings } => warnings,
        }
    }
}

/// Checks the content and file name.
///
/// All failures are reported together: blank content gives [`Warning::EmptyContent`], content
/// over 2953 characters gives [`Warning::ContentTooLarge`], and a blank file name gives
/// [`Warning::MissingFileName`]. A file name that is a path rather than a base name gives
/// [`Warning::InvalidFileName`].
///
/// # Example
///
/// ```rust
/// use qrform::builder::validate;
/// use qrform::warning::Warning;
///
/// let result = validate("", " ");
/// assert_eq!(result.warnings(), &[Warning::EmptyContent, Warning::MissingFileName]);
/// assert!(validate("HELLO", "test").is_valid());
/// ```
pub fn validate(content: &str, file_name: &str) -> ValidationResult {
    let mut result = ValidationResult::default();

    if content.trim().is_empty() {
        result.push(Warning::EmptyContent);
    } else {
        let len = content.chars().count();
        if len > MAX_CONTENT_CHARS {
            result.push(Warning::ContentTooLarge { len });
        }
    }

    let file_name = file_name.trim();
    if file_name.is_empty() {
        result.push(Warning::MissingFileName);
    } else if !is_base_name(file_name) {
        result.push(Warning::InvalidFileName(file_name.to_string()));
    }

    result
}

fn is_base_name(file_name: &str) -> bool {
    !matches!(file_name, "." | "..") && !file_name.contains(['/', '\\', '\0'])
}

pub fn select_mime_type(format: OutputFormat) -> &'static str {
    format.mime_type()
}

/// Joins the base name and the format extension.
///
/// Returns an empty string when `validation` carries any warning, which tells the host there
/// is nothing to download.
pub fn build_file_name(
    file_name: &str,
    format: OutputFormat,
    validation: &ValidationResult,
) -> String {
    if !validation.is_valid() || file_name.trim().is_empty() {
        return String::new();
    }
    join_file_name(file_name, format)
}

fn join_file_name(file_name: &str, format: OutputFormat) -> String {
    format!("{}.{}", file_name.trim(), format.extension())
}

fn check_range(
    value: u32,
    min: u32,
    max: u32,
    warning: fn(u32) -> Warning,
    result: &mut ValidationResult,
) {
    if value < min || value > max {
        result.push(warning(value));
    }
}

fn parse_color(value: &str, field: ColorField, result: &mut ValidationResult) -> Option<Color> {
    match value.parse::<Color>() {
        Ok(color) => Some(color),
        Err(_) => {
            result.push(Warning::InvalidColor { field, value: value.to_string() });
            None
        }
    }
}

/// Validates every field of the form and builds the request.
///
/// Runs [`validate`] first, then checks the format, the numeric ranges and both colors. The
/// request is only returned when nothing at all was flagged.
pub fn validate_form(form: &FormValues) -> std::result::Result<ExportRequest, ValidationResult> {
    let mut result = validate(&form.content, &form.file_name);

    let format = match form.output_format.parse::<OutputFormat>() {
        Ok(format) => Some(format),
        Err(warning) => {
            result.push(warning);
            None
        }
    };

    check_range(
        form.version,
        u32::from(MIN_VERSION),
        u32::from(MAX_VERSION),
        Warning::VersionOutOfRange,
        &mut result,
    );
    check_range(
        form.box_size,
        MIN_BOX_SIZE,
        MAX_BOX_SIZE,
        Warning::BoxSizeOutOfRange,
        &mut result,
    );
    check_range(form.border, 0, MAX_BORDER, Warning::BorderOutOfRange, &mut result);

    let fill = parse_color(&form.fill_color, ColorField::Fill, &mut result);
    let background = parse_color(&form.background_color, ColorField::Background, &mut result);

    match (format, fill, background, u8::try_from(form.version)) {
        (Some(output_format), Some(fill_color), Some(background_color), Ok(version))
            if result.is_valid() =>
        {
            Ok(ExportRequest {
                content: form.content.clone(),
                version,
                box_size: form.box_size,
                border_width: form.border,
                fill_color,
                background_color,
                output_format,
                error_correction: form.error_correction,
                file_name: form.file_name.trim().to_string(),
            })
        }
        _ => Err(result),
    }
}

/// Re-evaluates the form: validate, encode, render.
///
/// # Errors
///
/// Validation problems and content that does not fit a version 40 symbol are not errors;
/// they come back as [`DownloadAction::Disabled`]. Only failures of the image encoder are
/// returned as `Err`.
///
/// # Example
///
/// ```rust
/// use qrform::builder::evaluate;
/// use qrform::request::FormValues;
///
/// let form = FormValues {
///     file_name: "test".into(),
///     content: "HELLO".into(),
///     ..FormValues::default()
/// };
/// let action = evaluate(&form).unwrap();
/// let download = action.download().unwrap();
/// assert_eq!(download.file_name, "test.png");
/// assert_eq!(download.mime_type, "image/png");
/// ```
pub fn evaluate(form: &FormValues) -> Result<DownloadAction> {
    let request = match validate_form(form) {
        Ok(request) => request,
        Err(result) => {
            debug!(warnings = result.warnings().len(), "download disabled");
            return Ok(DownloadAction::Disabled { warnings: result.into_warnings() });
        }
    };
    export(&request)
}

/// Encodes and renders an already validated request.
pub fn export(request: &ExportRequest) -> Result<DownloadAction> {
    let grid = match encode(request.content(), request.version(), request.error_correction()) {
        Ok(grid) => grid,
        Err(Error::Encode(QrError::DataTooLong)) => {
            let warning = Warning::ContentDoesNotFit {
                min_version: request.version(),
                ecc: request.error_correction(),
            };
            return Ok(DownloadAction::Disabled { warnings: vec![warning] });
        }
        Err(err) => return Err(err),
    };

    let format = request.output_format();
    let bytes = render(&grid, &request.render_options(), format)?;
    Ok(DownloadAction::Enabled(Download {
        bytes,
        file_name: join_file_name(request.file_name(), format),
        mime_type: select_mime_type(format),
        grid,
    }))
}
