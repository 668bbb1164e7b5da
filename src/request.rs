//! Form values and the validated export request built from them.

use std::fmt;
use std::str::FromStr;

use crate::color::Color;
use crate::render::RenderOptions;
use crate::warning::Warning;

/// Largest content accepted by the form: the byte-mode capacity of a version 40 symbol at
/// error correction level L.
pub const MAX_CONTENT_CHARS: usize = 2953;

pub const MIN_VERSION: u8 = 1;
pub const MAX_VERSION: u8 = 40;

pub const MIN_BOX_SIZE: u32 = 1;
pub const MAX_BOX_SIZE: u32 = 10;

pub const MAX_BORDER: u32 = 10;

pub const DEFAULT_VERSION: u32 = 1;
pub const DEFAULT_BOX_SIZE: u32 = 10;
/// Four modules is the quiet zone scanners expect.
pub const DEFAULT_BORDER: u32 = 4;
pub const DEFAULT_FILL: &str = "#000000";
pub const DEFAULT_BACKGROUND: &str = "#ffffff";
pub const DEFAULT_FORMAT: &str = "png";

/// Image formats a request can be exported as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputFormat {
    Jpeg,
    Png,
    Svg,
}

impl OutputFormat {
    pub const ALL: [OutputFormat; 3] = [OutputFormat::Jpeg, OutputFormat::Png, OutputFormat::Svg];

    /// File extension, without the leading dot.
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Jpeg => "jpeg",
            OutputFormat::Png => "png",
            OutputFormat::Svg => "svg",
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            OutputFormat::Jpeg => "image/jpeg",
            OutputFormat::Png => "image/png",
            OutputFormat::Svg => "image/svg+xml",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for OutputFormat {
    type Err = Warning;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "jpeg" | "jpg" => Ok(OutputFormat::Jpeg),
            "png" => Ok(OutputFormat::Png),
            "svg" => Ok(OutputFormat::Svg),
            _ => Err(Warning::UnsupportedFormat(s.to_string())),
        }
    }
}

/// QR error correction level, from lowest (L, ~7% recovery) to highest (H, ~30%).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ErrorCorrection {
    #[default]
    Low,
    Medium,
    Quartile,
    High,
}

impl From<ErrorCorrection> for qrcode::EcLevel {
    fn from(ecc: ErrorCorrection) -> Self {
        match ecc {
            ErrorCorrection::Low => qrcode::EcLevel::L,
            ErrorCorrection::Medium => qrcode::EcLevel::M,
            ErrorCorrection::Quartile => qrcode::EcLevel::Q,
            ErrorCorrection::High => qrcode::EcLevel::H,
        }
    }
}

impl fmt::Display for ErrorCorrection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let letter = match self {
            ErrorCorrection::Low => "L",
            ErrorCorrection::Medium => "M",
            ErrorCorrection::Quartile => "Q",
            ErrorCorrection::High => "H",
        };
        f.write_str(letter)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown error correction level `{0}` (expected L, M, Q or H)")]
pub struct ParseErrorCorrectionError(String);

impl FromStr for ErrorCorrection {
    type Err = ParseErrorCorrectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "L" | "LOW" => Ok(ErrorCorrection::Low),
            "M" | "MEDIUM" => Ok(ErrorCorrection::Medium),
            "Q" | "QUARTILE" => Ok(ErrorCorrection::Quartile),
            "H" | "HIGH" => Ok(ErrorCorrection::High),
            _ => Err(ParseErrorCorrectionError(s.to_string())),
        }
    }
}

/// The raw values currently held by the form, exactly as typed.
///
/// Nothing here is checked yet; pass it to [`validate_form`](crate::builder::validate_form)
/// or [`evaluate`](crate::builder::evaluate).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormValues {
    pub file_name: String,
    pub content: String,
    pub output_format: String,
    pub version: u32,
    pub box_size: u32,
    pub border: u32,
    pub fill_color: String,
    pub background_color: String,
    pub error_correction: ErrorCorrection,
}

impl Default for FormValues {
    fn default() -> Self {
        Self {
            file_name: String::new(),
            content: String::new(),
            output_format: DEFAULT_FORMAT.to_string(),
            version: DEFAULT_VERSION,
            box_size: DEFAULT_BOX_SIZE,
            border: DEFAULT_BORDER,
            fill_color: DEFAULT_FILL.to_string(),
            background_color: DEFAULT_BACKGROUND.to_string(),
            error_correction: ErrorCorrection::default(),
        }
    }
}

/// A validated export request.
///
/// Only [`validate_form`](crate::builder::validate_form) creates one, so holding an
/// `ExportRequest` means every field is within range. It lives for a single interaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportRequest {
    pub(crate) content: String,
    pub(crate) version: u8,
    pub(crate) box_size: u32,
    pub(crate) border_width: u32,
    pub(crate) fill_color: Color,
    pub(crate) background_color: Color,
    pub(crate) output_format: OutputFormat,
    pub(crate) error_correction: ErrorCorrection,
    pub(crate) file_name: String,
}

impl ExportRequest {
    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn version(&self) -> u8 {
        self.version
    }

    pub fn box_size(&self) -> u32 {
        self.box_size
    }

    pub fn border_width(&self) -> u32 {
        self.border_width
    }

    pub fn fill_color(&self) -> Color {
        self.fill_color
    }

    pub fn background_color(&self) -> Color {
        self.background_color
    }

    pub fn output_format(&self) -> OutputFormat {
        self.output_format
    }

    pub fn error_correction(&self) -> ErrorCorrection {
        self.error_correction
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            box_size: self.box_size,
            border: self.border_width,
            fill: self.fill_color,
            background: self.background_color,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_parse() {
        assert_eq!("png".parse::<OutputFormat>(), Ok(OutputFormat::Png));
        assert_eq!("JPEG".parse::<OutputFormat>(), Ok(OutputFormat::Jpeg));
        assert_eq!("jpg".parse::<OutputFormat>(), Ok(OutputFormat::Jpeg));
        assert_eq!(" svg ".parse::<OutputFormat>(), Ok(OutputFormat::Svg));
        assert_eq!(
            "gif".parse::<OutputFormat>(),
            Err(Warning::UnsupportedFormat("gif".to_string()))
        );
    }

    #[test]
    fn test_extension_round_trips_through_parse() {
        for format in OutputFormat::ALL {
            assert_eq!(format.extension().parse::<OutputFormat>(), Ok(format));
        }
    }

    #[test]
    fn test_error_correction_parse() {
        assert_eq!("l".parse::<ErrorCorrection>(), Ok(ErrorCorrection::Low));
        assert_eq!("Q".parse::<ErrorCorrection>(), Ok(ErrorCorrection::Quartile));
        assert_eq!("high".parse::<ErrorCorrection>(), Ok(ErrorCorrection::High));
        assert!("x".parse::<ErrorCorrection>().is_err());
        assert_eq!(ErrorCorrection::Medium.to_string(), "M");
    }

    #[test]
    fn test_form_defaults() {
        let form = FormValues::default();
        assert_eq!(form.version, 1);
        assert_eq!(form.box_size, 10);
        assert_eq!(form.border, 4);
        assert_eq!(form.fill_color, "#000000");
        assert_eq!(form.background_color, "#ffffff");
        assert_eq!(form.output_format, "png");
        assert_eq!(form.error_correction, ErrorCorrection::Low);
        assert!(form.content.is_empty());
        assert!(form.file_name.is_empty());
    }
}
