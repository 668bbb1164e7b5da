//! # qrform
//!
//! Turns the values of a small QR code form into a downloadable image.
//!
//! The form holds some text, a file name, an output format (JPEG, PNG or SVG), a minimum
//! symbol version, a box size, a border width, fill and background colors and an error
//! correction level. On every interaction the whole form is re-evaluated: the values are
//! validated into an [`ExportRequest`](request::ExportRequest), the text is encoded into a
//! module grid with the `qrcode` crate, and the grid is rendered to bytes together with a file
//! name and MIME type. Any problem with the input is reported as a
//! [`Warning`](warning::Warning) and disables the download instead of failing.
//!
//! ## Example
//!
//! ```rust
//! use qrform::builder::{evaluate, DownloadAction};
//! use qrform::request::FormValues;
//!
//! let form = FormValues {
//!     file_name: "hello".into(),
//!     content: "https://example.com".into(),
//!     output_format: "svg".into(),
//!     fill_color: "navy".into(),
//!     ..FormValues::default()
//! };
//!
//! match evaluate(&form).unwrap() {
//!     DownloadAction::Enabled(download) => {
//!         assert_eq!(download.file_name, "hello.svg");
//!         assert_eq!(download.mime_type, "image/svg+xml");
//!     }
//!     DownloadAction::Disabled { warnings } => panic!("unexpected warnings: {warnings:?}"),
//! }
//! ```
//!
//! ## Modules
//!
//! - [`builder`]: Validation, file naming, MIME selection and the full evaluate pipeline.
//! - [`request`]: Raw form values and the validated request.
//! - [`encode`]: Symbol encoding through the `qrcode` crate.
//! - [`render`]: PNG, JPEG and SVG output.
//! - [`color`]: Hex and named color parsing.

pub mod builder;
pub mod color;
pub mod encode;
pub mod error;
pub mod render;
pub mod request;
pub mod warning;

pub use error::{Error, Result};
