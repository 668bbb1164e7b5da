//! Hard failures of the encode and render stages.
//!
//! Anything the user can fix by editing the form is a [`Warning`](crate::warning::Warning)
//! instead; the variants here only surface when a collaborator library refuses a request
//! that already passed validation.

use qrcode::types::QrError;

/// Errors returned by [`encode`](crate::encode::encode) and [`render`](crate::render::render).
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The symbol encoder rejected the content or version.
    #[error("QR encode error: {0}")]
    Encode(#[from] QrError),

    /// The raster encoder failed to write the image.
    #[error("image encode error: {0}")]
    Image(#[from] image::ImageError),

    /// A raster with zero pixels per side was requested.
    #[error("cannot render an image with box size 0")]
    EmptyImage,

    /// The image side in modules or pixels does not fit in a `u32`.
    #[error("requested image is too large")]
    ImageTooLarge,
}

pub type Result<T> = std::result::Result<T, Error>;
