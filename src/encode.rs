//! Symbol encoding, delegated to the `qrcode` crate.
//!
//! This module only adapts the encoder to the form's parameters: the requested version is
//! treated as a minimum and grown until the content fits, and the resulting symbol is copied
//! into a [`ModuleGrid`] so nothing downstream depends on `qrcode` types.

use qrcode::types::QrError;
use qrcode::{Color as Module, QrCode, Version};
use tracing::debug;

use crate::error::{Error, Result};
use crate::request::{ErrorCorrection, MAX_VERSION, MIN_VERSION};

/// A square grid of dark and light modules, before any border or scaling is applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleGrid {
    width: usize,
    version: u8,
    modules: Vec<bool>,
}

impl ModuleGrid {
    fn from_code(code: &QrCode, version: u8) -> Self {
        let modules = code
            .to_colors()
            .into_iter()
            .map(|module| module == Module::Dark)
            .collect();
        Self { width: code.width(), version, modules }
    }

    /// Builds a grid from row-major module values. `modules.len()` must be `width * width`.
    #[cfg(test)]
    pub(crate) fn from_modules(width: usize, modules: Vec<bool>) -> Self {
        assert_eq!(modules.len(), width * width, "grid must be square");
        Self { width, version: 0, modules }
    }

    /// Side length in modules. Equal to `version * 4 + 17` for grids produced by [`encode`].
    pub fn width(&self) -> usize {
        self.width
    }

    /// The version the content was finally encoded at.
    pub fn version(&self) -> u8 {
        self.version
    }

    /// Returns the color of the module at the given coordinates, dark being `true`.
    /// Coordinates outside the grid are light, which is what the quiet zone needs.
    pub fn is_dark(&self, x: i32, y: i32) -> bool {
        if x < 0 || y < 0 {
            return false;
        }
        let (x, y) = (x as usize, y as usize);
        if x >= self.width || y >= self.width {
            return false;
        }
        self.modules[y * self.width + x]
    }

    /// Renders the grid as block characters for a terminal preview, two columns per module.
    pub fn to_text(&self, border: u32) -> String {
        let border = border as i32;
        let size = self.width as i32;
        let mut result = String::new();
        for y in -border..size + border {
            for x in -border..size + border {
                let c = if self.is_dark(x, y) { '█' } else { ' ' };
                result.push(c);
                result.push(c);
            }
            result.push('\n');
        }
        result
    }
}

/// Encodes `content` into a module grid.
///
/// `version` is the smallest version to try. When the content does not fit, larger versions
/// are tried in turn up to 40; only then does this fail with `QrError::DataTooLong`.
///
/// # Errors
///
/// Returns [`Error::Encode`] if `version` is outside 1..=40 or the content cannot fit.
///
/// # Example
///
/// ```rust
/// use qrform::encode::encode;
/// use qrform::request::ErrorCorrection;
///
/// let grid = encode("HELLO", 1, ErrorCorrection::Low).unwrap();
/// assert_eq!(grid.version(), 1);
/// assert_eq!(grid.width(), 21);
/// ```
pub fn encode(content: &str, version: u8, ecc: ErrorCorrection) -> Result<ModuleGrid> {
    if !(MIN_VERSION..=MAX_VERSION).contains(&version) {
        return Err(Error::Encode(QrError::InvalidVersion));
    }

    for candidate in version..=MAX_VERSION {
        let symbol_version = Version::Normal(i16::from(candidate));
        match QrCode::with_version(content.as_bytes(), symbol_version, ecc.into()) {
            Ok(code) => {
                if candidate != version {
                    debug!(
                        requested = version,
                        used = candidate,
                        "content needed a larger version"
                    );
                }
                return Ok(ModuleGrid::from_code(&code, candidate));
            }
            Err(QrError::DataTooLong) => continue,
            Err(err) => return Err(err.into()),
        }
    }

    debug!(bytes = content.len(), %ecc, "content does not fit any version");
    Err(Error::Encode(QrError::DataTooLong))
}
