use std::io::Cursor;

use image::{DynamicImage, ImageFormat, RgbImage};
use tracing::debug;

use crate::color::Color;
use crate::encode::ModuleGrid;
use crate::error::{Error, Result};
use crate::request::OutputFormat;

/*---- Rendering ----*/

/// How a [`ModuleGrid`] is turned into an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Pixels per module along each axis.
    pub box_size: u32,
    /// Quiet zone width, in modules.
    pub border: u32,
    pub fill: Color,
    pub background: Color,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self { box_size: 10, border: 4, fill: Color::BLACK, background: Color::WHITE }
    }
}

impl RenderOptions {
    /// Side length of the symbol including the border, in modules.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ImageTooLarge`] if the side does not fit in a `u32`.
    pub fn dimension(&self, grid: &ModuleGrid) -> Result<u32> {
        u32::try_from(grid.width())
            .ok()
            .and_then(|width| self.border.checked_mul(2)?.checked_add(width))
            .ok_or(Error::ImageTooLarge)
    }

    /// Side length of the raster output, in pixels.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ImageTooLarge`] if the side does not fit in a `u32`.
    pub fn pixel_size(&self, grid: &ModuleGrid) -> Result<u32> {
        self.dimension(grid)?
            .checked_mul(self.box_size)
            .ok_or(Error::ImageTooLarge)
    }
}

const SVG_PROLOGUE: &str = concat!(
    "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n",
    "<!DOCTYPE svg PUBLIC \"-//W3C//DTD SVG 1.1//EN\" ",
    "\"http://www.w3.org/Graphics/SVG/1.1/DTD/svg11.dtd\">\n",
);

// Returns a string of SVG code for an image depicting the given grid, with the border,
// scale and colors from `options`. The viewBox is in module units; width and height carry
// the pixel size. The string always uses Unix newlines (\n), regardless of the platform.
pub fn to_svg_string(grid: &ModuleGrid, options: &RenderOptions) -> Result<String> {
    let dimension = options.dimension(grid)?;
    let pixels = options.pixel_size(grid)?;
    let border = options.border as i32;
    let mut result = String::from(SVG_PROLOGUE);
    result += &format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" version=\"1.1\" \
         width=\"{1}\" height=\"{1}\" viewBox=\"0 0 {0} {0}\" stroke=\"none\">\n",
        dimension, pixels
    );
    result += &format!(
        "\t<rect width=\"100%\" height=\"100%\" fill=\"{}\"/>\n",
        options.background.to_hex()
    );
    result += "\t<path d=\"";
    let mut first = true;
    let size = grid.width() as i32;
    for y in 0..size {
        for x in 0..size {
            if grid.is_dark(x, y) {
                if !first {
                    result += " ";
                }
                first = false;
                result += &format!("M{},{}h1v1h-1z", x + border, y + border);
            }
        }
    }
    result += &format!("\" fill=\"{}\"/>\n", options.fill.to_hex());
    result += "</svg>\n";
    Ok(result)
}

/// Rasterizes a module grid.
///
/// Every module becomes a `box_size` square of the fill or background color, and the
/// border is painted in the background color.
///
/// # Errors
///
/// Returns [`Error::ImageTooLarge`] if the pixel size overflows a `u32`.
///
/// # Example
///
/// ```rust
/// use qrform::encode::encode;
/// use qrform::render::{to_image_buffer, RenderOptions};
/// use qrform::request::ErrorCorrection;
///
/// let grid = encode("HELLO", 1, ErrorCorrection::Low).unwrap();
/// let img = to_image_buffer(&grid, &RenderOptions::default()).unwrap();
/// assert_eq!(img.dimensions(), (290, 290));
/// ```
pub fn to_image_buffer(grid: &ModuleGrid, options: &RenderOptions) -> Result<RgbImage> {
    let size = options.pixel_size(grid)?;
    let mut img = RgbImage::new(size, size);
    if size == 0 {
        return Ok(img);
    }

    let border = options.border as i64;
    let fill = options.fill.to_rgb();
    let background = options.background.to_rgb();
    for (x, y, pixel) in img.enumerate_pixels_mut() {
        let qr_x = i64::from(x / options.box_size) - border;
        let qr_y = i64::from(y / options.box_size) - border;
        let dark = match (i32::try_from(qr_x), i32::try_from(qr_y)) {
            (Ok(qr_x), Ok(qr_y)) => grid.is_dark(qr_x, qr_y),
            _ => false,
        };
        *pixel = if dark { fill } else { background };
    }

    Ok(img)
}

/// Renders a grid to the bytes of an image file in the given format.
///
/// # Errors
///
/// Returns [`Error::EmptyImage`] when `box_size` is 0 for a raster format,
/// [`Error::ImageTooLarge`] when the image side overflows a `u32`, and [`Error::Image`] if
/// the image encoder fails.
pub fn render(grid: &ModuleGrid, options: &RenderOptions, format: OutputFormat) -> Result<Vec<u8>> {
    let image_format = match format {
        OutputFormat::Svg => {
            let svg = to_svg_string(grid, options)?;
            debug!(bytes = svg.len(), "rendered svg");
            return Ok(svg.into_bytes());
        }
        OutputFormat::Png => ImageFormat::Png,
        OutputFormat::Jpeg => ImageFormat::Jpeg,
    };

    if options.box_size == 0 {
        return Err(Error::EmptyImage);
    }

    let side = options.pixel_size(grid)?;
    let img = DynamicImage::ImageRgb8(to_image_buffer(grid, options)?);
    let mut bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), image_format)?;
    debug!(%format, side, bytes = bytes.len(), "rendered raster");
    Ok(bytes)
}

// Tests
#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    fn checker() -> ModuleGrid {
        ModuleGrid::from_modules(2, vec![true, false, false, true])
    }

    #[test]
    fn test_to_svg_string() {
        let options = RenderOptions { box_size: 3, border: 1, ..RenderOptions::default() };
        let svg = to_svg_string(&checker(), &options).unwrap();

        assert!(svg.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
        assert!(svg.contains("width=\"12\" height=\"12\" viewBox=\"0 0 4 4\""));
        assert!(svg.contains("<path d=\"M1,1h1v1h-1z M2,2h1v1h-1z\" fill=\"#000000\"/>"));
        assert!(svg.contains("<rect width=\"100%\" height=\"100%\" fill=\"#ffffff\"/>"));
        assert!(svg.ends_with("</svg>\n"));
    }

    #[test]
    fn test_svg_uses_custom_colors() {
        let options = RenderOptions {
            fill: Color::rgb(0x12, 0x34, 0x56),
            background: Color::rgb(0xff, 0xa5, 0x00),
            ..RenderOptions::default()
        };
        let svg = to_svg_string(&checker(), &options).unwrap();
        assert!(svg.contains("fill=\"#123456\"/>\n</svg>"));
        assert!(svg.contains("fill=\"#ffa500\"/>\n\t<path"));
    }

    #[test]
    fn test_image_buffer_scales_modules_and_paints_border() {
        let fill = Color::rgb(200, 0, 0);
        let background = Color::rgb(0, 0, 200);
        let options = RenderOptions { box_size: 2, border: 1, fill, background };
        let img = to_image_buffer(&checker(), &options).unwrap();

        assert_eq!(img.dimensions(), (8, 8));
        // Border.
        assert_eq!(*img.get_pixel(0, 0), background.to_rgb());
        assert_eq!(*img.get_pixel(7, 7), background.to_rgb());
        // Module (0, 0) covers pixels 2..4.
        assert_eq!(*img.get_pixel(2, 2), fill.to_rgb());
        assert_eq!(*img.get_pixel(3, 3), fill.to_rgb());
        // Module (1, 0) is light.
        assert_eq!(*img.get_pixel(4, 2), Rgb([0, 0, 200]));
        // Module (1, 1) is dark.
        assert_eq!(*img.get_pixel(5, 5), fill.to_rgb());
    }

    #[test]
    fn test_render_png_decodes_to_expected_size() {
        let options = RenderOptions { box_size: 5, border: 2, ..RenderOptions::default() };
        let bytes = render(&checker(), &options, OutputFormat::Png).unwrap();
        assert_eq!(&bytes[1..4], b"PNG");

        let decoded = image::load_from_memory(&bytes).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (30, 30));
    }

    #[test]
    fn test_render_jpeg() {
        let bytes = render(&checker(), &RenderOptions::default(), OutputFormat::Jpeg).unwrap();
        assert_eq!(&bytes[..2], &[0xff, 0xd8]);

        let decoded = image::load_from_memory_with_format(&bytes, ImageFormat::Jpeg).unwrap();
        assert_eq!(decoded.width(), 100);
    }

    #[test]
    fn test_render_svg_is_utf8_text() {
        let bytes = render(&checker(), &RenderOptions::default(), OutputFormat::Svg).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert!(text.contains("<svg"));
    }

    #[test]
    fn test_oversized_options_are_refused() {
        let huge_box = RenderOptions { box_size: u32::MAX, ..RenderOptions::default() };
        assert!(matches!(huge_box.pixel_size(&checker()), Err(Error::ImageTooLarge)));
        assert!(matches!(
            render(&checker(), &huge_box, OutputFormat::Png),
            Err(Error::ImageTooLarge)
        ));
        assert!(matches!(
            render(&checker(), &huge_box, OutputFormat::Svg),
            Err(Error::ImageTooLarge)
        ));

        let huge_border = RenderOptions { border: u32::MAX, ..RenderOptions::default() };
        assert!(matches!(huge_border.dimension(&checker()), Err(Error::ImageTooLarge)));
    }

    #[test]
    fn test_dimension_and_pixel_size() {
        let options = RenderOptions { box_size: 3, border: 2, ..RenderOptions::default() };
        assert_eq!(options.dimension(&checker()).unwrap(), 6);
        assert_eq!(options.pixel_size(&checker()).unwrap(), 18);
    }

    #[test]
    fn test_zero_box_size_raster_is_refused() {
        let options = RenderOptions { box_size: 0, ..RenderOptions::default() };
        assert!(to_image_buffer(&checker(), &options).unwrap().is_empty());
        assert!(matches!(
            render(&checker(), &options, OutputFormat::Png),
            Err(Error::EmptyImage)
        ));
    }
}
