//! Fill and background colors typed into the form.
//!
//! Accepts `#rgb` and `#rrggbb` hex strings and the 148 CSS named colors, including the
//! `grey` spellings, case-insensitively.

use std::fmt;
use std::str::FromStr;

use image::Rgb;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// CSS named colors, sorted by name for binary search.
const NAMED: [(&str, Color); 148] = [
    ("aliceblue", Color::rgb(0xf0, 0xf8, 0xff)),
    ("antiquewhite", Color::rgb(0xfa, 0xeb, 0xd7)),
    ("aqua", Color::rgb(0x00, 0xff, 0xff)),
    ("aquamarine", Color::rgb(0x7f, 0xff, 0xd4)),
    ("azure", Color::rgb(0xf0, 0xff, 0xff)),
    ("beige", Color::rgb(0xf5, 0xf5, 0xdc)),
    ("bisque", Color::rgb(0xff, 0xe4, 0xc4)),
    ("black", Color::rgb(0x00, 0x00, 0x00)),
    ("blanchedalmond", Color::rgb(0xff, 0xeb, 0xcd)),
    ("blue", Color::rgb(0x00, 0x00, 0xff)),
    ("blueviolet", Color::rgb(0x8a, 0x2b, 0xe2)),
    ("brown", Color::rgb(0xa5, 0x2a, 0x2a)),
    ("burlywood", Color::rgb(0xde, 0xb8, 0x87)),
    ("cadetblue", Color::rgb(0x5f, 0x9e, 0xa0)),
    ("chartreuse", Color::rgb(0x7f, 0xff, 0x00)),
    ("chocolate", Color::rgb(0xd2, 0x69, 0x1e)),
    ("coral", Color::rgb(0xff, 0x7f, 0x50)),
    ("cornflowerblue", Color::rgb(0x64, 0x95, 0xed)),
    ("cornsilk", Color::rgb(0xff, 0xf8, 0xdc)),
    ("crimson", Color::rgb(0xdc, 0x14, 0x3c)),
    ("cyan", Color::rgb(0x00, 0xff, 0xff)),
    ("darkblue", Color::rgb(0x00, 0x00, 0x8b)),
    ("darkcyan", Color::rgb(0x00, 0x8b, 0x8b)),
    ("darkgoldenrod", Color::rgb(0xb8, 0x86, 0x0b)),
    ("darkgray", Color::rgb(0xa9, 0xa9, 0xa9)),
    ("darkgreen", Color::rgb(0x00, 0x64, 0x00)),
    ("darkgrey", Color::rgb(0xa9, 0xa9, 0xa9)),
    ("darkkhaki", Color::rgb(0xbd, 0xb7, 0x6b)),
    ("darkmagenta", Color::rgb(0x8b, 0x00, 0x8b)),
    ("darkolivegreen", Color::rgb(0x55, 0x6b, 0x2f)),
    ("darkorange", Color::rgb(0xff, 0x8c, 0x00)),
    ("darkorchid", Color::rgb(0x99, 0x32, 0xcc)),
    ("darkred", Color::rgb(0x8b, 0x00, 0x00)),
    ("darksalmon", Color::rgb(0xe9, 0x96, 0x7a)),
    ("darkseagreen", Color::rgb(0x8f, 0xbc, 0x8f)),
    ("darkslateblue", Color::rgb(0x48, 0x3d, 0x8b)),
    ("darkslategray", Color::rgb(0x2f, 0x4f, 0x4f)),
    ("darkslategrey", Color::rgb(0x2f, 0x4f, 0x4f)),
    ("darkturquoise", Color::rgb(0x00, 0xce, 0xd1)),
    ("darkviolet", Color::rgb(0x94, 0x00, 0xd3)),
    ("deeppink", Color::rgb(0xff, 0x14, 0x93)),
    ("deepskyblue", Color::rgb(0x00, 0xbf, 0xff)),
    ("dimgray", Color::rgb(0x69, 0x69, 0x69)),
    ("dimgrey", Color::rgb(0x69, 0x69, 0x69)),
    ("dodgerblue", Color::rgb(0x1e, 0x90, 0xff)),
    ("firebrick", Color::rgb(0xb2, 0x22, 0x22)),
    ("floralwhite", Color::rgb(0xff, 0xfa, 0xf0)),
    ("forestgreen", Color::rgb(0x22, 0x8b, 0x22)),
    ("fuchsia", Color::rgb(0xff, 0x00, 0xff)),
    ("gainsboro", Color::rgb(0xdc, 0xdc, 0xdc)),
    ("ghostwhite", Color::rgb(0xf8, 0xf8, 0xff)),
    ("gold", Color::rgb(0xff, 0xd7, 0x00)),
    ("goldenrod", Color::rgb(0xda, 0xa5, 0x20)),
    ("gray", Color::rgb(0x80, 0x80, 0x80)),
    ("green", Color::rgb(0x00, 0x80, 0x00)),
    ("greenyellow", Color::rgb(0xad, 0xff, 0x2f)),
    ("grey", Color::rgb(0x80, 0x80, 0x80)),
    ("honeydew", Color::rgb(0xf0, 0xff, 0xf0)),
    ("hotpink", Color::rgb(0xff, 0x69, 0xb4)),
    ("indianred", Color::rgb(0xcd, 0x5c, 0x5c)),
    ("indigo", Color::rgb(0x4b, 0x00, 0x82)),
    ("ivory", Color::rgb(0xff, 0xff, 0xf0)),
    ("khaki", Color::rgb(0xf0, 0xe6, 0x8c)),
    ("lavender", Color::rgb(0xe6, 0xe6, 0xfa)),
    ("lavenderblush", Color::rgb(0xff, 0xf0, 0xf5)),
    ("lawngreen", Color::rgb(0x7c, 0xfc, 0x00)),
    ("lemonchiffon", Color::rgb(0xff, 0xfa, 0xcd)),
    ("lightblue", Color::rgb(0xad, 0xd8, 0xe6)),
    ("lightcoral", Color::rgb(0xf0, 0x80, 0x80)),
    ("lightcyan", Color::rgb(0xe0, 0xff, 0xff)),
    ("lightgoldenrodyellow", Color::rgb(0xfa, 0xfa, 0xd2)),
    ("lightgray", Color::rgb(0xd3, 0xd3, 0xd3)),
    ("lightgreen", Color::rgb(0x90, 0xee, 0x90)),
    ("lightgrey", Color::rgb(0xd3, 0xd3, 0xd3)),
    ("lightpink", Color::rgb(0xff, 0xb6, 0xc1)),
    ("lightsalmon", Color::rgb(0xff, 0xa0, 0x7a)),
    ("lightseagreen", Color::rgb(0x20, 0xb2, 0xaa)),
    ("lightskyblue", Color::rgb(0x87, 0xce, 0xfa)),
    ("lightslategray", Color::rgb(0x77, 0x88, 0x99)),
    ("lightslategrey", Color::rgb(0x77, 0x88, 0x99)),
    ("lightsteelblue", Color::rgb(0xb0, 0xc4, 0xde)),
    ("lightyellow", Color::rgb(0xff, 0xff, 0xe0)),
    ("lime", Color::rgb(0x00, 0xff, 0x00)),
    ("limegreen", Color::rgb(0x32, 0xcd, 0x32)),
    ("linen", Color::rgb(0xfa, 0xf0, 0xe6)),
    ("magenta", Color::rgb(0xff, 0x00, 0xff)),
    ("maroon", Color::rgb(0x80, 0x00, 0x00)),
    ("mediumaquamarine", Color::rgb(0x66, 0xcd, 0xaa)),
    ("mediumblue", Color::rgb(0x00, 0x00, 0xcd)),
    ("mediumorchid", Color::rgb(0xba, 0x55, 0xd3)),
    ("mediumpurple", Color::rgb(0x93, 0x70, 0xdb)),
    ("mediumseagreen", Color::rgb(0x3c, 0xb3, 0x71)),
    ("mediumslateblue", Color::rgb(0x7b, 0x68, 0xee)),
    ("mediumspringgreen", Color::rgb(0x00, 0xfa, 0x9a)),
    ("mediumturquoise", Color::rgb(0x48, 0xd1, 0xcc)),
    ("mediumvioletred", Color::rgb(0xc7, 0x15, 0x85)),
    ("midnightblue", Color::rgb(0x19, 0x19, 0x70)),
    ("mintcream", Color::rgb(0xf5, 0xff, 0xfa)),
    ("mistyrose", Color::rgb(0xff, 0xe4, 0xe1)),
    ("moccasin", Color::rgb(0xff, 0xe4, 0xb5)),
    ("navajowhite", Color::rgb(0xff, 0xde, 0xad)),
    ("navy", Color::rgb(0x00, 0x00, 0x80)),
    ("oldlace", Color::rgb(0xfd, 0xf5, 0xe6)),
    ("olive", Color::rgb(0x80, 0x80, 0x00)),
    ("olivedrab", Color::rgb(0x6b, 0x8e, 0x23)),
    ("orange", Color::rgb(0xff, 0xa5, 0x00)),
    ("orangered", Color::rgb(0xff, 0x45, 0x00)),
    ("orchid", Color::rgb(0xda, 0x70, 0xd6)),
    ("palegoldenrod", Color::rgb(0xee, 0xe8, 0xaa)),
    ("palegreen", Color::rgb(0x98, 0xfb, 0x98)),
    ("paleturquoise", Color::rgb(0xaf, 0xee, 0xee)),
    ("palevioletred", Color::rgb(0xdb, 0x70, 0x93)),
    ("papayawhip", Color::rgb(0xff, 0xef, 0xd5)),
    ("peachpuff", Color::rgb(0xff, 0xda, 0xb9)),
    ("peru", Color::rgb(0xcd, 0x85, 0x3f)),
    ("pink", Color::rgb(0xff, 0xc0, 0xcb)),
    ("plum", Color::rgb(0xdd, 0xa0, 0xdd)),
    ("powderblue", Color::rgb(0xb0, 0xe0, 0xe6)),
    ("purple", Color::rgb(0x80, 0x00, 0x80)),
    ("rebeccapurple", Color::rgb(0x66, 0x33, 0x99)),
    ("red", Color::rgb(0xff, 0x00, 0x00)),
    ("rosybrown", Color::rgb(0xbc, 0x8f, 0x8f)),
    ("royalblue", Color::rgb(0x41, 0x69, 0xe1)),
    ("saddlebrown", Color::rgb(0x8b, 0x45, 0x13)),
    ("salmon", Color::rgb(0xfa, 0x80, 0x72)),
    ("sandybrown", Color::rgb(0xf4, 0xa4, 0x60)),
    ("seagreen", Color::rgb(0x2e, 0x8b, 0x57)),
    ("seashell", Color::rgb(0xff, 0xf5, 0xee)),
    ("sienna", Color::rgb(0xa0, 0x52, 0x2d)),
    ("silver", Color::rgb(0xc0, 0xc0, 0xc0)),
    ("skyblue", Color::rgb(0x87, 0xce, 0xeb)),
    ("slateblue", Color::rgb(0x6a, 0x5a, 0xcd)),
    ("slategray", Color::rgb(0x70, 0x80, 0x90)),
    ("slategrey", Color::rgb(0x70, 0x80, 0x90)),
    ("snow", Color::rgb(0xff, 0xfa, 0xfa)),
    ("springgreen", Color::rgb(0x00, 0xff, 0x7f)),
    ("steelblue", Color::rgb(0x46, 0x82, 0xb4)),
    ("tan", Color::rgb(0xd2, 0xb4, 0x8c)),
    ("teal", Color::rgb(0x00, 0x80, 0x80)),
    ("thistle", Color::rgb(0xd8, 0xbf, 0xd8)),
    ("tomato", Color::rgb(0xff, 0x63, 0x47)),
    ("turquoise", Color::rgb(0x40, 0xe0, 0xd0)),
    ("violet", Color::rgb(0xee, 0x82, 0xee)),
    ("wheat", Color::rgb(0xf5, 0xde, 0xb3)),
    ("white", Color::rgb(0xff, 0xff, 0xff)),
    ("whitesmoke", Color::rgb(0xf5, 0xf5, 0xf5)),
    ("yellow", Color::rgb(0xff, 0xff, 0x00)),
    ("yellowgreen", Color::rgb(0x9a, 0xcd, 0x32)),
];

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(0xff, 0xff, 0xff);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Lowercase `#rrggbb`, as written into SVG output.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    pub fn to_rgb(self) -> Rgb<u8> {
        Rgb([self.r, self.g, self.b])
    }

    fn from_name(name: &str) -> Option<Self> {
        let name = name.to_ascii_lowercase();
        NAMED
            .binary_search_by(|(candidate, _)| (*candidate).cmp(name.as_str()))
            .ok()
            .map(|index| NAMED[index].1)
    }

    fn from_hex(digits: &str) -> Option<Self> {
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        match digits.len() {
            3 => {
                let mut channels = [0u8; 3];
                for (channel, digit) in channels.iter_mut().zip(digits.chars()) {
                    let value = digit.to_digit(16)? as u8;
                    *channel = value * 0x11;
                }
                Some(Color::rgb(channels[0], channels[1], channels[2]))
            }
            6 => {
                let r = u8::from_str_radix(&digits[0..2], 16).ok()?;
                let g = u8::from_str_radix(&digits[2..4], 16).ok()?;
                let b = u8::from_str_radix(&digits[4..6], 16).ok()?;
                Some(Color::rgb(r, g, b))
            }
            _ => None,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognised color `{0}`")]
pub struct ParseColorError(String);

impl FromStr for Color {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let parsed = match trimmed.strip_prefix('#') {
            Some(digits) => Color::from_hex(digits),
            None => Color::from_name(trimmed),
        };
        parsed.ok_or_else(|| ParseColorError(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_long_and_short_hex() {
        assert_eq!("#000000".parse::<Color>(), Ok(Color::BLACK));
        assert_eq!("#FFFFFF".parse::<Color>(), Ok(Color::WHITE));
        assert_eq!("#1a2B3c".parse::<Color>(), Ok(Color::rgb(0x1a, 0x2b, 0x3c)));
        assert_eq!("#f80".parse::<Color>(), Ok(Color::rgb(0xff, 0x88, 0x00)));
    }

    #[test]
    fn parses_named_colors() {
        assert_eq!("black".parse::<Color>(), Ok(Color::BLACK));
        assert_eq!(" White ".parse::<Color>(), Ok(Color::WHITE));
        assert_eq!("NAVY".parse::<Color>(), Ok(Color::rgb(0, 0, 0x80)));
        assert_eq!("teal".parse::<Color>(), Ok(Color::rgb(0, 0x80, 0x80)));
        assert_eq!("RebeccaPurple".parse::<Color>(), Ok(Color::rgb(0x66, 0x33, 0x99)));
        assert_eq!("lightgoldenrodyellow".parse::<Color>(), Ok(Color::rgb(0xfa, 0xfa, 0xd2)));
    }

    #[test]
    fn named_table_is_sorted_and_complete() {
        assert!(NAMED.windows(2).all(|pair| pair[0].0 < pair[1].0));
        for (name, color) in NAMED {
            assert_eq!(name.parse::<Color>(), Ok(color), "{name}");
        }
    }

    #[test]
    fn rejects_garbage() {
        for input in ["", "#", "#12", "#12345", "#gggggg", "000000", "blurple", "#ffffff00"] {
            assert!(input.parse::<Color>().is_err(), "{input:?} should not parse");
        }
    }

    #[test]
    fn hex_output_is_lowercase_and_padded() {
        assert_eq!(Color::rgb(0x0a, 0xbc, 0x00).to_hex(), "#0abc00");
        assert_eq!(Color::rgb(1, 2, 3).to_rgb(), Rgb([1, 2, 3]));
    }
}
