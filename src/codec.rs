//! Color and identifier encoding for the embedded export target.
//!
//! Converts the 0.0-1.0 float RGB triples used by design files into
//! 24-bit hex strings and 16-bit RGB565 packed values, and turns
//! arbitrary style names into identifiers safe for the export format.

/// RGB color with channels in the 0.0-1.0 range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

/// Convert a 0.0-1.0 float RGB triple to an uppercase `#RRGGBB` string.
///
/// Channels are scaled by 255 and rounded half-up independently.
pub fn rgb_to_hex(r: f32, g: f32, b: f32) -> String {
    let channel = |v: f32| (v * 255.0).round() as u8;
    format!("#{:02X}{:02X}{:02X}", channel(r), channel(g), channel(b))
}

/// Convert a `#RRGGBB` string to a packed RGB565 value formatted as
/// `0xHHHH`.
///
/// Red and blue are rescaled to 5 bits, green to 6, then packed as
/// `(R5 << 11) | (G6 << 5) | B5`. Malformed input yields `"0x0000"`.
pub fn hex_to_rgb565(hex: &str) -> String {
    let Some((r, g, b)) = parse_hex_channels(hex) else {
        return "0x0000".to_string();
    };

    let r5 = ((r as f32) * 31.0 / 255.0).round() as u16;
    let g6 = ((g as f32) * 63.0 / 255.0).round() as u16;
    let b5 = ((b as f32) * 31.0 / 255.0).round() as u16;

    format!("0x{:04X}", (r5 << 11) | (g6 << 5) | b5)
}

/// Convert a `#RRGGBB` string back to 0.0-1.0 float channels.
///
/// Malformed input yields black rather than failing; swatch rendering
/// degrades instead of aborting.
pub fn hex_to_rgb(hex: &str) -> Rgb {
    let Some((r, g, b)) = parse_hex_channels(hex) else {
        return Rgb {
            r: 0.0,
            g: 0.0,
            b: 0.0,
        };
    };

    Rgb {
        r: r as f32 / 255.0,
        g: g as f32 / 255.0,
        b: b as f32 / 255.0,
    }
}

fn parse_hex_channels(hex: &str) -> Option<(u8, u8, u8)> {
    let digits = hex.strip_prefix('#')?;
    if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }

    let r = u8::from_str_radix(&digits[0..2], 16).ok()?;
    let g = u8::from_str_radix(&digits[2..4], 16).ok()?;
    let b = u8::from_str_radix(&digits[4..6], 16).ok()?;
    Some((r, g, b))
}

/// Turn an arbitrary display name into an identifier safe for the
/// export format.
///
/// Characters other than alphanumerics, underscores, hyphens, and
/// spaces are stripped; runs of spaces/hyphens collapse to a single
/// underscore; the result is lowercased. Two names may sanitize to the
/// same identifier; the export encoder resolves that first-write-wins.
pub fn sanitize_identifier(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut pending_separator = false;

    for ch in name.chars() {
        if ch == ' ' || ch == '-' {
            pending_separator = true;
        } else if ch.is_alphanumeric() || ch == '_' {
            if pending_separator {
                out.push('_');
                pending_separator = false;
            }
            for lower in ch.to_lowercase() {
                out.push(lower);
            }
        }
        // anything else is stripped without breaking a separator run
    }

    if pending_separator {
        out.push('_');
    }

    out
}
