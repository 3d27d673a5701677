//! Reading and writing of encoded images
//!
//! Sources may be PNG, JPEG, GIF, BMP or PNM. Rasters produced by the
//!   magnified renderer are written as PNG and handed to the display layer
//!   as `data:` URLs.

use crate::error::Error;
use crate::error::Result;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use image::codecs::png::PngEncoder;
use image::ImageEncoder;

use std::io::Cursor;

const DATA_URL_PREFIX: &str = "data:";
const PNG_DATA_URL_PREFIX: &str = "data:image/png;base64,";

/// Decode an encoded image into RGBA bytes, width and height
pub fn decode_rgba(bytes: &[u8]) -> Result<(Vec<u8>, usize, usize)> {
    let img = image::load_from_memory(bytes).map_err(Error::Decode)?.to_rgba8();
    let (w, h) = img.dimensions();
    Ok((img.into_raw(), w as usize, h as usize))
}

/// Width and height of an encoded image, read from its header only
pub fn header_dimensions(bytes: &[u8]) -> Result<(usize, usize)> {
    let (w, h) = image::io::Reader::new(Cursor::new(bytes))
        .with_guessed_format()?
        .into_dimensions()
        .map_err(Error::Decode)?;
    Ok((w as usize, h as usize))
}

/// Encode RGBA bytes as PNG
pub fn encode_png(buf: &[u8], width: usize, height: usize) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    PngEncoder::new(&mut out)
        .write_image(buf, width as u32, height as u32, image::ColorType::Rgba8)
        .map_err(Error::Encode)?;
    Ok(out)
}

/// Wrap PNG bytes in a `data:image/png;base64,` URL
pub fn png_data_url(png: &[u8]) -> String {
    format!("{}{}", PNG_DATA_URL_PREFIX, STANDARD.encode(png))
}

/// Source refers to inline data
pub fn is_data_url(source: &str) -> bool {
    source.starts_with(DATA_URL_PREFIX)
}

/// Payload of a `data:` URL
///
///     use imtrace::codec::parse_data_url;
///
///     let bytes = parse_data_url("data:image/png;base64,AQID").unwrap();
///     assert_eq!(bytes, vec![1, 2, 3]);
///     let bytes = parse_data_url("data:text/plain,hi%21").unwrap();
///     assert_eq!(bytes, b"hi!".to_vec());
///
pub fn parse_data_url(source: &str) -> Result<Vec<u8>> {
    let invalid = |reason: &str| Error::Load {
        source_ref: truncate(source),
        reason: reason.to_string(),
    };
    let rest = source.strip_prefix(DATA_URL_PREFIX).ok_or_else(|| invalid("not a data url"))?;
    let comma = rest.find(',').ok_or_else(|| invalid("missing ',' in data url"))?;
    let (header, payload) = (&rest[..comma], &rest[comma + 1..]);
    if header.ends_with(";base64") {
        STANDARD.decode(payload.trim()).map_err(|e| invalid(&e.to_string()))
    } else {
        percent_decode(payload).ok_or_else(|| invalid("bad percent escape"))
    }
}

fn percent_decode(s: &str) -> Option<Vec<u8>> {
    let b = s.as_bytes();
    let mut out = Vec::with_capacity(b.len());
    let mut k = 0;
    while k < b.len() {
        if b[k] == b'%' {
            let hex = b.get(k + 1 .. k + 3)?;
            if !hex.iter().all(u8::is_ascii_hexdigit) {
                return None;
            }
            out.push(u8::from_str_radix(std::str::from_utf8(hex).ok()?, 16).ok()?);
            k += 3;
        } else {
            out.push(b[k]);
            k += 1;
        }
    }
    Some(out)
}

/// Shortened source reference for messages; data urls can be megabytes
pub(crate) fn truncate(source: &str) -> String {
    const MAX: usize = 64;
    match source.char_indices().nth(MAX) {
        Some((k, _)) => format!("{}...", &source[..k]),
        None => source.to_string(),
    }
}
