//! PNG format support.
//!
//! Reading always yields an RGBA8 [`PixelBuffer`]: palette and sub-byte
//! images are expanded, 16-bit samples are stripped to 8 bits, and images
//! without alpha get an opaque alpha channel.
//!
//! # Example
//!
//! ```rust,ignore
//! use gray_io::png::{read, write};
//!
//! let image = read("input.png")?;
//! write("output.png", &image)?;
//! ```

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use gray_core::PixelBuffer;
#[allow(unused_imports)]
use tracing::{debug, trace};

use crate::{IoError, IoResult};

/// Reads a PNG file into an RGBA8 buffer.
pub fn read<P: AsRef<Path>>(path: P) -> IoResult<PixelBuffer> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let mut decoder = ::png::Decoder::new(BufReader::new(file));
    decoder.set_transformations(::png::Transformations::EXPAND | ::png::Transformations::STRIP_16);

    let mut reader = decoder
        .read_info()
        .map_err(|e: ::png::DecodingError| IoError::DecodeError(e.to_string()))?;

    let buf_size = reader
        .output_buffer_size()
        .ok_or_else(|| IoError::DecodeError("cannot determine output buffer size".into()))?;
    let mut buf = vec![0u8; buf_size];
    let info = reader
        .next_frame(&mut buf)
        .map_err(|e: ::png::DecodingError| IoError::DecodeError(e.to_string()))?;
    let data = &buf[..info.buffer_size()];

    trace!(
        path = %path.display(),
        color = ?info.color_type,
        depth = ?info.bit_depth,
        "png frame decoded"
    );

    let rgba = expand_to_rgba8(info.color_type, info.bit_depth, data)?;
    let image = PixelBuffer::from_rgba8(info.width, info.height, &rgba)?;
    debug!(path = %path.display(), width = info.width, height = info.height, "read png");
    Ok(image)
}

/// Widens decoder output to interleaved RGBA8.
///
/// `EXPAND | STRIP_16` only ever yields 8-bit gray, gray+alpha, RGB or RGBA,
/// so any other layout means the decoder broke that contract.
fn expand_to_rgba8(
    color_type: ::png::ColorType,
    bit_depth: ::png::BitDepth,
    data: &[u8],
) -> IoResult<Vec<u8>> {
    let rgba = match (color_type, bit_depth) {
        (::png::ColorType::Rgba, ::png::BitDepth::Eight) => data.to_vec(),
        (::png::ColorType::Rgb, ::png::BitDepth::Eight) => data
            .chunks_exact(3)
            .flat_map(|c| [c[0], c[1], c[2], 255])
            .collect(),
        (::png::ColorType::Grayscale, ::png::BitDepth::Eight) => {
            data.iter().flat_map(|&g| [g, g, g, 255]).collect()
        }
        (::png::ColorType::GrayscaleAlpha, ::png::BitDepth::Eight) => data
            .chunks_exact(2)
            .flat_map(|ga| [ga[0], ga[0], ga[0], ga[1]])
            .collect(),
        (color_type, bit_depth) => {
            return Err(IoError::DecodeError(format!(
                "decoder left {:?} {:?} unexpanded",
                color_type, bit_depth
            )));
        }
    };
    Ok(rgba)
}

/// Writes an RGBA8 PNG.
pub fn write<P: AsRef<Path>>(path: P, image: &PixelBuffer) -> IoResult<()> {
    encode(path.as_ref(), image, ::png::ColorType::Rgba, &image.to_rgba8())
}

/// Writes a gray+alpha PNG from a buffer whose pixels all satisfy `r == g == b`.
///
/// # Errors
///
/// Returns [`IoError::EncodeError`] if any pixel is not neutral.
pub fn write_gray<P: AsRef<Path>>(path: P, image: &PixelBuffer) -> IoResult<()> {
    if let Some((c, px)) = image.enumerate_pixels().find(|(_, px)| !px.is_gray()) {
        return Err(IoError::EncodeError(format!(
            "pixel ({}, {}) is not gray: {}",
            c.x, c.y, px
        )));
    }
    let data: Vec<u8> = image.pixels().iter().flat_map(|px| [px.r, px.a]).collect();
    encode(path.as_ref(), image, ::png::ColorType::GrayscaleAlpha, &data)
}

fn encode(path: &Path, image: &PixelBuffer, color: ::png::ColorType, data: &[u8]) -> IoResult<()> {
    if image.is_empty() {
        return Err(IoError::EncodeError(format!(
            "cannot encode {}x{} image",
            image.width(),
            image.height()
        )));
    }

    let file = File::create(path)?;
    let writer = BufWriter::new(file);

    let mut encoder = ::png::Encoder::new(writer, image.width(), image.height());
    encoder.set_color(color);
    encoder.set_depth(::png::BitDepth::Eight);
    encoder.set_compression(::png::Compression::default());

    let mut png_writer = encoder
        .write_header()
        .map_err(|e| IoError::EncodeError(e.to_string()))?;
    png_writer
        .write_image_data(data)
        .map_err(|e| IoError::EncodeError(e.to_string()))?;
    png_writer
        .finish()
        .map_err(|e| IoError::EncodeError(e.to_string()))?;

    debug!(path = %path.display(), color = ?color, "wrote png");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use gray_core::Rgba8;
    use tempfile::tempdir;

    fn pattern(width: u32, height: u32) -> PixelBuffer {
        let mut img = PixelBuffer::new(width, height);
        for y in 0..height {
            for x in 0..width {
                img.set_pixel(x, y, Rgba8::new((x * 16) as u8, (y * 16) as u8, 64, (x + y) as u8));
            }
        }
        img
    }

    #[test]
    fn test_roundtrip_rgba() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("rgba.png");
        let image = pattern(16, 12);

        write(&path, &image).expect("Failed to write PNG");
        let loaded = read(&path).expect("Failed to read PNG");

        assert_eq!(loaded, image);
    }

    #[test]
    fn test_roundtrip_gray() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("gray.png");
        let mut image = PixelBuffer::new(9, 5);
        for (i, px) in image.pixels_mut().iter_mut().enumerate() {
            *px = Rgba8::gray((i * 5) as u8, 255 - i as u8);
        }

        write_gray(&path, &image).expect("Failed to write PNG");
        let loaded = read(&path).expect("Failed to read PNG");

        assert_eq!(loaded, image);
    }

    #[test]
    fn test_write_gray_rejects_color() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("color.png");
        let err = write_gray(&path, &pattern(4, 4)).unwrap_err();
        assert!(matches!(err, IoError::EncodeError(_)));
    }

    /// Encodes `data` with the given layout, bypassing [`write`].
    fn encode_raw(
        path: &Path,
        (width, height): (u32, u32),
        color: ::png::ColorType,
        depth: ::png::BitDepth,
        setup: impl FnOnce(&mut ::png::Encoder<'_, BufWriter<File>>),
        data: &[u8],
    ) {
        let file = File::create(path).unwrap();
        let mut encoder = ::png::Encoder::new(BufWriter::new(file), width, height);
        encoder.set_color(color);
        encoder.set_depth(depth);
        setup(&mut encoder);
        let mut writer = encoder.write_header().unwrap();
        writer.write_image_data(data).unwrap();
        writer.finish().unwrap();
    }

    #[test]
    fn test_read_rgb_gets_opaque_alpha() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("rgb.png");
        encode_raw(
            &path,
            (2, 1),
            ::png::ColorType::Rgb,
            ::png::BitDepth::Eight,
            |_| {},
            &[1, 2, 3, 4, 5, 6],
        );

        let loaded = read(&path).unwrap();
        assert_eq!(loaded.pixels(), &[Rgba8::new(1, 2, 3, 255), Rgba8::new(4, 5, 6, 255)]);
    }

    #[test]
    fn test_read_gray8_gets_opaque_alpha() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("gray8.png");
        encode_raw(
            &path,
            (2, 1),
            ::png::ColorType::Grayscale,
            ::png::BitDepth::Eight,
            |_| {},
            &[200, 7],
        );

        let loaded = read(&path).unwrap();
        assert_eq!(loaded.pixels(), &[Rgba8::gray(200, 255), Rgba8::gray(7, 255)]);
    }

    #[test]
    fn test_read_gray1_expands_to_full_range() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("gray1.png");
        // One packed byte per row, MSB first.
        encode_raw(
            &path,
            (8, 1),
            ::png::ColorType::Grayscale,
            ::png::BitDepth::One,
            |_| {},
            &[0b1010_0001],
        );

        let loaded = read(&path).unwrap();
        let levels: Vec<u8> = loaded.pixels().iter().map(|px| px.r).collect();
        assert_eq!(levels, [255, 0, 255, 0, 0, 0, 0, 255]);
        assert!(loaded.is_gray());
        assert!(loaded.pixels().iter().all(|px| px.a == 255));
    }

    #[test]
    fn test_read_palette_with_transparency() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("indexed.png");
        encode_raw(
            &path,
            (2, 1),
            ::png::ColorType::Indexed,
            ::png::BitDepth::Eight,
            |encoder| {
                encoder.set_palette(vec![10, 20, 30, 40, 50, 60]);
                // Only entry 0 carries alpha; entry 1 stays opaque.
                encoder.set_trns(vec![7]);
            },
            &[0, 1],
        );

        let loaded = read(&path).unwrap();
        assert_eq!(
            loaded.pixels(),
            &[Rgba8::new(10, 20, 30, 7), Rgba8::new(40, 50, 60, 255)]
        );
    }

    #[test]
    fn test_read_rgba16_strips_low_byte() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("rgba16.png");
        // Big-endian samples.
        encode_raw(
            &path,
            (1, 1),
            ::png::ColorType::Rgba,
            ::png::BitDepth::Sixteen,
            |_| {},
            &[0x12, 0x34, 0x56, 0x78, 0x9a, 0xbc, 0xff, 0xff],
        );

        let loaded = read(&path).unwrap();
        assert_eq!(loaded.pixels(), &[Rgba8::new(0x12, 0x56, 0x9a, 0xff)]);
    }

    #[test]
    fn test_unexpanded_layout_is_decode_error() {
        let err = expand_to_rgba8(::png::ColorType::Rgba, ::png::BitDepth::Sixteen, &[0; 8])
            .unwrap_err();
        assert!(matches!(err, IoError::DecodeError(ref m) if m.contains("unexpanded")));
    }

    #[test]
    fn test_write_empty_fails() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("empty.png");
        assert!(matches!(
            write(&path, &PixelBuffer::new(0, 3)),
            Err(IoError::EncodeError(_))
        ));
    }

    #[test]
    fn test_read_garbage() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.png");
        std::fs::write(&path, b"not a png at all").unwrap();
        assert!(matches!(read(&path), Err(IoError::DecodeError(_))));
    }
}
