//! Simple containers to track images and perform operations on them.

use std::io::{Read, Write};

use crate::decode::DecodeError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ImageFormat {
    Rgba8,
}

impl ImageFormat {
    fn stride(&self) -> u32 {
        match self {
            ImageFormat::Rgba8 => 4,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pixel {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Pixel {
    pub const TRANSPARENT: Pixel = Pixel::new(0, 0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

/// A grid of 8-bit RGBA pixels stored row-major with no row padding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    size: (u32, u32),
    data: Vec<u8>,
    format: ImageFormat,
}

impl Image {
    /// # Panics
    ///
    /// Panics if `data` doesn't hold exactly `size.0 * size.1` RGBA pixels.
    pub fn new_rgba8<D: Into<Vec<u8>>>(size: (u32, u32), data: D) -> Self {
        let data = data.into();
        let format = ImageFormat::Rgba8;

        assert_eq!(
            data.len(),
            Self::byte_len(size, format),
            "pixel data doesn't match a {}x{} RGBA image",
            size.0,
            size.1
        );

        Self { size, data, format }
    }

    pub fn new_empty_rgba8(size: (u32, u32)) -> Self {
        let data = vec![0; Self::byte_len(size, ImageFormat::Rgba8)];
        Self::new_rgba8(size, data)
    }

    /// Creates an image where every pixel has the same color.
    pub fn new_filled_rgba8(size: (u32, u32), pixel: Pixel) -> Self {
        let pixel_count = size.0 as usize * size.1 as usize;
        let data = [pixel.r, pixel.g, pixel.b, pixel.a].repeat(pixel_count);

        Self::new_rgba8(size, data)
    }

    fn byte_len(size: (u32, u32), format: ImageFormat) -> usize {
        size.0 as usize * size.1 as usize * format.stride() as usize
    }

    /// Decodes a PNG image, transcoding grayscale, RGB, indexed and 16-bit
    /// images into 8-bit RGBA.
    pub fn decode_png<R: Read>(input: R) -> Result<Self, DecodeError> {
        Self::decode_png_within(input, u32::MAX)
    }

    /// Like [`decode_png`](#method.decode_png), but fails with
    /// [`DecodeError::TooLarge`] as soon as the header says the image is wider
    /// or taller than `max_side`. No pixel memory is allocated in that case.
    pub fn decode_png_within<R: Read>(input: R, max_side: u32) -> Result<Self, DecodeError> {
        let mut decoder = png::Decoder::new(input);
        decoder.set_transformations(png::Transformations::EXPAND | png::Transformations::STRIP_16);

        let (info, mut reader) = decoder.read_info()?;

        if info.width > max_side || info.height > max_side {
            return Err(DecodeError::TooLarge {
                width: info.width,
                height: info.height,
                max_side,
            });
        }

        let mut data = vec![0; info.buffer_size()];
        reader.next_frame(&mut data)?;

        let size = (info.width, info.height);

        let data = match info.color_type {
            png::ColorType::RGBA => data,
            png::ColorType::RGB => expand_to_rgba(&data, 3, |px| [px[0], px[1], px[2], 255]),
            png::ColorType::GrayscaleAlpha => {
                expand_to_rgba(&data, 2, |px| [px[0], px[0], px[0], px[1]])
            }
            png::ColorType::Grayscale => expand_to_rgba(&data, 1, |px| [px[0], px[0], px[0], 255]),
            other => {
                return Err(DecodeError::UnsupportedLayout {
                    layout: format!("{:?} at {:?} bits", other, info.bit_depth),
                })
            }
        };

        Ok(Self::new_rgba8(size, data))
    }

    pub fn encode_png<W: Write>(&self, output: W) -> Result<(), png::EncodingError> {
        let mut encoder = png::Encoder::new(output, self.size.0, self.size.1);

        match self.format {
            ImageFormat::Rgba8 => {
                encoder.set_color(png::ColorType::RGBA);
                encoder.set_depth(png::BitDepth::Eight);
            }
        }

        let mut output_writer = encoder.write_header()?;
        output_writer.write_image_data(&self.data)?;

        // On drop, output_writer will write the last chunk of the PNG file.
        Ok(())
    }

    pub fn size(&self) -> (u32, u32) {
        self.size
    }

    pub fn width(&self) -> u32 {
        self.size.0
    }

    pub fn height(&self) -> u32 {
        self.size.1
    }

    /// The raw RGBA bytes of the image, row-major.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Copies `other` into this image with its top-left corner at `pos`.
    ///
    /// The caller is responsible for making sure `other` fits at `pos`.
    pub fn blit(&mut self, other: &Image, pos: (u32, u32)) {
        assert!(self.format == ImageFormat::Rgba8 && other.format == ImageFormat::Rgba8);

        let stride = self.format.stride() as usize;

        let other_width_bytes = other.size.0 as usize * stride;
        if other_width_bytes == 0 {
            return;
        }

        let other_rows = other.data.chunks_exact(other_width_bytes);

        for (other_y, other_row) in other_rows.enumerate() {
            let self_y = pos.1 as usize + other_y;

            let start_px = pos.0 as usize + self.size.0 as usize * self_y;

            let start_in_bytes = stride * start_px;
            let end_in_bytes = start_in_bytes + other_row.len();

            let self_row = &mut self.data[start_in_bytes..end_in_bytes];
            self_row.copy_from_slice(other_row);
        }
    }

    /// Mirrors the image top to bottom in place. Pixel values are untouched,
    /// only rows move.
    pub fn flip_vertical(&mut self) {
        let row_bytes = self.size.0 as usize * self.format.stride() as usize;
        let rows = self.size.1 as usize;

        for top in 0..rows / 2 {
            let bottom = rows - 1 - top;

            let (upper, lower) = self.data.split_at_mut(bottom * row_bytes);
            upper[top * row_bytes..(top + 1) * row_bytes].swap_with_slice(&mut lower[..row_bytes]);
        }
    }

    pub fn get_pixel(&self, pos: (u32, u32)) -> Pixel {
        assert!(pos.0 < self.size.0);
        assert!(pos.1 < self.size.1);

        let start = self.pixel_offset(pos);

        Pixel {
            r: self.data[start],
            g: self.data[start + 1],
            b: self.data[start + 2],
            a: self.data[start + 3],
        }
    }

    pub fn set_pixel(&mut self, pos: (u32, u32), pixel: Pixel) {
        assert!(pos.0 < self.size.0);
        assert!(pos.1 < self.size.1);

        let start = self.pixel_offset(pos);

        self.data[start] = pixel.r;
        self.data[start + 1] = pixel.g;
        self.data[start + 2] = pixel.b;
        self.data[start + 3] = pixel.a;
    }

    fn pixel_offset(&self, pos: (u32, u32)) -> usize {
        let stride = self.format.stride() as usize;
        stride * (pos.0 as usize + pos.1 as usize * self.size.0 as usize)
    }
}

fn expand_to_rgba<F>(data: &[u8], channels: usize, convert: F) -> Vec<u8>
where
    F: Fn(&[u8]) -> [u8; 4],
{
    let mut output = Vec::with_capacity(data.len() / channels * 4);

    for pixel in data.chunks_exact(channels) {
        output.extend_from_slice(&convert(pixel));
    }

    output
}
