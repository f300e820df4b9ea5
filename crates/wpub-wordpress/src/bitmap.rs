//! Conversion of in-memory pixel buffers into bitmap files.

use std::path::Path;

use image::{ImageFormat, RgbImage};

use crate::error::ImageError;

/// Row-major float pixel buffer with values in `[0, 1]`.
///
/// Typical shapes are `[batch, height, width, 3]` or `[height, width, 3]`.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageTensor {
    shape: Vec<usize>,
    data: Vec<f32>,
}

impl ImageTensor {
    /// Create a buffer, checking that `data` fills `shape` exactly.
    ///
    /// A shape whose element count overflows `usize` is a shape error.
    pub fn new(shape: Vec<usize>, data: Vec<f32>) -> Result<Self, ImageError> {
        let Some(expected) = shape.iter().try_fold(1_usize, |acc, &dim| acc.checked_mul(dim))
        else {
            return Err(ImageError::Shape { shape });
        };
        if expected != data.len() {
            return Err(ImageError::DataLength {
                shape,
                expected,
                actual: data.len(),
            });
        }
        Ok(Self { shape, data })
    }

    /// Wrap an 8-bit RGB image as a single-item batch `[1, height, width, 3]`.
    pub fn from_rgb_image(image: &RgbImage) -> Self {
        let (width, height) = image.dimensions();
        Self {
            shape: vec![1, height as usize, width as usize, 3],
            data: image.as_raw().iter().map(|&v| f32::from(v) / 255.0).collect(),
        }
    }

    /// Buffer shape.
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// Reduce to the first `[height, width, 3]` frame and quantize it.
    ///
    /// Leading axes are dropped by taking their first entry until three
    /// axes remain; the last axis must then hold exactly three channels.
    /// Values are scaled by 255 and truncated, saturating outside `[0, 1]`.
    pub fn to_rgb_image(&self) -> Result<RgbImage, ImageError> {
        let shape_error = || ImageError::Shape {
            shape: self.shape.clone(),
        };

        if self.shape.len() < 3 {
            return Err(shape_error());
        }
        let (leading, frame) = self.shape.split_at(self.shape.len() - 3);
        if leading.contains(&0) || frame[2] != 3 {
            return Err(shape_error());
        }

        let (height, width) = (frame[0], frame[1]);
        let width_px = u32::try_from(width).map_err(|_| shape_error())?;
        let height_px = u32::try_from(height).map_err(|_| shape_error())?;

        // The first entry of every leading axis is the start of the buffer.
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let pixels: Vec<u8> = self.data[..height * width * 3]
            .iter()
            .map(|&v| (v * 255.0) as u8)
            .collect();

        RgbImage::from_raw(width_px, height_px, pixels).ok_or_else(shape_error)
    }
}

/// Content type of the files written by [`materialize`].
pub const BITMAP_MIME: &str = "image/png";

/// Write `frame` to `path` as PNG, whatever the extension of `path`.
///
/// An existing file is overwritten.
pub fn materialize(frame: &RgbImage, path: &Path) -> Result<(), ImageError> {
    frame.save_with_format(path, ImageFormat::Png)?;
    Ok(())
}
