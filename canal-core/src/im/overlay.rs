// Copyright (c) 2025, Tom Ouellette
// Licensed under the BSD 3-Clause License

use std::path::{Path, PathBuf};

use image::imageops::{self, FilterType};
use image::{ImageFormat, Rgb, RgbImage};

use crate::constant;
use crate::error::CanalError;
use crate::im::{Plane, Volume};
use crate::ut::path::output_dir;

/// Display settings for a quick-look segmentation overlay
#[derive(Debug, Clone)]
pub struct OverlayStyle {
    /// Intensity window mapped to black..white for the base image
    pub image_window: (f32, f32),
    /// Mask values inside this window are drawn, everything else is hidden
    pub mask_window: (f32, f32),
    /// Opacity of the mask colour
    pub alpha: f32,
    /// Width and height of the square output figure in pixels
    pub figure_size: u32,
    /// Axes box as (left, bottom, right, top) figure fractions
    pub axes_box: (f32, f32, f32, f32),
}

impl Default for OverlayStyle {
    fn default() -> Self {
        OverlayStyle {
            image_window: constant::IMAGE_WINDOW,
            mask_window: constant::MASK_WINDOW,
            alpha: constant::MASK_ALPHA,
            figure_size: constant::FIGURE_SIZE,
            axes_box: constant::AXES_BOX,
        }
    }
}

/// Normalize a value into [0, 1] over a (min, max) window
///
/// Values outside the window are clipped and NaN maps to 0.
fn normalize(value: f32, window: (f32, f32)) -> f32 {
    let (lo, hi) = window;
    if value.is_nan() || hi <= lo {
        return 0.0;
    }

    ((value - lo) / (hi - lo)).clamp(0.0, 1.0)
}

/// Reversed greys colour map (low is black, high is white)
pub fn greys_r(value: f32, window: (f32, f32)) -> Rgb<u8> {
    let v = (normalize(value, window) * 255.0).round() as u8;
    Rgb([v, v, v])
}

/// Linearly interpolated ColorBrewer reds colour map
pub fn reds(value: f32, window: (f32, f32)) -> Rgb<u8> {
    let position = normalize(value, window) * (constant::REDS.len() - 1) as f32;
    let lower = position.floor() as usize;
    let upper = (lower + 1).min(constant::REDS.len() - 1);
    let fraction = position - lower as f32;

    let a = constant::REDS[lower];
    let b = constant::REDS[upper];

    Rgb([0usize, 1, 2].map(|c| {
        (a[c] as f32 + (b[c] as f32 - a[c] as f32) * fraction).round() as u8
    }))
}

/// Alpha blend a foreground colour over a background colour
fn blend(background: Rgb<u8>, foreground: Rgb<u8>, alpha: f32) -> Rgb<u8> {
    let alpha = alpha.clamp(0.0, 1.0);
    Rgb([0usize, 1, 2].map(|c| {
        (foreground[c] as f32 * alpha + background[c] as f32 * (1.0 - alpha)).round() as u8
    }))
}

/// Compose a rotated image plane and mask plane at native resolution
///
/// # Arguments
///
/// * `image` - Greyscale intensity plane
/// * `mask` - Segmentation plane with the same shape as `image`
/// * `style` - Display windows and opacity
pub fn compose(image: &Plane, mask: &Plane, style: &OverlayStyle) -> Result<RgbImage, CanalError> {
    if image.shape() != mask.shape() {
        return Err(CanalError::ShapeMismatchError(image.shape(), mask.shape()));
    }

    let image = image.rot90();
    let mask = mask.rot90();
    let (lo, hi) = style.mask_window;

    Ok(RgbImage::from_fn(
        image.cols() as u32,
        image.rows() as u32,
        |x, y| {
            let (row, col) = (y as usize, x as usize);
            let base = greys_r(image.get(row, col), style.image_window);

            let m = mask.get(row, col);
            if m >= lo && m <= hi {
                blend(base, reds(m, style.mask_window), style.alpha)
            } else {
                base
            }
        },
    ))
}

/// Render an overlay figure with the composite centred in the axes box
///
/// The composite keeps its aspect ratio and is scaled with nearest
/// neighbour sampling onto a white square figure with no axis decorations.
pub fn render_overlay(
    image: &Plane,
    mask: &Plane,
    style: &OverlayStyle,
) -> Result<RgbImage, CanalError> {
    let composite = compose(image, mask, style)?;

    let size = style.figure_size as f32;
    let (left, bottom, right, top) = style.axes_box;

    let box_x = (left * size).round();
    let box_y = ((1.0 - top) * size).round();
    let box_w = ((right - left) * size).round().max(1.0);
    let box_h = ((top - bottom) * size).round().max(1.0);

    let scale = (box_w / composite.width() as f32).min(box_h / composite.height() as f32);
    let new_w = ((composite.width() as f32 * scale).round() as u32).max(1);
    let new_h = ((composite.height() as f32 * scale).round() as u32).max(1);

    let resized = imageops::resize(&composite, new_w, new_h, FilterType::Nearest);

    let x = box_x as i64 + ((box_w as i64 - new_w as i64) / 2);
    let y = box_y as i64 + ((box_h as i64 - new_h as i64) / 2);

    let mut figure = RgbImage::from_pixel(
        style.figure_size,
        style.figure_size,
        Rgb([255, 255, 255]),
    );
    imageops::overlay(&mut figure, &resized, x, y);

    Ok(figure)
}

/// Load an image and mask volume and write `seg_qc.png` next to the mask
///
/// Any previous `seg_qc.png` in the mask directory is overwritten.
///
/// # Arguments
///
/// * `image_path` - Path to the input image volume
/// * `seg_path` - Path to the segmentation mask volume
/// * `style` - Display settings
///
/// # Examples
///
/// ```no_run
/// use canal_core::im::{OverlayStyle, save_overlay};
///
/// let qc = save_overlay("t2.nii.gz", "out/t2_canal.nii.gz", &OverlayStyle::default());
/// ```
pub fn save_overlay<P: AsRef<Path>, Q: AsRef<Path>>(
    image_path: P,
    seg_path: Q,
    style: &OverlayStyle,
) -> Result<PathBuf, CanalError> {
    let image = Volume::open(image_path)?.plane()?;
    let mask = Volume::open(&seg_path)?.plane()?;

    let figure = render_overlay(&image, &mask, style)?;

    let output = output_dir(&seg_path).join(constant::QC_FILENAME);
    figure
        .save_with_format(&output, ImageFormat::Png)
        .map_err(|err| CanalError::ImageWriteError(err.to_string()))?;

    Ok(output)
}

#[cfg(test)]
mod test {

    use super::*;
    use ndarray::{Array, IxDyn};
    use nifti::writer::WriterOptions;

    const WHITE: Rgb<u8> = Rgb([255, 255, 255]);

    #[test]
    fn test_greys_r_window() {
        let window = constant::IMAGE_WINDOW;
        assert_eq!(greys_r(-10.0, window), Rgb([0, 0, 0]));
        assert_eq!(greys_r(0.0, window), Rgb([0, 0, 0]));
        assert_eq!(greys_r(75.0, window), Rgb([128, 128, 128]));
        assert_eq!(greys_r(150.0, window), WHITE);
        assert_eq!(greys_r(4000.0, window), WHITE);
        assert_eq!(greys_r(f32::NAN, window), Rgb([0, 0, 0]));
    }

    #[test]
    fn test_reds_endpoints() {
        let window = constant::MASK_WINDOW;
        assert_eq!(reds(0.9, window), Rgb(constant::REDS[0]));
        assert_eq!(reds(1.0, window), Rgb(constant::REDS[8]));
    }

    #[test]
    fn test_blend_half() {
        let blended = blend(Rgb([0, 0, 0]), Rgb([200, 100, 50]), 0.5);
        assert_eq!(blended, Rgb([100, 50, 25]));
    }

    #[test]
    fn test_compose_mask_window() {
        // Only the value 1.0 lies inside the default mask window
        let image = Plane::new(1, 3, vec![0.0, 0.0, 0.0]).unwrap();
        let mask = Plane::new(1, 3, vec![0.0, 1.0, 2.0]).unwrap();

        let composite = compose(&image, &mask, &OverlayStyle::default()).unwrap();

        // A 1x3 plane rotates to 3x1 with the last column first
        assert_eq!(composite.dimensions(), (1, 3));
        assert_eq!(*composite.get_pixel(0, 0), Rgb([0, 0, 0]));
        assert_eq!(*composite.get_pixel(0, 1), Rgb([52, 0, 7]));
        assert_eq!(*composite.get_pixel(0, 2), Rgb([0, 0, 0]));
    }

    #[test]
    fn test_compose_shape_mismatch() {
        let image = Plane::new(2, 2, vec![0.0; 4]).unwrap();
        let mask = Plane::new(2, 3, vec![0.0; 6]).unwrap();

        assert!(matches!(
            compose(&image, &mask, &OverlayStyle::default()),
            Err(CanalError::ShapeMismatchError((2, 2), (2, 3)))
        ));
    }

    #[test]
    fn test_render_overlay_figure() {
        let image = Plane::new(4, 4, vec![150.0; 16]).unwrap();
        let mask = Plane::new(4, 4, vec![0.0; 16]).unwrap();
        let style = OverlayStyle::default();

        let figure = render_overlay(&image, &mask, &style).unwrap();
        assert_eq!(figure.dimensions(), (800, 800));

        // Corners sit outside the axes box
        assert_eq!(*figure.get_pixel(0, 0), WHITE);
        assert_eq!(*figure.get_pixel(799, 799), WHITE);

        let image = Plane::new(4, 4, vec![0.0; 16]).unwrap();
        let figure = render_overlay(&image, &mask, &style).unwrap();

        // Centre of the figure is inside the black image
        assert_eq!(*figure.get_pixel(400, 400), Rgb([0, 0, 0]));
        assert_eq!(*figure.get_pixel(10, 400), WHITE);
    }

    #[test]
    fn test_save_overlay_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let image_path = dir.path().join("t2.nii");
        let seg_path = dir.path().join("t2_canal.nii");

        let image = Array::from_shape_vec(IxDyn(&[6, 6, 1]), vec![100.0f32; 36]).unwrap();
        let mask = Array::from_shape_fn(IxDyn(&[6, 6, 1]), |idx| {
            if idx[0] == 3 { 1.0f32 } else { 0.0 }
        });

        WriterOptions::new(&image_path).write_nifti(&image).unwrap();
        WriterOptions::new(&seg_path).write_nifti(&mask).unwrap();

        let qc = save_overlay(&image_path, &seg_path, &OverlayStyle::default()).unwrap();
        assert_eq!(qc, dir.path().join("seg_qc.png"));
        assert!(qc.is_file());

        std::fs::write(&qc, b"stale").unwrap();
        save_overlay(&image_path, &seg_path, &OverlayStyle::default()).unwrap();

        let reopened = image::open(&qc).unwrap();
        assert_eq!(reopened.width(), 800);
    }
}
