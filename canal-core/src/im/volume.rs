// Copyright (c) 2025, Tom Ouellette
// Licensed under the BSD 3-Clause License

use std::path::Path;

use ndarray::{ArrayD, Axis, Ix2};
use nifti::{IntoNdArray, NiftiObject, ReaderOptions};

use crate::error::CanalError;
use crate::ut::path::has_volume_extension;

/// An intensity volume loaded from a NIfTI file
///
/// The array keeps the on-disk axis order (e.g. `[x, y, z]`) and values are
/// converted to `f32` after applying the header scaling.
///
/// # Examples
///
/// ```no_run
/// use canal_core::im::Volume;
///
/// let volume = Volume::open("t2.nii.gz").unwrap();
/// let plane = volume.plane().unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct Volume {
    data: ArrayD<f32>,
}

impl Volume {
    /// Open a `.nii` or `.nii.gz` volume
    ///
    /// # Arguments
    ///
    /// * `path` - Path to a NIfTI-1 file
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Volume, CanalError> {
        let path = path.as_ref();

        if !has_volume_extension(path) {
            return Err(CanalError::VolumeExtensionError);
        }

        if !path.is_file() {
            return Err(CanalError::NoFileError(path.display().to_string()));
        }

        let object = ReaderOptions::new()
            .read_file(path)
            .map_err(|err| CanalError::VolumeReadError(err.to_string()))?;

        let data = object
            .into_volume()
            .into_ndarray::<f32>()
            .map_err(|err| CanalError::VolumeReadError(err.to_string()))?;

        Ok(Volume { data })
    }

    /// Wrap an existing array as a volume
    pub fn from_array(data: ArrayD<f32>) -> Volume {
        Volume { data }
    }

    /// Shape of the volume in on-disk axis order
    pub fn shape(&self) -> &[usize] {
        self.data.shape()
    }

    /// Reduce the volume to a single 2D plane
    ///
    /// Singleton axes are dropped first. A remaining 2D array is used as-is
    /// and a 3D array yields its middle slice along the last axis.
    pub fn plane(&self) -> Result<Plane, CanalError> {
        let shape_error = || CanalError::VolumeShapeError(self.shape().to_vec());

        let mut view = self.data.view();
        for axis in (0..view.ndim()).rev() {
            if view.ndim() > 2 && view.shape()[axis] == 1 {
                view = view.index_axis_move(Axis(axis), 0);
            }
        }

        if view.ndim() == 3 {
            let middle = view.shape()[2] / 2;
            view = view.index_axis_move(Axis(2), middle);
        }

        let view = view.into_dimensionality::<Ix2>().map_err(|_| shape_error())?;
        let (rows, cols) = view.dim();

        if rows == 0 || cols == 0 {
            return Err(shape_error());
        }

        Plane::new(rows, cols, view.iter().copied().collect())
    }
}

/// A row-major 2D grid of intensities
#[derive(Debug, Clone, PartialEq)]
pub struct Plane {
    rows: usize,
    cols: usize,
    data: Vec<f32>,
}

impl Plane {
    /// Initialize a plane from row-major data
    ///
    /// # Examples
    ///
    /// ```
    /// use canal_core::im::Plane;
    ///
    /// assert!(Plane::new(2, 3, vec![0.0; 6]).is_ok());
    /// assert!(Plane::new(2, 3, vec![0.0; 5]).is_err());
    /// ```
    pub fn new(rows: usize, cols: usize, data: Vec<f32>) -> Result<Plane, CanalError> {
        if rows * cols != data.len() {
            return Err(CanalError::OtherError(format!(
                "Plane data of length {} does not match shape ({}, {})",
                data.len(),
                rows,
                cols
            )));
        }

        Ok(Plane { rows, cols, data })
    }

    /// Number of rows
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Shape as (rows, cols)
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Value at a row and column
    pub fn get(&self, row: usize, col: usize) -> f32 {
        self.data[row * self.cols + col]
    }

    /// Raw row-major values
    pub fn as_raw(&self) -> &[f32] {
        &self.data
    }

    /// Rotate the plane 90 degrees counter-clockwise
    ///
    /// Matches `numpy.rot90` with default arguments: the last column becomes
    /// the first row.
    ///
    /// # Examples
    ///
    /// ```
    /// use canal_core::im::Plane;
    ///
    /// let plane = Plane::new(2, 2, vec![1.0, 2.0, 3.0, 4.0]).unwrap();
    /// assert_eq!(plane.rot90().as_raw(), &[2.0, 4.0, 1.0, 3.0]);
    /// ```
    pub fn rot90(&self) -> Plane {
        let mut data = Vec::with_capacity(self.data.len());

        for i in 0..self.cols {
            for j in 0..self.rows {
                data.push(self.get(j, self.cols - 1 - i));
            }
        }

        Plane {
            rows: self.cols,
            cols: self.rows,
            data,
        }
    }
}

#[cfg(test)]
mod test {

    use super::*;
    use ndarray::{Array, IxDyn};
    use nifti::writer::WriterOptions;

    fn ramp(shape: &[usize]) -> ArrayD<f32> {
        let n: usize = shape.iter().product();
        Array::from_shape_vec(IxDyn(shape), (0..n).map(|v| v as f32).collect()).unwrap()
    }

    #[test]
    fn test_rot90_rectangular() {
        // [[0, 1, 2],
        //  [3, 4, 5]] -> [[2, 5], [1, 4], [0, 3]]
        let plane = Plane::new(2, 3, vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
        let rotated = plane.rot90();

        assert_eq!(rotated.shape(), (3, 2));
        assert_eq!(rotated.as_raw(), &[2.0, 5.0, 1.0, 4.0, 0.0, 3.0]);
    }

    #[test]
    fn test_rot90_four_times() {
        let plane = Plane::new(3, 4, (0..12).map(|v| v as f32).collect()).unwrap();
        assert_eq!(plane.rot90().rot90().rot90().rot90(), plane);
    }

    #[test]
    fn test_plane_from_2d() {
        let volume = Volume::from_array(ramp(&[2, 3]));
        let plane = volume.plane().unwrap();

        assert_eq!(plane.shape(), (2, 3));
        assert_eq!(plane.get(1, 2), 5.0);
    }

    #[test]
    fn test_plane_squeezes_singletons() {
        let volume = Volume::from_array(ramp(&[4, 5, 1]));
        let plane = volume.plane().unwrap();

        assert_eq!(plane.shape(), (4, 5));
        assert_eq!(plane.get(3, 4), 19.0);
    }

    #[test]
    fn test_plane_middle_slice() {
        let volume = Volume::from_array(ramp(&[2, 2, 3]));
        let plane = volume.plane().unwrap();

        // Middle index along the last axis is 1
        assert_eq!(plane.shape(), (2, 2));
        assert_eq!(plane.as_raw(), &[1.0, 4.0, 7.0, 10.0]);
    }

    #[test]
    fn test_plane_shape_error() {
        let volume = Volume::from_array(ramp(&[2, 2, 2, 2]));
        assert!(matches!(
            volume.plane(),
            Err(CanalError::VolumeShapeError(_))
        ));

        let volume = Volume::from_array(ramp(&[7]));
        assert!(volume.plane().is_err());
    }

    #[test]
    fn test_volume_open_nifti() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("volume.nii");

        WriterOptions::new(&path).write_nifti(&ramp(&[3, 4, 1])).unwrap();

        let volume = Volume::open(&path).unwrap();
        assert_eq!(volume.shape(), &[3, 4, 1]);

        let plane = volume.plane().unwrap();
        assert_eq!(plane.shape(), (3, 4));
        assert_eq!(plane.get(2, 3), 11.0);
    }

    #[test]
    fn test_volume_open_errors() {
        assert!(matches!(
            Volume::open("missing.png"),
            Err(CanalError::VolumeExtensionError)
        ));

        assert!(matches!(
            Volume::open("T2.NII.GZ"),
            Err(CanalError::VolumeExtensionError)
        ));

        assert!(matches!(
            Volume::open("missing.nii.gz"),
            Err(CanalError::NoFileError(_))
        ));
    }
}
