//! Shape-preserving position vectors
//!
//! A [`Cartesian`] holds the x, y and z components of one or many positions
//! as same-shaped arrays. Scalars are kept as one-element arrays internally
//! and unwrapped again at the boundary, so transform code only ever deals
//! with arrays.

use glam::DVec3;
use ndarray::{Array, ArrayD, Dimension, IxDyn};

use crate::error::{FrameError, FrameResult};

/// Cartesian position components in meters.
#[derive(Debug, Clone, PartialEq)]
pub struct Cartesian {
    x: ArrayD<f64>,
    y: ArrayD<f64>,
    z: ArrayD<f64>,
    scalar: bool,
}

impl Cartesian {
    /// A single position; transforms return a single position.
    pub fn scalar(x: f64, y: f64, z: f64) -> Self {
        Self {
            x: ArrayD::from_elem(IxDyn(&[1]), x),
            y: ArrayD::from_elem(IxDyn(&[1]), y),
            z: ArrayD::from_elem(IxDyn(&[1]), z),
            scalar: true,
        }
    }

    /// Positions from component arrays of any dimensionality.
    ///
    /// The three arrays must share one shape. A zero-dimensional input is
    /// treated as a scalar.
    pub fn from_arrays<DX, DY, DZ>(
        x: Array<f64, DX>,
        y: Array<f64, DY>,
        z: Array<f64, DZ>,
    ) -> FrameResult<Self>
    where
        DX: Dimension,
        DY: Dimension,
        DZ: Dimension,
    {
        let (x, y, z) = (x.into_dyn(), y.into_dyn(), z.into_dyn());
        if x.shape() != y.shape() || y.shape() != z.shape() {
            return Err(FrameError::ShapeMismatch {
                x: x.shape().to_vec(),
                y: y.shape().to_vec(),
                z: z.shape().to_vec(),
            });
        }

        if x.ndim() == 0 {
            // at least 1-D internally
            let first = |a: &ArrayD<f64>| a.iter().next().copied().unwrap_or(f64::NAN);
            return Ok(Self::scalar(first(&x), first(&y), first(&z)));
        }

        Ok(Self {
            x,
            y,
            z,
            scalar: false,
        })
    }

    /// One-dimensional positions from component vectors.
    pub fn from_vecs(x: Vec<f64>, y: Vec<f64>, z: Vec<f64>) -> FrameResult<Self> {
        Self::from_arrays(Array::from(x), Array::from(y), Array::from(z))
    }

    /// One-dimensional positions from a list of points.
    pub fn from_points(points: &[DVec3]) -> Self {
        let column = |f: fn(&DVec3) -> f64| -> ArrayD<f64> {
            Array::from_iter(points.iter().map(f)).into_dyn()
        };
        Self {
            x: column(|p| p.x),
            y: column(|p| p.y),
            z: column(|p| p.z),
            scalar: false,
        }
    }

    pub fn is_scalar(&self) -> bool {
        self.scalar
    }

    /// Caller-visible shape; empty for a scalar.
    pub fn shape(&self) -> &[usize] {
        if self.scalar { &[] } else { self.x.shape() }
    }

    /// Number of positions.
    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    pub fn x(&self) -> &ArrayD<f64> {
        &self.x
    }

    pub fn y(&self) -> &ArrayD<f64> {
        &self.y
    }

    pub fn z(&self) -> &ArrayD<f64> {
        &self.z
    }

    /// The components of a scalar position, or `None` for array input.
    pub fn as_scalar(&self) -> Option<(f64, f64, f64)> {
        if !self.scalar {
            return None;
        }
        self.points().first().map(|p| (p.x, p.y, p.z))
    }

    /// Positions flattened in logical (row-major) order.
    pub fn points(&self) -> Vec<DVec3> {
        self.x
            .iter()
            .zip(self.y.iter())
            .zip(self.z.iter())
            .map(|((&x, &y), &z)| DVec3::new(x, y, z))
            .collect()
    }

    /// Components reshaped to the caller-visible shape.
    pub fn into_arrays(self) -> (ArrayD<f64>, ArrayD<f64>, ArrayD<f64>) {
        if !self.scalar {
            return (self.x, self.y, self.z);
        }
        let zero_d = |a: &ArrayD<f64>| {
            ArrayD::from_elem(IxDyn(&[]), a.iter().next().copied().unwrap_or(f64::NAN))
        };
        (zero_d(&self.x), zero_d(&self.y), zero_d(&self.z))
    }

    /// Largest point-wise Euclidean distance to `other`.
    ///
    /// Returns `None` if the two hold a different number of positions.
    pub fn max_distance(&self, other: &Cartesian) -> Option<f64> {
        if self.len() != other.len() {
            return None;
        }
        Some(
            self.points()
                .iter()
                .zip(other.points().iter())
                .map(|(a, b)| a.distance(*b))
                .fold(0.0, f64::max),
        )
    }

    /// New positions with this shape, filled from `points` in logical order.
    pub(crate) fn with_points(&self, points: &[DVec3]) -> Self {
        let mut out = self.clone();
        let rows = out
            .x
            .iter_mut()
            .zip(out.y.iter_mut())
            .zip(out.z.iter_mut());
        for (((x, y), z), p) in rows.zip(points) {
            *x = p.x;
            *y = p.y;
            *z = p.z;
        }
        out
    }
}

impl From<DVec3> for Cartesian {
    fn from(p: DVec3) -> Self {
        Self::scalar(p.x, p.y, p.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{Array2, arr0, array};

    #[test]
    fn test_scalar_shape_and_unwrap() {
        let c = Cartesian::scalar(1.0, 2.0, 3.0);
        assert!(c.is_scalar());
        assert!(c.shape().is_empty());
        assert_eq!(c.len(), 1);
        assert_eq!(c.as_scalar(), Some((1.0, 2.0, 3.0)));
    }

    #[test]
    fn test_zero_dimensional_arrays_become_scalar() {
        let c = Cartesian::from_arrays(arr0(1.0), arr0(2.0), arr0(3.0)).unwrap();
        assert!(c.is_scalar());
        let (x, _, z) = c.into_arrays();
        assert_eq!(x.ndim(), 0);
        assert_eq!(z[IxDyn(&[])], 3.0);
    }

    #[test]
    fn test_shape_mismatch_is_rejected() {
        let err = Cartesian::from_vecs(vec![1.0, 2.0], vec![1.0, 2.0], vec![1.0]).unwrap_err();
        assert_eq!(
            err,
            FrameError::ShapeMismatch {
                x: vec![2],
                y: vec![2],
                z: vec![1],
            }
        );
    }

    #[test]
    fn test_same_size_different_shape_is_rejected() {
        let x = Array2::<f64>::zeros((2, 3));
        let y = Array2::<f64>::zeros((3, 2));
        let z = Array2::<f64>::zeros((2, 3));
        assert!(matches!(
            Cartesian::from_arrays(x, y, z),
            Err(FrameError::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn test_points_follow_row_major_order() {
        let x = array![[1.0, 2.0], [3.0, 4.0]];
        let y = array![[10.0, 20.0], [30.0, 40.0]];
        let z = array![[0.1, 0.2], [0.3, 0.4]];
        let c = Cartesian::from_arrays(x, y, z).unwrap();
        assert_eq!(c.shape(), &[2, 2]);
        let pts = c.points();
        assert_eq!(pts[1], DVec3::new(2.0, 20.0, 0.2));
        assert_eq!(pts[2], DVec3::new(3.0, 30.0, 0.3));
    }

    #[test]
    fn test_with_points_keeps_shape() {
        let x = Array2::<f64>::zeros((2, 3));
        let c = Cartesian::from_arrays(x.clone(), x.clone(), x).unwrap();
        let pts: Vec<DVec3> = (0..6).map(|i| DVec3::splat(i as f64)).collect();
        let filled = c.with_points(&pts);
        assert_eq!(filled.shape(), &[2, 3]);
        assert_eq!(filled.x()[IxDyn(&[1, 0])], 3.0);
        assert_eq!(filled.z()[IxDyn(&[1, 2])], 5.0);
    }

    #[test]
    fn test_from_points_and_distance() {
        let a = Cartesian::from_points(&[DVec3::ZERO, DVec3::X]);
        let b = Cartesian::from_points(&[DVec3::new(3.0, 4.0, 0.0), DVec3::X]);
        assert_eq!(a.shape(), &[2]);
        assert!((a.max_distance(&b).unwrap() - 5.0).abs() < 1e-12);
        assert!(a.max_distance(&Cartesian::scalar(0.0, 0.0, 0.0)).is_none());
    }

    #[test]
    fn test_empty_positions() {
        let c = Cartesian::from_vecs(vec![], vec![], vec![]).unwrap();
        assert!(c.is_empty());
        assert_eq!(c.shape(), &[0]);
        assert!(c.as_scalar().is_none());
    }
}
