//! Dense height raster filled from a flat sample stream.

use crate::error::{Error, Result};
use crate::models::Point3D;

/// Height values of a `points × profiles` scan field.
///
/// Samples are stored profile by profile, so the running index `k` of a sample
/// maps to `(k % points, k / points)`. Out-of-range lookups return NaN instead of
/// failing.
#[derive(Debug, Clone)]
pub struct RasterGrid {
    points: usize,
    profiles: usize,
    heights: Vec<f64>,
    running_index: usize,
    x_scale: f64,
    y_scale: f64,
    x_offset: f64,
    y_offset: f64,
    z_offset: f64,
}

impl RasterGrid {
    /// Allocate a zero-filled grid of `points` samples per profile.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RasterTooLarge`] when `points × profiles` overflows or
    /// the heights cannot be allocated.
    pub fn new(points: usize, profiles: usize) -> Result<Self> {
        let too_large = || Error::RasterTooLarge { points, profiles };
        let len = points.checked_mul(profiles).ok_or_else(too_large)?;
        let mut heights = Vec::new();
        heights.try_reserve_exact(len).map_err(|_| too_large())?;
        heights.resize(len, 0.0);

        Ok(Self {
            points,
            profiles,
            heights,
            running_index: 0,
            x_scale: 1.0,
            y_scale: 1.0,
            x_offset: 0.0,
            y_offset: 0.0,
            z_offset: 0.0,
        })
    }

    /// Set the lateral sample spacings.
    pub fn with_scales(mut self, x_scale: f64, y_scale: f64) -> Self {
        self.x_scale = x_scale;
        self.y_scale = y_scale;
        self
    }

    /// Set the origin of the scan field.
    pub fn with_offsets(mut self, x_offset: f64, y_offset: f64, z_offset: f64) -> Self {
        self.x_offset = x_offset;
        self.y_offset = y_offset;
        self.z_offset = z_offset;
        self
    }

    pub fn points(&self) -> usize {
        self.points
    }

    pub fn profiles(&self) -> usize {
        self.profiles
    }

    /// Number of samples written so far.
    pub fn filled(&self) -> usize {
        self.running_index
    }

    pub fn capacity(&self) -> usize {
        self.heights.len()
    }

    /// Store `value` at the running index and advance it.
    ///
    /// Values beyond the declared dimensions are dropped.
    pub fn fill_next(&mut self, value: f64) {
        if self.running_index >= self.heights.len() {
            return;
        }
        self.heights[self.running_index] = value;
        self.running_index += 1;
    }

    pub fn is_complete(&self) -> bool {
        self.running_index == self.heights.len()
    }

    fn point_index(&self, point: i64) -> Option<usize> {
        usize::try_from(point).ok().filter(|&p| p < self.points)
    }

    fn profile_index(&self, profile: i64) -> Option<usize> {
        usize::try_from(profile).ok().filter(|&n| n < self.profiles)
    }

    /// Stored height, or NaN when either index is out of range.
    pub fn value_at(&self, point: i64, profile: i64) -> f64 {
        match (self.point_index(point), self.profile_index(profile)) {
            (Some(p), Some(n)) => self.heights[n * self.points + p],
            _ => f64::NAN,
        }
    }

    /// Physical coordinates of a grid node.
    ///
    /// An out-of-range point index makes `x` NaN, an out-of-range profile index
    /// makes `y` NaN, and either makes `z` NaN.
    pub fn point_at(&self, point: i64, profile: i64) -> Point3D {
        let x = match self.point_index(point) {
            Some(p) => p as f64 * self.x_scale + self.x_offset,
            None => f64::NAN,
        };
        let y = match self.profile_index(profile) {
            Some(n) => n as f64 * self.y_scale + self.y_offset,
            None => f64::NAN,
        };
        let z = self.value_at(point, profile) + self.z_offset;
        Point3D::new(x, y, z)
    }

    /// Heights of one profile; all NaN for an out-of-range profile.
    pub fn profile_at(&self, profile: i64) -> Vec<f64> {
        (0..self.points as i64)
            .map(|point| self.value_at(point, profile))
            .collect()
    }

    /// Physical points of one profile.
    pub fn points_of_profile(&self, profile: i64) -> Vec<Point3D> {
        (0..self.points as i64)
            .map(|point| self.point_at(point, profile))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_grid(points: usize, profiles: usize) -> RasterGrid {
        let mut grid = RasterGrid::new(points, profiles).unwrap();
        for k in 0..points * profiles {
            grid.fill_next(k as f64);
        }
        grid
    }

    #[test]
    fn test_new_grid_is_zeroed() {
        let grid = RasterGrid::new(3, 2).unwrap();
        assert_eq!(grid.capacity(), 6);
        assert_eq!(grid.filled(), 0);
        assert!(!grid.is_complete());
        assert_eq!(grid.value_at(2, 1), 0.0);
    }

    #[test]
    fn test_oversized_grid_is_an_error() {
        let err = RasterGrid::new(usize::MAX, 2).unwrap_err();
        assert!(matches!(err, Error::RasterTooLarge { profiles: 2, .. }));

        // fits in usize but not in memory
        let err = RasterGrid::new(i32::MAX as usize, i32::MAX as usize).unwrap_err();
        assert_eq!(err.status(), crate::error::Status::HeaderParseError);
    }

    #[test]
    fn test_fill_is_row_major() {
        let grid = filled_grid(3, 2);
        assert!(grid.is_complete());
        assert_eq!(grid.value_at(0, 0), 0.0);
        assert_eq!(grid.value_at(2, 0), 2.0);
        assert_eq!(grid.value_at(0, 1), 3.0);
        assert_eq!(grid.value_at(2, 1), 5.0);
    }

    #[test]
    fn test_fill_past_end_is_ignored() {
        let mut grid = filled_grid(2, 2);
        grid.fill_next(99.0);
        assert_eq!(grid.filled(), 4);
        assert!(grid.is_complete());
        assert_eq!(grid.value_at(1, 1), 3.0);
    }

    #[test]
    fn test_value_at_out_of_range() {
        let grid = filled_grid(3, 2);
        for (p, n) in [(-1, 0), (0, -1), (3, 0), (0, 2), (3, 2), (-5, -5)] {
            assert!(grid.value_at(p, n).is_nan(), "({p}, {n}) should be NaN");
        }
    }

    #[test]
    fn test_point_at_applies_scale_and_offset() {
        let grid = filled_grid(3, 2)
            .with_scales(0.5, 2.0)
            .with_offsets(10.0, 20.0, 1.0);
        let point = grid.point_at(2, 1);
        assert_eq!(point, Point3D::new(11.0, 22.0, 6.0));
    }

    #[test]
    fn test_point_at_marks_invalid_axis() {
        let grid = filled_grid(3, 2);
        let point = grid.point_at(5, 1);
        assert!(point.x.is_nan());
        assert_eq!(point.y, 1.0);
        assert!(point.z.is_nan());

        let point = grid.point_at(1, -1);
        assert_eq!(point.x, 1.0);
        assert!(point.y.is_nan());
        assert!(point.z.is_nan());
    }

    #[test]
    fn test_profile_at() {
        let grid = filled_grid(3, 2);
        assert_eq!(grid.profile_at(1), vec![3.0, 4.0, 5.0]);
        let missing = grid.profile_at(7);
        assert_eq!(missing.len(), 3);
        assert!(missing.iter().all(|v| v.is_nan()));
    }

    #[test]
    fn test_points_of_profile() {
        let grid = filled_grid(2, 2).with_scales(0.1, 0.2);
        let points = grid.points_of_profile(1);
        assert_eq!(points.len(), 2);
        assert_eq!(points[1].z, 3.0);
        assert!((points[1].x - 0.1).abs() < 1e-12);
        assert!((points[1].y - 0.2).abs() < 1e-12);
    }
}
