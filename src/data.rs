//! Data section parsing.

use log::warn;

use crate::raster::RasterGrid;

/// Parse every whitespace-separated token of `lines` and feed it, multiplied by
/// `z_scale`, into `grid` in file order.
///
/// Unparsable tokens become NaN samples. Returns the number of tokens read,
/// which may exceed or fall short of the grid capacity.
pub fn fill_grid(lines: &[&str], z_scale: f64, grid: &mut RasterGrid) -> usize {
    let mut count = 0;
    let mut nan_count = 0;

    for line in lines {
        for token in line.split_whitespace() {
            let value = token.parse::<f64>().unwrap_or_else(|_| {
                nan_count += 1;
                f64::NAN
            });
            grid.fill_next(value * z_scale);
            count += 1;
        }
    }

    if nan_count > 0 {
        warn!("{} data token(s) could not be parsed and were stored as NaN", nan_count);
    }
    count
}
