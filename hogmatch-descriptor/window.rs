use crate::error::{DescriptorError, DescriptorResult};

/// Square pixel window fully inside the image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub x0: usize,
    pub y0: usize,
    pub size: usize,
}

impl Window {
    /// Top-left corner of cell `(row, col)` in a grid of `cells`×`cells`.
    #[inline]
    pub fn cell_origin(&self, row: usize, col: usize, cells: usize) -> (usize, usize) {
        let side = self.size / cells;
        (self.x0 + col * side, self.y0 + row * side)
    }
}

/// Place a `size`×`size` window around `(cx, cy)` and shift it inward
/// until it lies inside a `width`×`height` image.
///
/// The point sits at offset `size / 2 - 1` from the window's top-left
/// corner, matching the detector's reported window centers.
pub fn clamp_window(cx: i64, cy: i64, size: usize, width: usize, height: usize) -> DescriptorResult<Window> {
    if size == 0 || size > width || size > height {
        return Err(DescriptorError::WindowTooLarge {
            feature_width: size,
            width,
            height,
        });
    }
    let lead = (size / 2) as i64 - 1;
    let x0 = (cx - lead).clamp(0, (width - size) as i64) as usize;
    let y0 = (cy - lead).clamp(0, (height - size) as i64) as usize;
    Ok(Window { x0, y0, size })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interior_window() {
        let w = clamp_window(20, 30, 16, 64, 64).unwrap();
        assert_eq!(w, Window { x0: 13, y0: 23, size: 16 });
    }

    #[test]
    fn test_windows_shift_inward_at_edges() {
        assert_eq!(clamp_window(0, 0, 8, 32, 24).unwrap(), Window { x0: 0, y0: 0, size: 8 });
        assert_eq!(clamp_window(31, 23, 8, 32, 24).unwrap(), Window { x0: 24, y0: 16, size: 8 });
        assert_eq!(clamp_window(30, 1, 8, 32, 24).unwrap(), Window { x0: 24, y0: 0, size: 8 });
    }

    #[test]
    fn test_window_filling_image() {
        assert_eq!(clamp_window(5, 5, 8, 8, 8).unwrap(), Window { x0: 0, y0: 0, size: 8 });
    }

    #[test]
    fn test_window_too_large() {
        assert!(matches!(
            clamp_window(4, 4, 16, 12, 40),
            Err(DescriptorError::WindowTooLarge { feature_width: 16, .. })
        ));
    }

    #[test]
    fn test_cell_origin() {
        let w = Window { x0: 10, y0: 20, size: 16 };
        assert_eq!(w.cell_origin(0, 0, 4), (10, 20));
        assert_eq!(w.cell_origin(1, 3, 4), (22, 24));
    }
}
