//! Aspect-preserving sizing for the primary photo

/// Pixel size of a decoded image
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

/// Size an image to fit inside `bounds` without cropping or upscaling
///
/// Returns `(width, height)` in the same units as `bounds`.
pub fn fit_within(natural: Dimensions, bounds: (f32, f32)) -> (f32, f32) {
    let (max_width, max_height) = bounds;
    if natural.width == 0 || natural.height == 0 || max_width <= 0.0 || max_height <= 0.0 {
        return (0.0, 0.0);
    }

    let width = natural.width as f32;
    let height = natural.height as f32;
    let scale = (max_width / width).min(max_height / height).min(1.0);

    (width * scale, height * scale)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dims(width: u32, height: u32) -> Dimensions {
        Dimensions { width, height }
    }

    #[test]
    fn test_small_image_is_not_upscaled() {
        assert_eq!(fit_within(dims(100, 50), (800.0, 600.0)), (100.0, 50.0));
    }

    #[test]
    fn test_wide_image_is_limited_by_width() {
        let (w, h) = fit_within(dims(2000, 1000), (800.0, 600.0));
        assert_eq!((w, h), (800.0, 400.0));
    }

    #[test]
    fn test_tall_image_is_limited_by_height() {
        let (w, h) = fit_within(dims(1000, 3000), (800.0, 600.0));
        assert_eq!((w, h), (200.0, 600.0));
    }

    #[test]
    fn test_degenerate_sizes() {
        assert_eq!(fit_within(dims(0, 10), (800.0, 600.0)), (0.0, 0.0));
        assert_eq!(fit_within(dims(10, 10), (0.0, 600.0)), (0.0, 0.0));
    }
}
