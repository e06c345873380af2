//! Raster georeferencing types

use serde::Serialize;

/// Extent of a raster in its native coordinate reference system
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BoundingBox {
    pub xmin: f64,
    pub ymin: f64,
    pub xmax: f64,
    pub ymax: f64,
}

/// Affine pixel-to-world transform in GDAL coefficient order
///
/// `x = c[0] + col * c[1] + row * c[2]`, `y = c[3] + col * c[4] + row * c[5]`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoTransform(pub [f64; 6]);

impl GeoTransform {
    /// North-up transform from an origin and a signed pixel size.
    pub fn north_up(origin_x: f64, origin_y: f64, pixel_width: f64, pixel_height: f64) -> Self {
        GeoTransform([origin_x, pixel_width, 0.0, origin_y, 0.0, pixel_height])
    }

    pub fn apply(&self, col: f64, row: f64) -> (f64, f64) {
        let c = &self.0;
        (c[0] + col * c[1] + row * c[2], c[3] + col * c[4] + row * c[5])
    }

    /// Extent covered by a `width` x `height` raster.
    pub fn bounds(&self, width: u32, height: u32) -> BoundingBox {
        let (w, h) = (width as f64, height as f64);
        let corners = [
            self.apply(0.0, 0.0),
            self.apply(w, 0.0),
            self.apply(0.0, h),
            self.apply(w, h),
        ];

        let mut bbox = BoundingBox {
            xmin: f64::INFINITY,
            ymin: f64::INFINITY,
            xmax: f64::NEG_INFINITY,
            ymax: f64::NEG_INFINITY,
        };
        for (x, y) in corners {
            bbox.xmin = bbox.xmin.min(x);
            bbox.ymin = bbox.ymin.min(y);
            bbox.xmax = bbox.xmax.max(x);
            bbox.ymax = bbox.ymax.max(y);
        }
        bbox
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_north_up_bounds() {
        let gt = GeoTransform::north_up(500000.0, 4000000.0, 0.05, -0.05);
        let bbox = gt.bounds(1000, 1000);

        assert_eq!(bbox.xmin, 500000.0);
        assert_eq!(bbox.ymax, 4000000.0);
        assert!((bbox.xmax - 500050.0).abs() < 1e-6);
        assert!((bbox.ymin - 3999950.0).abs() < 1e-6);
    }

    #[test]
    fn test_rotated_bounds_cover_all_corners() {
        // 90 degree rotation: columns run south, rows run east
        let gt = GeoTransform([100.0, 0.0, 1.0, 200.0, -1.0, 0.0]);
        let bbox = gt.bounds(10, 20);

        assert_eq!(
            bbox,
            BoundingBox { xmin: 100.0, ymin: 190.0, xmax: 120.0, ymax: 200.0 }
        );
    }
}
