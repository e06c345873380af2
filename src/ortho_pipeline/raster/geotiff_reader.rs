//! GeoTIFF header reader using the tiff library.
//!
//! Only the first IFD is inspected; pixel data is never decoded. The
//! geotransform comes from `ModelTransformationTag` when present, otherwise
//! from `ModelTiepointTag` combined with `ModelPixelScaleTag`.

use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;

use tiff::decoder::Decoder;
use tiff::tags::Tag;
use tiff::TiffResult;
use tracing::{debug, instrument};

use crate::ortho_pipeline::common::error::{DescribeError, Result};
use crate::ortho_pipeline::raster::reader::BoundsReader;
use crate::ortho_pipeline::raster::types::{BoundingBox, GeoTransform};

/// Bounds reader for GeoTIFF rasters.
#[derive(Debug, Default, Clone, Copy)]
pub struct GeoTiffBoundsReader;

impl BoundsReader for GeoTiffBoundsReader {
    #[instrument(skip_all, fields(image = %image_path.display()))]
    fn read_bounds(&self, image_path: &Path) -> Result<BoundingBox> {
        let read_error =
            |e: &dyn std::fmt::Display| DescribeError::RasterReadError(format!("{}: {}", image_path.display(), e));

        let file = File::open(image_path).map_err(|e| read_error(&e))?;
        let mut decoder = Decoder::new(BufReader::new(file)).map_err(|e| read_error(&e))?;

        let (width, height) = decoder.dimensions().map_err(|e| read_error(&e))?;
        let transform = read_geo_transform(&mut decoder)
            .map_err(|e| read_error(&e))?
            .ok_or_else(|| DescribeError::MissingGeoreference(image_path.display().to_string()))?;

        debug!("Raster {}x{}, transform {:?}", width, height, transform.0);
        Ok(transform.bounds(width, height))
    }
}

/// Reads the affine transform from the GeoTIFF tags of the current IFD.
pub fn read_geo_transform<R: Read + Seek>(decoder: &mut Decoder<R>) -> TiffResult<Option<GeoTransform>> {
    if let Some(value) = decoder.find_tag(Tag::ModelTransformationTag)? {
        let m = value.into_f64_vec()?;
        if m.len() >= 16 {
            return Ok(Some(GeoTransform([m[3], m[0], m[1], m[7], m[4], m[5]])));
        }
    }

    let scale = decoder
        .find_tag(Tag::ModelPixelScaleTag)?
        .map(|v| v.into_f64_vec())
        .transpose()?;
    let tiepoint = decoder
        .find_tag(Tag::ModelTiepointTag)?
        .map(|v| v.into_f64_vec())
        .transpose()?;

    match (scale, tiepoint) {
        (Some(s), Some(t)) if s.len() >= 2 && t.len() >= 6 => {
            // tiepoint (I, J, K, X, Y, Z) pins raster cell (I, J) to model (X, Y)
            let origin_x = t[3] - t[0] * s[0];
            let origin_y = t[4] + t[1] * s[1];
            Ok(Some(GeoTransform::north_up(origin_x, origin_y, s[0], -s[1])))
        }
        _ => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ortho_pipeline::raster::fixtures::{north_up_tags, write_geotiff};

    #[test]
    fn test_bounds_from_tiepoint_and_scale() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("red.tif");
        write_geotiff(&path, 1000, 1000, &north_up_tags(500000.0, 4000000.0, 0.05));

        let bbox = GeoTiffBoundsReader.read_bounds(&path).unwrap();

        assert_eq!(bbox.xmin, 500000.0);
        assert_eq!(bbox.ymax, 4000000.0);
        assert!((bbox.xmax - 500050.0).abs() < 1e-6);
        assert!((bbox.ymin - 3999950.0).abs() < 1e-6);
    }

    #[test]
    fn test_bounds_from_offset_tiepoint() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nir.tif");
        // cell (10, 20) sits at (1010, 1980) with 1 m pixels
        let tags = vec![
            (Tag::ModelPixelScaleTag, vec![1.0, 1.0, 0.0]),
            (Tag::ModelTiepointTag, vec![10.0, 20.0, 0.0, 1010.0, 1980.0, 0.0]),
        ];
        write_geotiff(&path, 100, 50, &tags);

        let bbox = GeoTiffBoundsReader.read_bounds(&path).unwrap();

        assert_eq!(bbox, BoundingBox { xmin: 1000.0, ymin: 1950.0, xmax: 1100.0, ymax: 2000.0 });
    }

    #[test]
    fn test_bounds_from_model_transformation() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dsm.tif");
        #[rustfmt::skip]
        let matrix = vec![
            2.0, 0.0, 0.0, 300.0,
            0.0, -2.0, 0.0, 900.0,
            0.0, 0.0, 0.0, 0.0,
            0.0, 0.0, 0.0, 1.0,
        ];
        write_geotiff(&path, 10, 20, &[(Tag::ModelTransformationTag, matrix)]);

        let bbox = GeoTiffBoundsReader.read_bounds(&path).unwrap();

        assert_eq!(bbox, BoundingBox { xmin: 300.0, ymin: 860.0, xmax: 320.0, ymax: 900.0 });
    }

    #[test]
    fn test_plain_tiff_has_no_georeference() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plain.tif");
        write_geotiff(&path, 4, 4, &[]);

        let result = GeoTiffBoundsReader.read_bounds(&path);

        assert!(matches!(result, Err(DescribeError::MissingGeoreference(_))));
    }

    #[test]
    fn test_corrupt_file_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.tif");
        std::fs::write(&path, b"definitely not a tiff").unwrap();

        let result = GeoTiffBoundsReader.read_bounds(&path);

        assert!(matches!(result, Err(DescribeError::RasterReadError(_))));
    }
}
