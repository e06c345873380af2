//! GeoTIFF fixtures for tests.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use tiff::encoder::{colortype, TiffEncoder};
use tiff::tags::Tag;

/// Writes a Gray8 GeoTIFF carrying the given double-valued tags.
pub fn write_geotiff(path: &Path, width: u32, height: u32, tags: &[(Tag, Vec<f64>)]) {
    let file = File::create(path).unwrap();
    let mut encoder = TiffEncoder::new(BufWriter::new(file)).unwrap();
    let mut image = encoder.new_image::<colortype::Gray8>(width, height).unwrap();
    for (tag, values) in tags {
        image.encoder().write_tag(*tag, &values[..]).unwrap();
    }
    let data = vec![0u8; (width * height) as usize];
    image.write_data(&data).unwrap();
}

pub fn north_up_tags(origin_x: f64, origin_y: f64, pixel: f64) -> Vec<(Tag, Vec<f64>)> {
    vec![
        (Tag::ModelPixelScaleTag, vec![pixel, pixel, 0.0]),
        (Tag::ModelTiepointTag, vec![0.0, 0.0, 0.0, origin_x, origin_y, 0.0]),
    ]
}
