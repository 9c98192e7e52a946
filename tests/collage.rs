//! End-to-end checks through the public API: bytes in, artifact out.

use image::{ImageFormat, Rgb, RgbImage};
use photo_collage::{
    ArtifactKind, CollageRequest, Composer, DocumentComposer, RasterComposer, generate_document,
    generate_raster,
};
use std::io::{Cursor, Read};

fn png(width: u32, height: u32, color: [u8; 3]) -> Vec<u8> {
    let img = RgbImage::from_pixel(width, height, Rgb(color));
    let mut buf = Cursor::new(Vec::new());
    img.write_to(&mut buf, ImageFormat::Png).unwrap();
    buf.into_inner()
}

fn close_to(pixel: &Rgb<u8>, rgb: [u8; 3]) -> bool {
    pixel.0.iter().zip(rgb).all(|(a, b)| a.abs_diff(b) <= 3)
}

fn document_xml(docx: &[u8]) -> String {
    let mut archive = zip::ZipArchive::new(Cursor::new(docx)).unwrap();
    let mut xml = String::new();
    archive
        .by_name("word/document.xml")
        .unwrap()
        .read_to_string(&mut xml)
        .unwrap();
    xml
}

fn media_count(docx: &[u8]) -> usize {
    let archive = zip::ZipArchive::new(Cursor::new(docx)).unwrap();
    archive
        .file_names()
        .filter(|name| name.starts_with("word/media/") && !name.ends_with('/'))
        .count()
}

fn trip_images() -> Vec<Vec<u8>> {
    vec![
        png(40, 30, [255, 0, 0]),
        png(30, 40, [0, 255, 0]),
        png(20, 20, [0, 0, 255]),
        png(50, 10, [255, 255, 0]),
        png(10, 50, [128, 0, 128]),
    ]
}

#[test]
fn empty_input_produces_no_artifact() {
    assert!(generate_raster(vec![], Some("Trip")).unwrap().is_none());
    assert!(generate_document(vec![], None).unwrap().is_none());
}

#[test]
fn raster_single_image_fills_stock_canvas() {
    let artifact = generate_raster(vec![png(8, 6, [255, 0, 0])], None)
        .unwrap()
        .unwrap();
    assert_eq!(artifact.kind, ArtifactKind::Raster);
    assert_eq!(artifact.mime(), "image/png");
    assert_eq!(artifact.filename, "Collage.png");

    let decoded = image::load_from_memory(&artifact.bytes).unwrap().to_rgb8();
    assert_eq!(decoded.dimensions(), (2480, 3508));
    // No title band: the image starts at the top, behind its border.
    assert!(close_to(decoded.get_pixel(1240, 100), [255, 0, 0]));
    assert_eq!(decoded.get_pixel(0, 0), &Rgb([0, 0, 0]));
}

#[test]
fn raster_trip_collage_leaves_trailing_cells_blank() {
    let artifact = generate_raster(trip_images(), Some("Trip"))
        .unwrap()
        .unwrap();
    assert_eq!(artifact.filename, "Trip.png");
    let decoded = image::load_from_memory(&artifact.bytes).unwrap().to_rgb8();

    // 3x3 grid below a 250px band: cells are 826x1086.
    let (cell_w, cell_h, band) = (2480 / 3, (3508 - 250) / 3, 250);
    let center = |row: u32, col: u32| (col * cell_w + cell_w / 2, band + row * cell_h + cell_h / 2);

    let (x, y) = center(0, 0);
    assert!(close_to(decoded.get_pixel(x, y), [255, 0, 0]));
    let (x, y) = center(1, 1);
    assert!(close_to(decoded.get_pixel(x, y), [128, 0, 128]));
    for (row, col) in [(1, 2), (2, 0), (2, 1), (2, 2)] {
        let (x, y) = center(row, col);
        assert_eq!(decoded.get_pixel(x, y), &Rgb([255, 255, 255]));
    }
    // Title ink somewhere in the band.
    let band_has_ink = (0..band)
        .flat_map(|y| (0..2480).map(move |x| (x, y)))
        .any(|(x, y)| decoded.get_pixel(x, y) != &Rgb([255, 255, 255]));
    assert!(band_has_ink);
}

#[test]
fn document_trip_collage_has_full_table() {
    let artifact = generate_document(trip_images(), Some("Trip"))
        .unwrap()
        .unwrap();
    assert_eq!(artifact.kind, ArtifactKind::Document);
    assert_eq!(artifact.filename, "Trip.docx");
    assert_eq!(
        artifact.mime(),
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
    );

    let xml = document_xml(&artifact.bytes);
    assert!(xml.contains("Trip"));
    assert_eq!(xml.matches("</w:tr>").count(), 3);
    assert_eq!(xml.matches("</w:tc>").count(), 9);
    assert_eq!(media_count(&artifact.bytes), 5);
}

#[test]
fn corrupt_image_only_blanks_its_own_cell() {
    let mut images = trip_images();
    images[2] = b"definitely not an image".to_vec();
    let request = CollageRequest::new(images, None);
    assert!(!request.is_empty());

    let raster = RasterComposer::default();
    let document = DocumentComposer::default();
    let composers: [&dyn Composer; 2] = [&raster, &document];

    for composer in composers {
        let collage = composer.compose(&request).unwrap().unwrap();
        assert_eq!(collage.artifact.kind, composer.kind());
        let skipped: Vec<usize> = collage.skipped().map(|(i, _)| i).collect();
        assert_eq!(skipped, vec![2]);
        assert_eq!(collage.placed().count(), 4);
    }
}

#[test]
fn repeated_generation_gives_identical_bytes() {
    let first = generate_raster(trip_images(), Some("Trip")).unwrap().unwrap();
    let second = generate_raster(trip_images(), Some("Trip")).unwrap().unwrap();
    assert_eq!(first.bytes, second.bytes);
}
