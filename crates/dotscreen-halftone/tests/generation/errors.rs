use dotscreen_core::{Orientation, PageGeometry, PageSize};
use dotscreen_halftone::{HalftoneGenerator, HalftoneParameters};
use image::{DynamicImage, RgbaImage};
use std::fs;
use tempfile::TempDir;

fn small_image() -> DynamicImage {
    DynamicImage::ImageRgba8(RgbaImage::new(4, 4))
}

#[test]
fn test_zero_columns_is_invalid_parameter() {
    let params = HalftoneParameters {
        num_x: 0,
        ..Default::default()
    };
    let err = HalftoneGenerator::from_image(small_image(), params)
        .err()
        .unwrap();
    assert!(err.is_invalid_parameter());
}

#[test]
fn test_unknown_page_is_invalid_parameter() {
    let params = HalftoneParameters {
        page_size: "b9".to_string(),
        ..Default::default()
    };
    let err = HalftoneGenerator::from_image(small_image(), params)
        .err()
        .unwrap();
    assert!(err.is_invalid_parameter());
    assert!(err.to_string().contains("b9"));
}

#[test]
fn test_missing_file_is_image_load_error() {
    let dir = TempDir::new().unwrap();
    let err = HalftoneGenerator::from_file(dir.path().join("absent.png"), Default::default())
        .err()
        .unwrap();
    assert!(err.is_image_load());
}

#[test]
fn test_corrupt_file_is_image_load_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.png");
    fs::write(&path, b"definitely not a png").unwrap();

    let err = HalftoneGenerator::from_file(&path, Default::default())
        .err()
        .unwrap();
    assert!(err.is_image_load());
}

#[test]
fn test_parameters_checked_before_loading() {
    let dir = TempDir::new().unwrap();
    let params = HalftoneParameters {
        num_x: 0,
        ..Default::default()
    };
    let err = HalftoneGenerator::from_file(dir.path().join("absent.png"), params)
        .err()
        .unwrap();
    assert!(err.is_invalid_parameter());
}

#[test]
fn test_load_from_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("grey.png");
    RgbaImage::from_pixel(20, 10, image::Rgba([128, 128, 128, 255]))
        .save(&path)
        .unwrap();

    let params = HalftoneParameters {
        num_x: 10,
        ..Default::default()
    };
    let generator = HalftoneGenerator::from_file(&path, params).unwrap();
    assert_eq!(generator.grid().dimensions(), (10, 5));
}

struct FixedPage;

impl PageGeometry for FixedPage {
    fn page_size(
        &self,
        _name: &str,
        _orientation: Orientation,
    ) -> dotscreen_core::Result<PageSize> {
        Ok(PageSize::new(400.0, 300.0))
    }
}

#[test]
fn test_custom_page_geometry() {
    let params = HalftoneParameters {
        page_size: "anything".to_string(),
        num_x: 4,
        scale: 1.0,
        max_radius: 1.0,
        ..Default::default()
    };
    let generator =
        HalftoneGenerator::with_page_geometry(small_image(), params, &FixedPage).unwrap();
    // 4x4 grid, max_size 6, ceil(400 * 6 / 4)
    assert_eq!(generator.page(), PageSize::new(400.0, 300.0));
    assert_eq!(generator.geometry().final_extent, 600.0);
    assert_eq!(generator.geometry().max_radius, 50.0);
}
