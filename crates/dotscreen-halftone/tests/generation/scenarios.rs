use dotscreen_halftone::{
    BilinearRaster, ChannelStrategy, HalftoneGenerator, HalftoneParameters, RasterOps,
};
use dotscreen_vector::Drawing;
use image::{DynamicImage, Rgba, RgbaImage};
use std::cell::Cell;
use std::rc::Rc;

fn solid(width: u32, height: u32, rgba: [u8; 4]) -> DynamicImage {
    DynamicImage::ImageRgba8(RgbaImage::from_pixel(width, height, Rgba(rgba)))
}

fn gradient(width: u32, height: u32) -> DynamicImage {
    DynamicImage::ImageRgba8(RgbaImage::from_fn(width, height, |x, y| {
        Rgba([(x * 20) as u8, (y * 30) as u8, ((x + y) * 10) as u8, 255])
    }))
}

fn generate(img: DynamicImage, params: HalftoneParameters) -> (HalftoneGenerator, Drawing) {
    let generator = HalftoneGenerator::from_image(img, params).unwrap();
    let drawing = generator.generate();
    (generator, drawing)
}

#[test]
fn test_white_image_gives_empty_dots() {
    let params = HalftoneParameters {
        num_x: 2,
        ..Default::default()
    };
    let (generator, drawing) = generate(solid(2, 2, [255, 255, 255, 255]), params);

    assert_eq!(generator.geometry().max_size, 3);
    assert_eq!(drawing.layer_count(), 4);
    for layer in drawing.layers() {
        assert_eq!(layer.dots().len(), 9);
        assert!(layer.dots().iter().all(|d| d.radius() == 0.0));
    }
}

#[test]
fn test_dot_count_is_independent_of_content() {
    for img in [
        solid(40, 30, [255, 255, 255, 255]),
        solid(40, 30, [0, 0, 0, 255]),
        gradient(40, 30),
    ] {
        let params = HalftoneParameters {
            num_x: 8,
            ..Default::default()
        };
        let (generator, drawing) = generate(img, params);
        // 8 columns, 6 rows -> ceil(sqrt(100)) = 10
        assert_eq!(generator.geometry().max_size, 10);
        for layer in drawing.layers() {
            assert_eq!(layer.dots().len(), 100);
        }
        assert_eq!(drawing.dot_count(), 400);
    }
}

#[test]
fn test_small_black_image_subtractive() {
    let params = HalftoneParameters {
        num_x: 2,
        channel_strategy: ChannelStrategy::Subtractive,
        ..Default::default()
    };
    let (generator, drawing) = generate(solid(2, 2, [0, 0, 0, 255]), params);
    let geometry = *generator.geometry();
    assert_eq!(geometry.max_size, 3);
    assert!(geometry.max_radius > 0.0);

    // Unrotated 2x2 grid pasted at offset round_half_even(0.5) = 0
    let yellow = drawing.layer(3).unwrap();
    assert_eq!(yellow.dots().len(), 9);
    let mut full = 0;
    for (i, dot) in yellow.dots().iter().enumerate() {
        let (x, y) = (i / 3, i % 3);
        if x < 2 && y < 2 {
            assert_eq!(dot.radius(), geometry.max_radius, "cell ({}, {})", x, y);
            full += 1;
        } else {
            assert_eq!(dot.radius(), 0.0, "cell ({}, {})", x, y);
        }
    }
    assert_eq!(full, 4);
}

#[test]
fn test_black_image_subtractive_fills_unrotated_cells() {
    let params = HalftoneParameters {
        num_x: 4,
        channel_strategy: ChannelStrategy::Subtractive,
        ..Default::default()
    };
    let (generator, drawing) = generate(solid(8, 8, [0, 0, 0, 255]), params);
    let geometry = *generator.geometry();
    assert_eq!(geometry.max_size, 6);
    assert!(geometry.max_radius > 0.0);

    // The yellow pass is unrotated: the 4x4 grid sits at offset 1
    let yellow = drawing.layer(3).unwrap();
    for (i, dot) in yellow.dots().iter().enumerate() {
        let (x, y) = (i / 6, i % 6);
        let inside = (1..5).contains(&x) && (1..5).contains(&y);
        let expected = if inside { geometry.max_radius } else { 0.0 };
        assert_eq!(dot.radius(), expected, "cell ({}, {})", x, y);
    }

    for layer in drawing.layers() {
        let largest = layer.dots().iter().map(|d| d.radius()).fold(0.0, f64::max);
        assert_eq!(largest, geometry.max_radius, "layer {}", layer.id());
    }
}

#[test]
fn test_proxy_black_pass_reads_alpha() {
    let params = HalftoneParameters {
        num_x: 4,
        ..Default::default()
    };
    let (generator, drawing) = generate(solid(8, 8, [0, 0, 0, 255]), params);
    let max_radius = generator.geometry().max_radius;

    for id in 1..=3 {
        let layer = drawing.layer(id).unwrap();
        assert!(layer.dots().iter().any(|d| d.radius() == max_radius));
    }
    let black = drawing.layer(4).unwrap();
    assert!(black.dots().iter().all(|d| d.radius() == 0.0));
}

#[test]
fn test_radius_never_exceeds_max() {
    let params = HalftoneParameters {
        num_x: 12,
        channel_strategy: ChannelStrategy::Subtractive,
        ..Default::default()
    };
    let (generator, drawing) = generate(gradient(12, 9), params);
    let max_radius = generator.geometry().max_radius;
    for layer in drawing.layers() {
        assert!(layer
            .dots()
            .iter()
            .all(|d| d.radius() >= 0.0 && d.radius() <= max_radius));
    }
}

#[test]
fn test_generation_is_deterministic() {
    let params = HalftoneParameters {
        num_x: 10,
        use_black_channel: true,
        ..Default::default()
    };
    let (_, first) = generate(gradient(30, 20), params.clone());
    let (_, second) = generate(gradient(30, 20), params);
    assert_eq!(first, second);
}

#[test]
fn test_black_channel_appends_fifth_layer() {
    let base = HalftoneParameters {
        num_x: 6,
        ..Default::default()
    };
    let (_, plain) = generate(gradient(12, 12), base.clone());
    let (_, extended) = generate(
        gradient(12, 12),
        HalftoneParameters {
            use_black_channel: true,
            ..base
        },
    );

    assert_eq!(plain.layer_count(), 4);
    assert_eq!(extended.layer_count(), 5);
    for id in 1..=4 {
        assert_eq!(plain.layer(id), extended.layer(id));
    }
    let fifth = extended.layer(5).unwrap();
    let fourth = extended.layer(4).unwrap();
    assert_eq!(fifth.dots(), fourth.dots());
    assert_eq!(fifth.stroke(), fourth.stroke());
}

#[test]
fn test_very_wide_image_still_emits_full_canvas() {
    let params = HalftoneParameters {
        num_x: 5,
        ..Default::default()
    };
    let (generator, drawing) = generate(solid(500, 2, [0, 0, 0, 255]), params);
    assert_eq!(generator.grid().height(), 0);
    assert_eq!(generator.geometry().max_size, 5);
    for layer in drawing.layers() {
        assert_eq!(layer.dots().len(), 25);
        assert!(layer.dots().iter().all(|d| d.radius() == 0.0));
    }
}

/// Skips rotation and counts how often it was asked to rotate
struct UnrotatedRaster {
    rotations: Rc<Cell<usize>>,
}

impl RasterOps for UnrotatedRaster {
    fn rotate(&self, image: &RgbaImage, _degrees: f64) -> RgbaImage {
        self.rotations.set(self.rotations.get() + 1);
        image.clone()
    }

    fn paste(&self, canvas: &mut RgbaImage, src: &RgbaImage, offset: (i64, i64)) {
        BilinearRaster.paste(canvas, src, offset);
    }
}

#[test]
fn test_custom_raster_backend_is_used() {
    let params = HalftoneParameters {
        num_x: 4,
        channel_strategy: ChannelStrategy::Subtractive,
        ..Default::default()
    };
    let rotations = Rc::new(Cell::new(0));
    let generator = HalftoneGenerator::from_image(solid(4, 4, [0, 0, 0, 255]), params)
        .unwrap()
        .with_raster(Box::new(UnrotatedRaster {
            rotations: Rc::clone(&rotations),
        }));
    let drawing = generator.generate();
    let geometry = *generator.geometry();

    assert_eq!(rotations.get(), 4);
    // 4x4 grid -> ceil(sqrt(32)) = 6, every layer pasted upright at offset 1
    assert_eq!(geometry.max_size, 6);
    for layer in drawing.layers() {
        let full: Vec<(usize, usize)> = layer
            .dots()
            .iter()
            .enumerate()
            .filter(|(_, d)| d.radius() == geometry.max_radius)
            .map(|(i, _)| (i / 6, i % 6))
            .collect();
        assert_eq!(full.len(), 16, "layer {}", layer.id());
        assert!(full
            .iter()
            .all(|&(x, y)| (1..5).contains(&x) && (1..5).contains(&y)));
    }
}
