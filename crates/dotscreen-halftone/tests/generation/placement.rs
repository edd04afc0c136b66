use dotscreen_halftone::{HalftoneGenerator, HalftoneParameters, SCREEN_ANGLES};
use image::{DynamicImage, Rgba, RgbaImage};

fn generator(num_x: u32) -> HalftoneGenerator {
    let img = DynamicImage::ImageRgba8(RgbaImage::from_fn(30, 20, |x, y| {
        Rgba([(x * 8) as u8, (y * 12) as u8, 128, 255])
    }));
    let params = HalftoneParameters {
        num_x,
        ..Default::default()
    };
    HalftoneGenerator::from_image(img, params).unwrap()
}

#[test]
fn test_dots_cover_every_grid_cell_once() {
    let generator = generator(9);
    let geometry = *generator.geometry();
    let side = geometry.max_size as usize;
    let drawing = generator.generate();

    for layer in drawing.layers() {
        let mut seen = vec![false; side * side];
        for dot in layer.dots() {
            let c = dot.center();
            let x = ((c.x + geometry.final_extent / 2.0) / geometry.pitch()).round() as usize;
            let y = ((c.y + geometry.final_extent / 2.0) / geometry.pitch()).round() as usize;
            assert!(x < side && y < side);
            assert!(!seen[x * side + y], "cell ({}, {}) emitted twice", x, y);
            seen[x * side + y] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }
}

#[test]
fn test_column_major_order() {
    let generator = generator(5);
    let geometry = *generator.geometry();
    let side = geometry.max_size;
    let drawing = generator.generate();

    let dots = drawing.layer(1).unwrap().dots();
    for (i, dot) in dots.iter().enumerate() {
        let (x, y) = (i as u32 / side, i as u32 % side);
        assert_eq!(dot.center().x, geometry.position(x));
        assert_eq!(dot.center().y, geometry.position(y));
    }
}

#[test]
fn test_local_positions_shared_across_separations() {
    let drawing = generator(7).generate();
    let reference: Vec<_> = drawing.layer(1).unwrap().dots().iter().map(|d| d.center()).collect();

    for (layer, angle) in drawing.layers().iter().zip(SCREEN_ANGLES) {
        let centers: Vec<_> = layer.dots().iter().map(|d| d.center()).collect();
        assert_eq!(centers, reference);
        assert!(layer.dots().iter().all(|d| d.rotation() == angle));
    }
}

#[test]
fn test_page_positions_differ_per_separation() {
    let drawing = generator(7).generate();
    let cyan = drawing.layer(1).unwrap().dots()[0].page_center();
    let yellow = drawing.layer(3).unwrap().dots()[0].page_center();
    assert!((cyan - yellow).norm() > 1.0);
    // Unrotated pass keeps its local position
    assert_eq!(yellow, drawing.layer(3).unwrap().dots()[0].center());
}
