use dotscreen_core::Rgb;
use dotscreen_halftone::{HalftoneGenerator, HalftoneParameters};
use dotscreen_vector::{render_svg, VectorFinisher};
use image::{DynamicImage, Rgba, RgbaImage};

fn dark_image() -> DynamicImage {
    DynamicImage::ImageRgba8(RgbaImage::from_pixel(16, 12, Rgba([40, 40, 40, 255])))
}

#[test]
fn test_render_colors_layers_and_centers() {
    let params = HalftoneParameters {
        num_x: 8,
        fill_layers: false,
        ..Default::default()
    };
    let generator = HalftoneGenerator::from_image(dark_image(), params).unwrap();
    let document = generator.render(&mut VectorFinisher::default()).unwrap();

    let colors: Vec<Rgb> = document.layers.iter().map(|l| l.color).collect();
    assert_eq!(colors, vec![Rgb::CYAN, Rgb::MAGENTA, Rgb::YELLOW, Rgb::BLACK]);
    assert!(document.path_count() > 0);

    let (min_x, min_y, max_x, max_y) = document.bounds().unwrap();
    let page = generator.page();
    assert!(((min_x + max_x) / 2.0 - page.width / 2.0).abs() < 1.0);
    assert!(((min_y + max_y) / 2.0 - page.height / 2.0).abs() < 1.0);
}

#[test]
fn test_fill_adds_paths() {
    let base = HalftoneParameters {
        num_x: 6,
        fill_layers: false,
        scale: 0.5,
        ..Default::default()
    };
    let outline = HalftoneGenerator::from_image(dark_image(), base.clone())
        .unwrap()
        .render(&mut VectorFinisher::default())
        .unwrap();
    let filled = HalftoneGenerator::from_image(
        dark_image(),
        HalftoneParameters {
            fill_layers: true,
            ..base
        },
    )
    .unwrap()
    .render(&mut VectorFinisher::default())
    .unwrap();

    assert!(filled.path_count() > outline.path_count());
}

#[test]
fn test_white_image_renders_no_paths() {
    let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(2, 2, Rgba([255, 255, 255, 255])));
    let params = HalftoneParameters {
        num_x: 2,
        ..Default::default()
    };
    let document = HalftoneGenerator::from_image(img, params)
        .unwrap()
        .render(&mut VectorFinisher::default())
        .unwrap();
    assert_eq!(document.layers.len(), 4);
    assert_eq!(document.path_count(), 0);

    let svg = render_svg(&document);
    assert!(svg.contains("inkscape:groupmode=\"layer\""));
}

#[test]
fn test_finishing_disabled_keeps_colors() {
    let params = HalftoneParameters {
        num_x: 6,
        fill_layers: false,
        finishing: false,
        center: false,
        ..Default::default()
    };
    let generator = HalftoneGenerator::from_image(dark_image(), params).unwrap();
    let mut finisher = generator.finisher();
    assert!(!finisher.center_on_page);

    let document = generator.render(&mut finisher).unwrap();
    let colors: Vec<Rgb> = document.layers.iter().map(|l| l.color).collect();
    assert_eq!(colors, vec![Rgb::CYAN, Rgb::MAGENTA, Rgb::YELLOW, Rgb::BLACK]);

    // Uncentered geometry stays around the drawing origin
    let (min_x, _, max_x, _) = document.bounds().unwrap();
    assert!(min_x < 0.0 && max_x > 0.0);
}
