use raster_algorithms::{
    Coverage, Image, LineAlgorithm, PixelBuffer, Point2i, Primitive, Rgba8, SmoothConfig,
    ThresholdParams, binarize, gray_to_rgba, rasterize, smooth,
};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Light page with three 3x3 ink blots, top-left corners given.
fn page(blots: &[(usize, usize)]) -> PixelBuffer {
    Image::from_fn(40, 30, |x, y| {
        let ink = blots
            .iter()
            .any(|&(bx, by)| (bx..bx + 3).contains(&x) && (by..by + 3).contains(&y));
        if ink {
            Rgba8::opaque(30, 30, 30)
        } else {
            Rgba8::opaque(230, 230, 230)
        }
    })
    .expect("valid image")
}

#[test]
fn smoothed_ink_blots_binarize_as_background_with_a_bright_halo() {
    init_logger();
    let blots = [(8, 8), (20, 14), (31, 22)];
    let src = page(&blots);

    let smoothed = smooth(&src.as_view(), &SmoothConfig::box_filter(3)).expect("valid config");
    assert_eq!((smoothed.width(), smoothed.height()), (40, 30));

    let binary =
        binarize(&smoothed.as_view(), &ThresholdParams::default()).expect("valid params");
    assert!(binary.data().iter().all(|&v| v == 0 || v == 255));

    for &(bx, by) in &blots {
        let (cx, cy) = (bx as isize + 1, by as isize + 1);
        for dy in -3isize..=3 {
            for dx in -3isize..=3 {
                let v = *binary
                    .get((cx + dx) as usize, (cy + dy) as usize)
                    .expect("inside image");
                if dx.abs().max(dy.abs()) <= 2 {
                    assert_eq!(v, 0, "ink at ({dx}, {dy}) from blot {bx},{by}");
                } else {
                    assert_eq!(v, 255, "halo at ({dx}, {dy}) from blot {bx},{by}");
                }
            }
        }
    }

    // Far from any blot the window is uniform and the tie goes to background.
    assert_eq!(binary.get(0, 29), Some(&0));
    assert_eq!(binary.get(39, 0), Some(&0));
}

#[test]
fn rasterized_line_survives_render_and_rethreshold() {
    init_logger();
    let mut coverage = Coverage::new();
    let line = Primitive::Line {
        from: Point2i::new(2, 2),
        to: Point2i::new(20, 12),
        algorithm: LineAlgorithm::Bresenham,
    };
    rasterize(&line, &mut coverage).expect("lines cannot fail");
    assert_eq!(coverage.len(), 19);

    let rendered = coverage
        .to_gray_image(Point2i::new(0, 0), 24, 16)
        .expect("valid size");
    assert_eq!(rendered.data().iter().filter(|&&v| v == 255).count(), 19);

    let rgba = gray_to_rgba(&rendered.as_view());
    let params = ThresholdParams::sauvola(5, 0.2);
    let binary = binarize(&rgba.as_view(), &params).expect("valid params");
    assert_eq!(binary, rendered);
}

#[test]
fn wu_coverage_renders_partial_intensities() {
    init_logger();
    let mut coverage = Coverage::new();
    let line = Primitive::Line {
        from: Point2i::new(0, 0),
        to: Point2i::new(9, 3),
        algorithm: LineAlgorithm::Wu,
    };
    rasterize(&line, &mut coverage).expect("lines cannot fail");

    let img = coverage
        .to_gray_image(Point2i::new(0, 0), 10, 5)
        .expect("valid size");
    assert_eq!(img.get(0, 0), Some(&255));
    assert_eq!(img.get(9, 3), Some(&255));
    assert!(img.data().iter().any(|&v| v > 0 && v < 255));
    // Each interior column carries one unit of coverage split across two rows.
    for x in 1..9 {
        let column: u32 = (0..5).map(|y| u32::from(*img.get(x, y).unwrap())).sum();
        assert!((254..=256).contains(&column), "column {x} sums to {column}");
    }
}
