use criterion::{Criterion, black_box, criterion_group, criterion_main};
use ra_core::{Image, Rgba8};
use ra_filter::{SmoothConfig, smooth};

fn synthetic_rgba(width: usize, height: usize) -> Image<Rgba8> {
    Image::from_fn(width, height, |x, y| {
        let v = ((x * 7 + y * 13) % 251) as u8;
        Rgba8::new(v, v.wrapping_mul(3), 255 - v, 255)
    })
    .expect("valid image")
}

fn bench_box(c: &mut Criterion) {
    let img = synthetic_rgba(640, 480);
    let view = img.as_view();
    let cfg = SmoothConfig::box_filter(5);

    c.bench_function("smooth_box5_rgba_640x480", |b| {
        b.iter(|| {
            let out = smooth(black_box(&view), &cfg).expect("valid config");
            black_box(out);
        });
    });
}

fn bench_gaussian(c: &mut Criterion) {
    let img = synthetic_rgba(640, 480);
    let view = img.as_view();
    let cfg = SmoothConfig::gaussian(7, 1.5);

    c.bench_function("smooth_gaussian7_rgba_640x480", |b| {
        b.iter(|| {
            let out = smooth(black_box(&view), &cfg).expect("valid config");
            black_box(out);
        });
    });
}

criterion_group!(benches, bench_box, bench_gaussian);
criterion_main!(benches);
