use criterion::{Criterion, black_box, criterion_group, criterion_main};
use ra_binarize::{ThresholdParams, binarize, binarize_gray};
use ra_core::{Image, Rgba8};

fn bench_sauvola_gray(c: &mut Criterion) {
    let img = Image::from_fn(1280, 1024, |x, y| ((x * 7 + y * 3) % 251) as u8).expect("valid");
    let view = img.as_view();
    let params = ThresholdParams::sauvola(15, 0.2);

    c.bench_function("sauvola15_gray_1280x1024", |b| {
        b.iter(|| {
            let out = binarize_gray(black_box(&view), &params).expect("valid params");
            black_box(out);
        });
    });
}

fn bench_niblack_rgba(c: &mut Criterion) {
    let img = Image::from_fn(640, 480, |x, y| Rgba8::gray(((x ^ y) % 256) as u8)).expect("valid");
    let view = img.as_view();
    let params = ThresholdParams::niblack(15, -0.2);

    c.bench_function("niblack15_rgba_640x480", |b| {
        b.iter(|| {
            let out = binarize(black_box(&view), &params).expect("valid params");
            black_box(out);
        });
    });
}

criterion_group!(benches, bench_sauvola_gray, bench_niblack_rgba);
criterion_main!(benches);
