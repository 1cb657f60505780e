mod common;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use wiretga::{io::tga::encode_tga, renderer::Renderer};

fn render_end_to_end(c: &mut Criterion) {
    let mesh = common::make_mesh();
    let renderer = Renderer::new(common::make_config());
    let mut out = Vec::new();

    c.bench_function("render/end_to_end", |b| {
        b.iter(|| {
            let buf = renderer.render(black_box(&mesh)).unwrap();
            out.clear();
            encode_tga(&buf, &mut out, renderer.config().rle()).unwrap();
            black_box(out.len())
        })
    });
}

criterion_group!(benches, render_end_to_end);
criterion_main!(benches);
