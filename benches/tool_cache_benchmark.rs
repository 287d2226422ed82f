//! Tool cache benchmarks

use std::sync::Arc;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use styletools::style::{
    CapProps, CapShape, CapStyle, ColorProps, ColorStyle, FillProps, FillStyle, LineProps,
    LineStyle, Rgba,
};
use styletools::ToolCache;

struct Palette {
    colors: Vec<Arc<ColorStyle>>,
    fills: Vec<Arc<FillStyle>>,
    lines: Vec<Arc<LineStyle>>,
    caps: Vec<Arc<CapStyle>>,
}

fn generate_palette(count: usize) -> Palette {
    let colors: Vec<_> = (0..count)
        .map(|i| {
            let v = (i * 255 / count.max(1)) as u8;
            ColorStyle::new(format!("Color {}", i), ColorProps::new(Rgba::opaque(v, 0, 255 - v)))
        })
        .collect();
    let fills = colors
        .iter()
        .enumerate()
        .map(|(i, c)| FillStyle::new(format!("Fill {}", i), FillProps::solid(Arc::clone(c))))
        .collect();
    let lines = colors
        .iter()
        .enumerate()
        .map(|(i, c)| {
            LineStyle::new(format!("Line {}", i), LineProps::new(Arc::clone(c), 1 + i as u32 % 4))
        })
        .collect();
    let caps = colors
        .iter()
        .enumerate()
        .map(|(i, c)| {
            CapStyle::new(
                format!("Cap {}", i),
                CapProps::new(CapShape::ArrowClosed, 10, Arc::clone(c)),
            )
        })
        .collect();

    Palette {
        colors,
        fills,
        lines,
        caps,
    }
}

fn warm_cache(palette: &Palette) -> ToolCache {
    let mut cache = ToolCache::new();
    for ((fill, line), cap) in palette.fills.iter().zip(&palette.lines).zip(&palette.caps) {
        let _ = cache.get_brush(fill);
        let _ = cache.get_pen(line, None, Some(cap));
    }
    cache
}

fn benchmark_lookups(c: &mut Criterion) {
    let mut group = c.benchmark_group("Cached Lookups");

    let palette = generate_palette(50);
    let mut cache = warm_cache(&palette);

    group.bench_function("pen_hit", |b| {
        b.iter(|| cache.get_pen(&palette.lines[7], None, Some(&palette.caps[7])))
    });
    group.bench_function("brush_hit", |b| b.iter(|| cache.get_brush(&palette.fills[7])));

    // Miss path: every iteration rebuilds the pen and its cap
    group.bench_function("pen_rebuild", |b| {
        b.iter(|| {
            cache.notify_style_changed(Arc::clone(&palette.lines[3]));
            cache.get_pen(&palette.lines[3], None, Some(&palette.caps[3]))
        })
    });

    group.finish();
}

fn benchmark_invalidation(c: &mut Criterion) {
    let mut group = c.benchmark_group("Color Cascade");

    for count in [10, 50, 200].iter() {
        let palette = generate_palette(*count);

        group.bench_with_input(BenchmarkId::new("notify", count), &palette, |b, palette| {
            b.iter_batched(
                || warm_cache(palette),
                |mut cache| cache.notify_style_changed(Arc::clone(&palette.colors[0])),
                criterion::BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_lookups, benchmark_invalidation);
criterion_main!(benches);
