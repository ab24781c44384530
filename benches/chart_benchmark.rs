/// Benchmarks for theme color derivation and chart rasterization.
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use orzo::pages::dashboard::{expense_data, revenue_data};
use orzo::plotting::styles::ChartOptions;
use orzo::plotting::{
    derive_dataset_styles, generate_palette, ChartRenderer, ChartSpec, PlottersRenderer,
    SurfaceSize,
};
use orzo::theme::{Theme, ThemePalette};
use orzo::types::{ChartDisplayConfig, ChartKind};

fn bench_derivation(c: &mut Criterion) {
    let palette = ThemePalette::for_theme(Theme::Dark);
    let data = revenue_data();

    c.bench_function("derive_dataset_styles_line", |b| {
        b.iter(|| derive_dataset_styles(black_box(&data), ChartKind::Line, palette))
    });

    c.bench_function("generate_palette_64", |b| {
        b.iter(|| generate_palette(black_box(&palette.gradients.chart), 64))
    });
}

fn bench_rendering(c: &mut Criterion) {
    let palette = ThemePalette::for_theme(Theme::Light);
    let config = ChartDisplayConfig {
        show_legend: false,
        ..ChartDisplayConfig::new(ChartKind::Pie)
    };
    let spec = ChartSpec {
        kind: ChartKind::Pie,
        data: derive_dataset_styles(&expense_data(), ChartKind::Pie, palette),
        options: ChartOptions::build(&config, palette),
    };
    let renderer = PlottersRenderer;

    c.bench_function("plotters_pie_600x400", |b| {
        b.iter(|| renderer.draw(black_box(&spec), SurfaceSize::new(600, 400), 1.0))
    });
}

criterion_group!(benches, bench_derivation, bench_rendering);
criterion_main!(benches);
