//! Benchmark for a full figure redraw pass.

#![allow(clippy::unwrap_used)]

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use canvasplot::prelude::*;

fn decorated_figure(points: usize) -> Figure {
    let series: Vec<Point> = (0..points)
        .map(|i| {
            let x = i as f64 / points as f64 * 100.0;
            Point::new(x, 5.0 + 4.0 * (x / 10.0).sin())
        })
        .collect();
    let mut figure = Figure::builder("bench")
        .size(600.0, 400.0)
        .axis(AxisIndex::X, AxisPatch::range(0.0, 100.0).ticks(20.0, 5.0))
        .axis(AxisIndex::Y, AxisPatch::range(0.0, 10.0).ticks(2.0, 0.5))
        .callback(move |fig, surface| {
            fig.bezier_curve(surface, &series, AxisChoice::Primary, BezierParams::default());
        })
        .build()
        .unwrap();
    figure.set_spine(&SpinePatch::edges(EdgeSet::ALL));
    figure.set_ticks(
        AxisIndex::X,
        &TickPatch { marks: Some(true), labels: Some(true), ..TickPatch::default() },
    );
    figure.set_grid(&GridPatch::show(true, true, false));
    figure.set_cursor(&CursorPatch::new().readout(AxisIndex::X, true).readout(AxisIndex::Y, true));
    figure
}

fn redraw_recording_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("redraw_recording");

    for points in [10, 100, 1000] {
        let mut figure = decorated_figure(points);
        group.bench_with_input(BenchmarkId::from_parameter(points), &points, |b, _| {
            b.iter(|| {
                let mut surface = RecordingSurface::new(600.0, 400.0);
                figure.draw(&mut surface, black_box(Some(Point::new(300.0, 200.0)))).unwrap();
                surface
            });
        });
    }

    group.finish();
}

fn redraw_raster_benchmark(c: &mut Criterion) {
    let mut figure = decorated_figure(100);
    let mut surface = RasterSurface::new(600, 400).unwrap();

    c.bench_function("redraw_raster_600x400", |b| {
        b.iter(|| {
            figure.draw(&mut surface, black_box(Some(Point::new(300.0, 200.0)))).unwrap();
        });
    });
}

fn pie_hit_test_benchmark(c: &mut Criterion) {
    let data: Dataset = (0..12).map(|i| (format!("s{i}"), f64::from(i + 1))).collect();
    let mut pie = pie_chart("pie", data, 400.0, 400.0).unwrap();
    let mut surface = RecordingSurface::new(400.0, 400.0);

    c.bench_function("pie_pointer_move", |b| {
        b.iter(|| {
            pie.draw(&mut surface, black_box(Some(Point::new(250.0, 180.0)))).unwrap();
            surface.take_commands()
        });
    });
}

criterion_group!(benches, redraw_recording_benchmark, redraw_raster_benchmark, pie_hit_test_benchmark);
criterion_main!(benches);
