//! The plotters implementation of [`ChartRenderer`].

use plotters::coord::types::RangedCoordf64;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters_backend::FontStyle;
use std::f64::consts::{FRAC_PI_2, TAU};
use std::fmt::Display;

use super::colors::Rgba;
use super::renderer::{ChartRenderer, ChartSpec, FrameLayout, RenderedFrame, SurfaceSize};
use super::styles::{FontSpec, LegendOptions, ScaleOptions, FONT_FAMILY};
use crate::error::ChartError;
use crate::types::{ChartKind, ColorSpec, Dataset, Fill};
use crate::utils::format_compact;

type Area<'a> = DrawingArea<BitMapBackend<'a>, Shift>;
type Cartesian<'a, 'b> =
    ChartContext<'a, BitMapBackend<'b>, Cartesian2d<RangedCoordf64, RangedCoordf64>>;

/// Smaller surfaces are rejected instead of producing garbage.
pub const MIN_SURFACE_SIDE: u32 = 32;
/// Vertical slices used to approximate gradient fills.
const GRADIENT_BANDS: usize = 24;
/// Curve samples between two neighbouring line points.
const CURVE_SAMPLES: usize = 12;
const LEGEND_HEIGHT: i32 = 36;
const LEGEND_SWATCH_RADIUS: i32 = 5;

fn render_err<E: Display>(e: E) -> ChartError {
    ChartError::Render(e.to_string())
}

fn stroke(color: Rgba, width: u32) -> ShapeStyle {
    ShapeStyle {
        color: color.into(),
        filled: false,
        stroke_width: width,
    }
}

fn solid(color: Rgba) -> ShapeStyle {
    ShapeStyle {
        color: color.into(),
        filled: true,
        stroke_width: 0,
    }
}

fn text_style(spec: FontSpec, color: Rgba) -> TextStyle<'static> {
    let style = if spec.bold {
        FontStyle::Bold
    } else {
        FontStyle::Normal
    };
    FontDesc::new(FontFamily::Name(FONT_FAMILY), spec.size as f64, style)
        .color(&RGBAColor::from(color))
}

/// Color of `fill` for point `index` at pixel row `y`.
fn fill_color(fill: &Fill, index: usize, y: f64) -> Option<Rgba> {
    match fill {
        Fill::Gradient(g) => Some(g.color_at(y)),
        other => other.color_for(index),
    }
}

/// Draws charts with `plotters` into an in-memory RGB buffer.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlottersRenderer;

impl ChartRenderer for PlottersRenderer {
    fn draw(
        &self,
        spec: &ChartSpec,
        surface: SurfaceSize,
        progress: f64,
    ) -> Result<RenderedFrame, ChartError> {
        if surface.width < MIN_SURFACE_SIDE || surface.height < MIN_SURFACE_SIDE {
            return Err(ChartError::EmptySurface {
                width: surface.width,
                height: surface.height,
            });
        }

        let mut pixels = vec![0u8; surface.width as usize * surface.height as usize * 3];
        let layout = {
            let root =
                BitMapBackend::with_buffer(&mut pixels, (surface.width, surface.height))
                    .into_drawing_area();
            let layout = draw_chart(&root, spec, progress.clamp(0.0, 1.0))?;
            root.present().map_err(render_err)?;
            layout
        };

        Ok(RenderedFrame {
            width: surface.width,
            height: surface.height,
            pixels,
            layout,
        })
    }
}

fn draw_chart(root: &Area, spec: &ChartSpec, progress: f64) -> Result<FrameLayout, ChartError> {
    let options = &spec.options;
    root.fill(&RGBAColor::from(options.background))
        .map_err(render_err)?;

    let padding = options.padding;
    let mut area = root.margin(
        padding.top as i32,
        padding.bottom as i32,
        padding.left as i32,
        padding.right as i32,
    );

    if options.title.display {
        area = area
            .titled(
                &options.title.text,
                text_style(options.title.font, options.title.color),
            )
            .map_err(render_err)?;
    }

    if options.legend.display {
        let height = area.dim_in_pixel().1 as i32;
        if height > LEGEND_HEIGHT * 2 {
            let (upper, lower) = area.split_vertically(height - LEGEND_HEIGHT);
            draw_legend(&lower, spec, &options.legend)?;
            area = upper;
        }
    }

    if spec.data.labels.is_empty() {
        return Ok(FrameLayout::Empty);
    }

    if spec.kind.is_radial() {
        draw_radial(&area, spec, progress)
    } else {
        draw_cartesian(&area, spec, options.scales.as_ref(), progress)
    }
}

fn draw_cartesian(
    area: &Area,
    spec: &ChartSpec,
    scales: Option<&ScaleOptions>,
    progress: f64,
) -> Result<FrameLayout, ChartError> {
    let labels = &spec.data.labels;
    let n = labels.len();
    let (lo, hi) = spec.data.value_range().unwrap_or((0.0, 1.0));
    let y_min = lo.min(0.0) * 1.1;
    let mut y_max = hi.max(0.0) * 1.1;
    if y_max <= y_min {
        y_max = y_min + 1.0;
    }

    let x_range = match spec.kind {
        ChartKind::Line if n > 1 => 0.0..(n - 1) as f64,
        _ => -0.5..(n as f64 - 0.5),
    };

    let mut builder = ChartBuilder::on(area);
    if scales.is_some() {
        builder.x_label_area_size(30).y_label_area_size(50);
    }
    let mut chart = builder
        .build_cartesian_2d(x_range, y_min..y_max)
        .map_err(render_err)?;

    if let Some(scales) = scales {
        let category_labels = labels.clone();
        let x_formatter = move |x: &f64| {
            let rounded = x.round();
            if (x - rounded).abs() < 1e-6 && rounded >= 0.0 {
                category_labels
                    .get(rounded as usize)
                    .cloned()
                    .unwrap_or_default()
            } else {
                String::new()
            }
        };
        let y_formatter = |y: &f64| format_compact(*y);
        let axis_style = if scales.x.show_border {
            stroke(scales.x.tick_color, 1)
        } else {
            stroke(Rgba::new(0, 0, 0, 0.0), 0)
        };

        chart
            .configure_mesh()
            .light_line_style(stroke(Rgba::new(0, 0, 0, 0.0), 0))
            .bold_line_style(stroke(scales.y.grid_color, scales.y.grid_line_width))
            .axis_style(axis_style)
            .x_labels(n)
            .x_label_formatter(&x_formatter)
            .y_label_formatter(&y_formatter)
            .x_label_style(
                text_style(scales.x.tick_font, scales.x.tick_color)
                    .pos(Pos::new(HPos::Center, VPos::Top)),
            )
            .y_label_style(text_style(scales.y.tick_font, scales.y.tick_color))
            .draw()
            .map_err(render_err)?;
    }

    let datasets = spec.data.datasets.len().max(1);
    for (k, dataset) in spec.data.datasets.iter().enumerate() {
        match spec.kind {
            ChartKind::Line => draw_line(&mut chart, dataset, progress)?,
            _ => draw_bars(&mut chart, dataset, k, datasets, progress)?,
        }
    }

    let category_x = (0..n)
        .map(|i| chart.backend_coord(&(i as f64, y_min)).0)
        .collect();
    Ok(FrameLayout::Cartesian { category_x })
}

fn draw_bars(
    chart: &mut Cartesian,
    dataset: &Dataset,
    slot: usize,
    slots: usize,
    progress: f64,
) -> Result<(), ChartError> {
    let group_width = 0.8;
    let bar_width = group_width / slots as f64;
    let style = &dataset.style;

    for (i, value) in dataset.data.iter().enumerate() {
        if !value.is_finite() {
            continue;
        }
        let x0 = i as f64 - group_width / 2.0 + slot as f64 * bar_width;
        let x1 = x0 + bar_width * 0.9;
        let top = value * progress;

        if let Some(fill) = &style.background {
            let bands = match fill {
                Fill::Gradient(_) => GRADIENT_BANDS,
                _ => 1,
            };
            let rects: Vec<_> = (0..bands)
                .filter_map(|b| {
                    let ya = top * b as f64 / bands as f64;
                    let yb = top * (b + 1) as f64 / bands as f64;
                    let pixel_y = chart.backend_coord(&(x0, (ya + yb) / 2.0)).1 as f64;
                    fill_color(fill, i, pixel_y)
                        .map(|color| Rectangle::new([(x0, ya), (x1, yb)], solid(color)))
                })
                .collect();
            chart.draw_series(rects).map_err(render_err)?;
        }

        let width = style.border_width.unwrap_or(0);
        if let (Some(border), true) = (&style.border, width > 0) {
            if let Some(color) = border.color_for(i) {
                chart
                    .draw_series(std::iter::once(Rectangle::new(
                        [(x0, 0.0), (x1, top)],
                        stroke(color, width),
                    )))
                    .map_err(render_err)?;
            }
        }
    }
    Ok(())
}

fn draw_line(chart: &mut Cartesian, dataset: &Dataset, progress: f64) -> Result<(), ChartError> {
    let baseline = 0.0;
    let style = &dataset.style;
    let points: Vec<(f64, f64)> = dataset
        .data
        .iter()
        .enumerate()
        .filter(|(_, v)| v.is_finite())
        .map(|(i, v)| (i as f64, baseline + (v - baseline) * progress))
        .collect();
    if points.is_empty() {
        return Ok(());
    }

    let curve = spline_points(&points, style.tension.unwrap_or(0.0), CURVE_SAMPLES);

    if let (Some(fill), Some(true)) = (&style.background, style.fill) {
        for pair in curve.windows(2) {
            let ((xa, ya), (xb, yb)) = (pair[0], pair[1]);
            let low = ya.min(yb);
            let bands: Vec<_> = (0..GRADIENT_BANDS)
                .filter_map(|b| {
                    let y0 = baseline + (low - baseline) * b as f64 / GRADIENT_BANDS as f64;
                    let y1 = baseline + (low - baseline) * (b + 1) as f64 / GRADIENT_BANDS as f64;
                    let pixel_y = chart.backend_coord(&(xa, (y0 + y1) / 2.0)).1 as f64;
                    fill_color(fill, 0, pixel_y).map(|c| {
                        Polygon::new(vec![(xa, y0), (xa, y1), (xb, y1), (xb, y0)], solid(c))
                    })
                })
                .collect();
            chart.draw_series(bands).map_err(render_err)?;

            let top_pixel = chart.backend_coord(&(xa, ya.max(yb))).1 as f64;
            if let Some(color) = fill_color(fill, 0, top_pixel) {
                chart
                    .draw_series(std::iter::once(Polygon::new(
                        vec![(xa, low), (xa, ya), (xb, yb), (xb, low)],
                        solid(color),
                    )))
                    .map_err(render_err)?;
            }
        }
    }

    let line_color = style
        .border
        .as_ref()
        .and_then(|b| b.color_for(0))
        .or_else(|| style.background.as_ref().and_then(|f| f.color_for(0)));
    if let Some(color) = line_color {
        chart
            .draw_series(LineSeries::new(
                curve,
                stroke(color, style.border_width.unwrap_or(1).max(1)),
            ))
            .map_err(render_err)?;
    }

    if let Some(point) = style.point {
        chart
            .draw_series(
                points
                    .iter()
                    .map(|&p| Circle::new(p, point.radius, solid(point.background))),
            )
            .map_err(render_err)?;
        if point.border_width > 0 {
            chart
                .draw_series(points.iter().map(|&p| {
                    Circle::new(p, point.radius, stroke(point.border, point.border_width))
                }))
                .map_err(render_err)?;
        }
    }
    Ok(())
}

fn draw_radial(area: &Area, spec: &ChartSpec, progress: f64) -> Result<FrameLayout, ChartError> {
    let (w, h) = area.dim_in_pixel();
    let center = (w as i32 / 2, h as i32 / 2);
    let outer = (w.min(h) as f64 / 2.0 - 4.0).max(1.0);
    let inner = outer * spec.options.cutout.clamp(0.0, 0.95);

    let rings = spec.data.datasets.len().max(1);
    let ring_width = (outer - inner) / rings as f64;
    let mut first_ring = Vec::new();

    for (k, dataset) in spec.data.datasets.iter().enumerate() {
        let ring_outer = outer - k as f64 * ring_width;
        let ring_inner = ring_outer - ring_width;
        let total: f64 = dataset.data.iter().filter(|v| v.is_finite() && **v > 0.0).sum();
        if total <= 0.0 {
            continue;
        }

        let mut start = 0.0;
        for (i, value) in dataset.data.iter().enumerate() {
            let value = if value.is_finite() { value.max(0.0) } else { 0.0 };
            let sweep = value / total * TAU * progress;
            if k == 0 {
                first_ring.push((start, start + sweep));
            }
            if sweep > 0.0 {
                let points = sector_points(center, ring_inner, ring_outer, start, sweep);
                let color = dataset
                    .style
                    .background
                    .as_ref()
                    .and_then(|f| f.color_for(i))
                    .unwrap_or(spec.options.legend.color);
                area.draw(&Polygon::new(points.clone(), solid(color)))
                    .map_err(render_err)?;

                let width = dataset.style.border_width.unwrap_or(0);
                if let (Some(border), true) = (&dataset.style.border, width > 0) {
                    if let Some(color) = border.color_for(i) {
                        let mut outline = points;
                        if let Some(first) = outline.first().copied() {
                            outline.push(first);
                        }
                        area.draw(&PathElement::new(outline, stroke(color, width)))
                            .map_err(render_err)?;
                    }
                }
            }
            start += sweep;
        }
    }

    let (base_x, base_y) = area.get_base_pixel();
    Ok(FrameLayout::Radial {
        center: (base_x + center.0, base_y + center.1),
        outer_radius: outer,
        inner_radius: inner,
        segments: first_ring,
    })
}

/// Outline of an annular sector; angles run clockwise from 12 o'clock.
fn sector_points(
    center: (i32, i32),
    inner: f64,
    outer: f64,
    start: f64,
    sweep: f64,
) -> Vec<(i32, i32)> {
    let steps = ((sweep / TAU) * 96.0).ceil().max(2.0) as usize;
    let at = |radius: f64, angle: f64| {
        let a = angle - FRAC_PI_2;
        (
            center.0 + (radius * a.cos()).round() as i32,
            center.1 + (radius * a.sin()).round() as i32,
        )
    };

    let mut points: Vec<(i32, i32)> = (0..=steps)
        .map(|s| at(outer, start + sweep * s as f64 / steps as f64))
        .collect();
    if inner > 0.0 {
        points.extend(
            (0..=steps)
                .rev()
                .map(|s| at(inner, start + sweep * s as f64 / steps as f64)),
        );
    } else {
        points.push(center);
    }
    points
}

fn draw_legend(area: &Area, spec: &ChartSpec, legend: &LegendOptions) -> Result<(), ChartError> {
    let items = legend_items(spec);
    if items.is_empty() {
        return Ok(());
    }

    let font = text_style(legend.font, legend.color).pos(Pos::new(HPos::Left, VPos::Center));
    let swatch = LEGEND_SWATCH_RADIUS * 2 + 6;
    let widths = items
        .iter()
        .map(|(label, _)| {
            area.estimate_text_size(label, &font)
                .map(|(w, _)| w as i32 + swatch)
                .map_err(render_err)
        })
        .collect::<Result<Vec<_>, _>>()?;

    let gap = legend.padding as i32;
    let total: i32 = widths.iter().sum::<i32>() + gap * (widths.len() as i32 - 1);
    let (w, h) = area.dim_in_pixel();
    let mut x = ((w as i32 - total) / 2).max(0);
    let y = h as i32 / 2;

    for ((label, color), width) in items.iter().zip(widths) {
        if legend.use_point_style {
            area.draw(&Circle::new(
                (x + LEGEND_SWATCH_RADIUS, y),
                LEGEND_SWATCH_RADIUS,
                solid(*color),
            ))
            .map_err(render_err)?;
        } else {
            area.draw(&Rectangle::new(
                [
                    (x, y - LEGEND_SWATCH_RADIUS),
                    (x + LEGEND_SWATCH_RADIUS * 2, y + LEGEND_SWATCH_RADIUS),
                ],
                solid(*color),
            ))
            .map_err(render_err)?;
        }
        area.draw(&Text::new(label.clone(), (x + swatch, y), font.clone()))
            .map_err(render_err)?;
        x += width + gap;
    }
    Ok(())
}

/// Label and swatch color of every legend entry.
pub fn legend_items(spec: &ChartSpec) -> Vec<(String, Rgba)> {
    let swatch = |dataset: &Dataset, index: usize| {
        dataset
            .style
            .background
            .as_ref()
            .and_then(|f| f.color_for(index))
            .or_else(|| dataset.style.border.as_ref().and_then(|b| b.color_for(index)))
    };

    if spec.kind.is_radial() {
        let Some(first) = spec.data.datasets.first() else {
            return Vec::new();
        };
        spec.data
            .labels
            .iter()
            .enumerate()
            .filter_map(|(i, label)| swatch(first, i).map(|c| (label.clone(), c.with_alpha(1.0))))
            .collect()
    } else {
        spec.data
            .datasets
            .iter()
            .filter_map(|d| {
                let color = match &d.style.border {
                    Some(ColorSpec::Single(c)) => Some(*c),
                    _ => swatch(d, 0),
                };
                color.map(|c| (d.label.clone(), c.with_alpha(1.0)))
            })
            .collect()
    }
}

/// Samples a cubic curve through `points`; `tension` 0 keeps straight
/// segments. Control points are computed in a space where both axes are
/// scaled to `0..=1`.
pub fn spline_points(points: &[(f64, f64)], tension: f64, samples: usize) -> Vec<(f64, f64)> {
    if points.len() < 3 || tension <= 0.0 || samples < 2 {
        return points.to_vec();
    }

    let (x_lo, x_hi) = bounds(points.iter().map(|p| p.0));
    let (y_lo, y_hi) = bounds(points.iter().map(|p| p.1));
    let sx = (x_hi - x_lo).max(f64::EPSILON);
    let sy = (y_hi - y_lo).max(f64::EPSILON);
    let norm: Vec<(f64, f64)> = points
        .iter()
        .map(|&(x, y)| ((x - x_lo) / sx, (y - y_lo) / sy))
        .collect();

    let controls: Vec<((f64, f64), (f64, f64))> = (0..norm.len())
        .map(|i| {
            let prev = norm[i.saturating_sub(1)];
            let cur = norm[i];
            let next = norm[(i + 1).min(norm.len() - 1)];
            control_points(prev, cur, next, tension)
        })
        .collect();

    let mut out = Vec::with_capacity((norm.len() - 1) * samples + 1);
    for i in 0..norm.len() - 1 {
        let (p0, p3) = (norm[i], norm[i + 1]);
        let p1 = controls[i].1;
        let p2 = controls[i + 1].0;
        for s in 0..samples {
            let t = s as f64 / samples as f64;
            out.push(cubic(p0, p1, p2, p3, t));
        }
    }
    out.push(norm[norm.len() - 1]);

    out.into_iter()
        .map(|(x, y)| (x_lo + x * sx, y_lo + y * sy))
        .collect()
}

fn bounds(values: impl Iterator<Item = f64>) -> (f64, f64) {
    values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    })
}

fn control_points(
    prev: (f64, f64),
    cur: (f64, f64),
    next: (f64, f64),
    tension: f64,
) -> ((f64, f64), (f64, f64)) {
    let dist = |a: (f64, f64), b: (f64, f64)| ((b.0 - a.0).powi(2) + (b.1 - a.1).powi(2)).sqrt();
    let d01 = dist(prev, cur);
    let d12 = dist(cur, next);
    let sum = d01 + d12;
    let (s01, s12) = if sum > 0.0 {
        (d01 / sum, d12 / sum)
    } else {
        (0.0, 0.0)
    };
    let fa = tension * s01;
    let fb = tension * s12;
    let (dx, dy) = (next.0 - prev.0, next.1 - prev.1);
    (
        (cur.0 - fa * dx, cur.1 - fa * dy),
        (cur.0 + fb * dx, cur.1 + fb * dy),
    )
}

fn cubic(p0: (f64, f64), p1: (f64, f64), p2: (f64, f64), p3: (f64, f64), t: f64) -> (f64, f64) {
    let u = 1.0 - t;
    let (a, b, c, d) = (u * u * u, 3.0 * u * u * t, 3.0 * u * t * t, t * t * t);
    (
        a * p0.0 + b * p1.0 + c * p2.0 + d * p3.0,
        a * p0.1 + b * p1.1 + c * p2.1 + d * p3.1,
    )
}
