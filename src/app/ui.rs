use chrono::Local;
use egui::{Color32, Context, RichText, Sense, Stroke, Vec2};
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tracing::info;

use super::navbar::ThemeToggle;
use super::state::{export_file_name, App, ChartTexture};
use crate::error::ChartError;
use crate::plotting::chart::MIN_SURFACE_SIDE;
use crate::plotting::styles::TooltipOptions;
use crate::plotting::{ChartPanel, SurfaceSize, Tooltip};

const SIDEBAR_WIDTH: f32 = 200.0;

/// Draw the main application UI
pub fn draw_ui(app: &mut App, ctx: &Context) {
    draw_navbar(app, ctx);

    if let Err(e) = app.dashboard.sync_theme(&app.theme) {
        app.report_error("Failed to apply theme", &e);
    }

    draw_sidebar(app, ctx);

    let dt = Duration::from_secs_f32(ctx.input(|i| i.stable_dt).min(0.1));
    let mut failure = None;
    let mut exported = None;
    let export_dir = app.export_dir();

    egui::CentralPanel::default().show(ctx, |ui| {
        if let Some(message) = &app.error_message {
            let color = ui.visuals().error_fg_color;
            ui.colored_label(color, message);
        }
        if let Some(message) = &app.status_message {
            ui.label(message);
        }

        egui::ScrollArea::vertical().show(ui, |ui| {
            for (index, panel) in app.dashboard.panels_mut().iter_mut().enumerate() {
                if app.scroll_target == Some(index) {
                    ui.scroll_to_cursor(Some(egui::Align::TOP));
                    app.scroll_target = None;
                }
                let card = ChartCard {
                    index,
                    chart_height: app.config.chart_height,
                    dt,
                };
                match card.show(ui, panel, &mut app.textures) {
                    Ok(CardAction::Export) => {
                        let name = export_file_name(panel.config().title.as_deref(), Local::now());
                        let path = export_dir.join(name);
                        match panel.export_png(&path) {
                            Ok(()) => exported = Some(path),
                            Err(e) => failure = Some(("Failed to export chart", e)),
                        }
                    }
                    Ok(CardAction::None) => {}
                    Err(e) => failure = Some(("Failed to draw chart", e)),
                }
                ui.add_space(16.0);
            }
        });
    });

    if let Some(path) = exported {
        info!(path = %path.display(), "chart exported from dashboard");
        app.status_message = Some(format!("Saved {}", path.display()));
    }
    if let Some((context, e)) = failure {
        app.report_error(context, &e);
    }

    let animating = app
        .dashboard
        .panels()
        .iter()
        .any(|p| p.chart().is_some_and(|c| c.is_animating()));
    if animating || app.navbar.is_transitioning(Instant::now()) {
        ctx.request_repaint();
    }
}

fn draw_navbar(app: &mut App, ctx: &Context) {
    egui::TopBottomPanel::top("navbar").show(ctx, |ui| {
        ui.horizontal(|ui| {
            let sidebar_icon = if app.sidebar.is_expanded() { "⏴" } else { "☰" };
            if ui
                .button(sidebar_icon)
                .on_hover_text("Toggle sidebar")
                .clicked()
            {
                app.navbar.toggle_sidebar(&mut app.sidebar, Instant::now());
            }
            ui.heading("Orzo");

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let theme = app.theme.theme();
                if ui
                    .button(ThemeToggle::icon(theme))
                    .on_hover_text(ThemeToggle::label(theme))
                    .clicked()
                {
                    ThemeToggle::click(&mut app.theme);
                }
            });
        });
    });
}

fn draw_sidebar(app: &mut App, ctx: &Context) {
    let now = Instant::now();
    let width = if app.sidebar.is_expanded() {
        SIDEBAR_WIDTH
    } else if app.navbar.is_transitioning(now) {
        SIDEBAR_WIDTH * (1.0 - app.navbar.transition_progress(now))
    } else {
        return;
    };

    egui::SidePanel::left("sidebar")
        .resizable(false)
        .exact_width(width)
        .show(ctx, |ui| {
            ui.heading("Dashboard");
            ui.separator();
            for (index, panel) in app.dashboard.panels().iter().enumerate() {
                let title = panel.config().title.as_deref().unwrap_or("Chart");
                if ui
                    .selectable_label(app.scroll_target == Some(index), title)
                    .clicked()
                {
                    app.scroll_target = Some(index);
                }
            }
        });
}

enum CardAction {
    None,
    Export,
}

struct ChartCard {
    index: usize,
    chart_height: u32,
    dt: Duration,
}

impl ChartCard {
    /// Point size of the chart for the available width.
    fn size(&self, ui: &egui::Ui, panel: &ChartPanel) -> Vec2 {
        let width = ui.available_width();
        let config = panel.config();
        let height = if config.maintain_aspect_ratio {
            width / config.aspect_ratio()
        } else {
            self.chart_height as f32
        };
        if config.responsive {
            Vec2::new(width, height)
        } else {
            Vec2::new(width.min(height * config.aspect_ratio()), height)
        }
    }

    fn show(
        &self,
        ui: &mut egui::Ui,
        panel: &mut ChartPanel,
        textures: &mut HashMap<usize, ChartTexture>,
    ) -> Result<CardAction, ChartError> {
        let size = self.size(ui, panel);
        let ppp = ui.ctx().pixels_per_point();
        let surface = SurfaceSize::new(
            (size.x * ppp).round() as u32,
            (size.y * ppp).round() as u32,
        );
        if surface.width < MIN_SURFACE_SIDE || surface.height < MIN_SURFACE_SIDE {
            return Ok(CardAction::None);
        }

        panel.mount(surface)?;
        panel.advance_animation(self.dt)?;

        let Some(chart) = panel.chart() else {
            return Ok(CardAction::None);
        };
        let (instance, revision) = (chart.id(), chart.revision());
        let stale = textures
            .get(&self.index)
            .map_or(true, |t| !t.is_current(instance, revision));
        if stale {
            let handle = ui.ctx().load_texture(
                format!("chart-{}", self.index),
                chart.frame().to_color_image(),
                egui::TextureOptions::LINEAR,
            );
            textures.insert(
                self.index,
                ChartTexture {
                    instance,
                    revision,
                    handle,
                },
            );
        }
        let Some(texture) = textures.get(&self.index) else {
            return Ok(CardAction::None);
        };

        let response = ui.add(
            egui::Image::new(&texture.handle)
                .fit_to_exact_size(size)
                .sense(Sense::hover()),
        );
        let tooltip = response.hover_pos().and_then(|pos| {
            let local = (pos - response.rect.min) * ppp;
            panel.tooltip_at(local.x, local.y)
        });
        if let Some(tooltip) = tooltip {
            let options = panel.options().tooltip.clone();
            response.on_hover_ui_at_pointer(|ui| draw_tooltip(ui, &tooltip, &options));
        }

        let export = ui.small_button("Export PNG").clicked();
        Ok(if export {
            CardAction::Export
        } else {
            CardAction::None
        })
    }
}

fn draw_tooltip(ui: &mut egui::Ui, tooltip: &Tooltip, options: &TooltipOptions) {
    egui::Frame::none()
        .fill(options.background.into())
        .stroke(Stroke::new(
            options.border_width as f32,
            Color32::from(options.border_color),
        ))
        .rounding(options.corner_radius as f32)
        .inner_margin(options.padding as f32)
        .show(ui, |ui| {
            ui.label(
                RichText::new(&tooltip.title)
                    .strong()
                    .color(Color32::from(options.title_color)),
            );
            for item in &tooltip.items {
                ui.horizontal(|ui| {
                    if let (true, Some(color)) = (options.display_colors, item.color) {
                        let (rect, _) = ui.allocate_exact_size(Vec2::splat(10.0), Sense::hover());
                        ui.painter().rect_filled(rect, 2.0, Color32::from(color));
                    }
                    ui.label(
                        RichText::new(format!(
                            "{}: {}",
                            item.label,
                            crate::utils::format_compact(item.value)
                        ))
                        .color(Color32::from(options.body_color)),
                    );
                });
            }
        });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::pages::DashboardPage;
    use crate::plotting::{ChartRenderer, ChartSpec, InstanceId, InstanceRegistry, RenderedFrame};
    use crate::theme::{Theme, ThemeStore};
    use egui::{Pos2, RawInput, Rect};
    use pretty_assertions::assert_eq;

    /// Fills the surface with the chart background only.
    struct BackgroundRenderer;

    impl ChartRenderer for BackgroundRenderer {
        fn draw(
            &self,
            spec: &ChartSpec,
            surface: SurfaceSize,
            _progress: f64,
        ) -> Result<RenderedFrame, ChartError> {
            let bg = spec.options.background;
            Ok(RenderedFrame::blank(surface, [bg.r, bg.g, bg.b]))
        }
    }

    fn test_app() -> App {
        let theme = ThemeStore::default();
        let dashboard = DashboardPage::with_renderer(
            &theme,
            || Box::new(BackgroundRenderer),
            InstanceRegistry::new(),
        )
        .unwrap();
        App::with_dashboard(AppConfig::default(), theme, dashboard)
    }

    fn run_frame(ctx: &Context, app: &mut App) {
        let input = RawInput {
            screen_rect: Some(Rect::from_min_size(Pos2::ZERO, Vec2::new(1200.0, 900.0))),
            ..Default::default()
        };
        let _ = ctx.run(input, |ctx| draw_ui(app, ctx));
    }

    fn texture_instances(app: &App) -> Vec<InstanceId> {
        (0..app.dashboard.panels().len())
            .map(|i| app.textures[&i].instance)
            .collect()
    }

    fn chart_instances(app: &App) -> Vec<InstanceId> {
        app.dashboard
            .panels()
            .iter()
            .map(|p| p.chart().unwrap().id())
            .collect()
    }

    #[test]
    fn test_frames_mount_charts_and_cache_textures() {
        let ctx = Context::default();
        let mut app = test_app();

        run_frame(&ctx, &mut app);
        run_frame(&ctx, &mut app);

        assert_eq!(app.textures.len(), 3);
        assert!(app.dashboard.panels().iter().all(|p| p.is_mounted()));
        assert_eq!(texture_instances(&app), chart_instances(&app));
        for (index, panel) in app.dashboard.panels().iter().enumerate() {
            let chart = panel.chart().unwrap();
            assert!(app.textures[&index].is_current(chart.id(), chart.revision()));
            assert_eq!(chart.surface().height, app.config.chart_height);
        }
        assert_eq!(app.error_message, None);
    }

    #[test]
    fn test_theme_toggle_recreates_charts_and_textures() {
        let ctx = Context::default();
        let mut app = test_app();
        run_frame(&ctx, &mut app);
        run_frame(&ctx, &mut app);
        let before = texture_instances(&app);

        ThemeToggle::click(&mut app.theme);
        run_frame(&ctx, &mut app);

        let after = texture_instances(&app);
        assert_eq!(after, chart_instances(&app));
        for (old, new) in before.iter().zip(&after) {
            assert_ne!(old, new);
        }
        assert!(app.dashboard.panels().iter().all(|p| p.theme() == Theme::Dark));
    }

    #[test]
    fn test_collapsed_sidebar_still_draws_charts() {
        let ctx = Context::default();
        let mut app = test_app();
        app.sidebar.collapse();
        app.scroll_target = Some(2);

        run_frame(&ctx, &mut app);

        assert_eq!(app.textures.len(), 3);
        assert_eq!(app.scroll_target, None);
    }
}
