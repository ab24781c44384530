use orzo::pages::DashboardPage;
use orzo::plotting::{
    ChartRenderer, ChartSpec, InstanceRegistry, RenderedFrame, Rgba, SurfaceSize,
};
use orzo::theme::{FileStorage, Theme, ThemeStore};
use orzo::types::{ChartSeriesData, Dataset};
use orzo::ChartError;
use pretty_assertions::{assert_eq, assert_ne};
use tempfile::TempDir;

/// Renderer that paints the chart background and nothing else.
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

fn dashboard(store: &ThemeStore, registry: &InstanceRegistry) -> DashboardPage {
    DashboardPage::with_renderer(store, || Box::new(BackgroundRenderer), registry.clone())
        .unwrap()
}

fn first_colors(page: &DashboardPage) -> Vec<(Option<Rgba>, Option<Rgba>)> {
    page.panels()
        .iter()
        .map(|panel| {
            let style = &panel.resolved_data().datasets[0].style;
            (
                style.background.as_ref().and_then(|f| f.color_for(0)),
                style.border.as_ref().and_then(|b| b.color_for(0)),
            )
        })
        .collect()
}

#[test]
fn test_dashboard_follows_theme_switch() {
    let registry = InstanceRegistry::new();
    let mut store = ThemeStore::default();
    let mut page = dashboard(&store, &registry);

    for panel in page.panels_mut() {
        panel.mount(SurfaceSize::new(400, 200)).unwrap();
    }
    assert_eq!(registry.live_count(), 3);

    let light = first_colors(&page);
    assert!(light.iter().all(|(bg, border)| bg.is_some() && border.is_some()));
    let light_ids: Vec<_> = page
        .panels()
        .iter()
        .map(|p| p.chart().unwrap().id())
        .collect();

    store.set_theme(Theme::Dark);
    page.apply_theme(&store).unwrap();

    let dark = first_colors(&page);
    assert!(dark.iter().all(|(bg, border)| bg.is_some() && border.is_some()));
    for (before, after) in light.iter().zip(&dark) {
        assert_ne!(before, after);
    }

    assert_eq!(registry.live_count(), 3);
    for (panel, old_id) in page.panels().iter().zip(light_ids) {
        let chart = panel.chart().unwrap();
        assert_ne!(chart.id(), old_id);
        assert!(!registry.is_live(old_id));
        assert_eq!(chart.frame().pixels[..3].to_vec(), vec![0x0e, 0x0e, 0x1b]);
    }

    drop(page);
    assert_eq!(registry.live_count(), 0);
}

#[test]
fn test_update_chart_uses_active_theme() {
    let registry = InstanceRegistry::new();
    let mut store = ThemeStore::default();
    let mut page = dashboard(&store, &registry);
    let revenue = &mut page.panels_mut()[2];
    revenue.mount(SurfaceSize::new(400, 200)).unwrap();
    let id = revenue.chart().unwrap().id();

    store.set_theme(Theme::Dark);
    let data = ChartSeriesData::new(
        ["Jul", "Aug"],
        vec![Dataset::new("Revenue", vec![1500.0, 1700.0])],
    );
    revenue.update_chart(data.clone(), &store).unwrap();
    let first = revenue.resolved_data().clone();
    revenue.update_chart(data, &store).unwrap();

    assert_eq!(revenue.chart().unwrap().id(), id);
    assert_eq!(revenue.theme(), Theme::Dark);
    assert_eq!(revenue.resolved_data(), &first);
}

#[test]
fn test_theme_survives_restart() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("orzo").join("storage.json");

    let mut store = ThemeStore::new(Box::new(FileStorage::open(&path)));
    assert_eq!(store.theme(), Theme::Light);
    store.toggle_theme();

    let restored = ThemeStore::new(Box::new(FileStorage::open(&path)));
    assert_eq!(restored.theme(), Theme::Dark);

    let page = dashboard(&restored, &InstanceRegistry::new());
    assert!(page.panels().iter().all(|p| p.theme() == Theme::Dark));
}

#[test]
fn test_invalid_persisted_theme_falls_back_to_light() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("storage.json");
    std::fs::write(&path, r#"{"theme": "sepia"}"#).unwrap();

    let store = ThemeStore::new(Box::new(FileStorage::open(&path)));
    assert_eq!(store.theme(), Theme::Light);
}
