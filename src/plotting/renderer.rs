//! The seam between chart panels and the drawing library, plus the
//! lifetime tracking of live chart instances.

use std::cell::RefCell;
use std::collections::BTreeSet;
use std::path::Path;
use std::rc::Rc;
use std::time::Duration;
use tracing::{debug, trace};

use crate::error::ChartError;
use crate::plotting::styles::ChartOptions;
use crate::types::{ChartKind, ChartSeriesData};

/// Pixel size of a drawing surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SurfaceSize {
    pub width: u32,
    pub height: u32,
}

impl SurfaceSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Fully resolved input of one chart: colored data plus options.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSpec {
    pub kind: ChartKind,
    pub data: ChartSeriesData,
    pub options: ChartOptions,
}

/// Where things ended up on the surface, for pointer hit testing.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum FrameLayout {
    #[default]
    Empty,
    /// Pixel x of every category
    Cartesian { category_x: Vec<i32> },
    /// Angular extent of every segment, radians clockwise from 12 o'clock
    Radial {
        center: (i32, i32),
        outer_radius: f64,
        inner_radius: f64,
        segments: Vec<(f64, f64)>,
    },
}

/// One rasterized chart, RGB8 row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedFrame {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
    pub layout: FrameLayout,
}

impl RenderedFrame {
    /// A frame filled with a single color.
    pub fn blank(surface: SurfaceSize, rgb: [u8; 3]) -> Self {
        let count = surface.width as usize * surface.height as usize;
        Self {
            width: surface.width,
            height: surface.height,
            pixels: rgb.repeat(count),
            layout: FrameLayout::Empty,
        }
    }

    pub fn to_color_image(&self) -> egui::ColorImage {
        egui::ColorImage::from_rgb([self.width as usize, self.height as usize], &self.pixels)
    }

    /// Writes the frame as an image file; the format follows the extension.
    pub fn save(&self, path: &Path) -> Result<(), ChartError> {
        let image = image::RgbImage::from_raw(self.width, self.height, self.pixels.clone())
            .ok_or(ChartError::NothingRendered)?;
        image.save(path).map_err(|source| ChartError::Export {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Turns a [`ChartSpec`] into pixels.
pub trait ChartRenderer {
    /// Draws `spec` with values scaled by the animation `progress`
    /// (`0.0..=1.0`).
    fn draw(
        &self,
        spec: &ChartSpec,
        surface: SurfaceSize,
        progress: f64,
    ) -> Result<RenderedFrame, ChartError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct InstanceId(u64);

#[derive(Debug, Default)]
struct RegistryState {
    next_id: u64,
    live: BTreeSet<u64>,
}

/// Hands out instance ids and tracks which instances are still alive.
#[derive(Debug, Clone, Default)]
pub struct InstanceRegistry {
    state: Rc<RefCell<RegistryState>>,
}

impl InstanceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn register(&self) -> InstanceId {
        let mut state = self.state.borrow_mut();
        state.next_id += 1;
        let id = state.next_id;
        state.live.insert(id);
        InstanceId(id)
    }

    fn release(&self, id: InstanceId) {
        self.state.borrow_mut().live.remove(&id.0);
    }

    pub fn live_count(&self) -> usize {
        self.state.borrow().live.len()
    }

    pub fn is_live(&self, id: InstanceId) -> bool {
        self.state.borrow().live.contains(&id.0)
    }
}

/// A live chart bound to a surface. Dropping it releases its id.
#[derive(Debug)]
pub struct ChartInstance {
    id: InstanceId,
    spec: ChartSpec,
    surface: SurfaceSize,
    frame: RenderedFrame,
    revision: u64,
    elapsed: Duration,
    registry: InstanceRegistry,
}

impl ChartInstance {
    /// Draws the first frame and registers the instance.
    pub fn create(
        renderer: &dyn ChartRenderer,
        registry: &InstanceRegistry,
        spec: ChartSpec,
        surface: SurfaceSize,
    ) -> Result<Self, ChartError> {
        let progress = spec.options.animation.progress(Duration::ZERO);
        let frame = renderer.draw(&spec, surface, progress)?;
        let id = registry.register();
        debug!(
            ?id,
            kind = ?spec.kind,
            width = surface.width,
            height = surface.height,
            "chart instance created"
        );

        Ok(Self {
            id,
            spec,
            surface,
            frame,
            revision: 0,
            elapsed: Duration::ZERO,
            registry: registry.clone(),
        })
    }

    pub fn id(&self) -> InstanceId {
        self.id
    }

    pub fn spec(&self) -> &ChartSpec {
        &self.spec
    }

    pub fn surface(&self) -> SurfaceSize {
        self.surface
    }

    pub fn frame(&self) -> &RenderedFrame {
        &self.frame
    }

    /// Incremented on every redraw.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn is_animating(&self) -> bool {
        self.progress() < 1.0
    }

    fn progress(&self) -> f64 {
        self.spec.options.animation.progress(self.elapsed)
    }

    fn redraw(&mut self, renderer: &dyn ChartRenderer) -> Result<(), ChartError> {
        self.frame = renderer.draw(&self.spec, self.surface, self.progress())?;
        self.revision += 1;
        trace!(id = ?self.id, revision = self.revision, "chart redrawn");
        Ok(())
    }

    /// Replaces the bound data and redraws in place.
    pub fn update(
        &mut self,
        renderer: &dyn ChartRenderer,
        data: ChartSeriesData,
    ) -> Result<(), ChartError> {
        self.spec.data = data;
        self.redraw(renderer)
    }

    pub fn resize(
        &mut self,
        renderer: &dyn ChartRenderer,
        surface: SurfaceSize,
    ) -> Result<(), ChartError> {
        if surface == self.surface {
            return Ok(());
        }
        self.surface = surface;
        self.redraw(renderer)
    }

    /// Moves the entry animation forward. Returns whether more frames follow.
    pub fn advance(
        &mut self,
        renderer: &dyn ChartRenderer,
        dt: Duration,
    ) -> Result<bool, ChartError> {
        if !self.is_animating() {
            return Ok(false);
        }
        self.elapsed += dt;
        self.redraw(renderer)?;
        Ok(self.is_animating())
    }

    /// Skips the rest of the entry animation.
    pub fn finish_animation(&mut self, renderer: &dyn ChartRenderer) -> Result<(), ChartError> {
        if self.is_animating() {
            self.elapsed = self.spec.options.animation.duration;
            self.redraw(renderer)?;
        }
        Ok(())
    }
}

impl Drop for ChartInstance {
    fn drop(&mut self) {
        self.registry.release(self.id);
        debug!(id = ?self.id, "chart instance released");
    }
}
