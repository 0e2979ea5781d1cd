use rayon::prelude::*;

use crate::effects::{Effect, ImageEffect};
use crate::foundation::error::{FxError, FxResult};
use crate::render::canvas::Canvas;
use crate::render::cpu::{CpuCanvas, CpuCanvasOpts};
use crate::render::raster::RasterImage;

/// A base image plus an ordered list of effects drawn over it.
///
/// Rendering is a pure function of the base and the effect list: the base is never modified, each
/// effect consumes the previous effect's output, and later effects draw over earlier ones.
#[derive(Clone, Debug, PartialEq)]
pub struct ImageWithEffects {
    base: RasterImage,
    effects: Vec<Effect>,
}

impl ImageWithEffects {
    /// No effects yet.
    pub fn new(base: RasterImage) -> Self {
        Self {
            base,
            effects: Vec::new(),
        }
    }

    /// Replace the effect list.
    pub fn with_effects(mut self, effects: impl IntoIterator<Item = Effect>) -> Self {
        self.effects = effects.into_iter().collect();
        self
    }

    /// Append an effect; it draws over everything already in the list.
    pub fn push(&mut self, effect: impl Into<Effect>) {
        self.effects.push(effect.into());
    }

    /// The untouched base image.
    pub fn base(&self) -> &RasterImage {
        &self.base
    }

    /// Effects in draw order.
    pub fn effects(&self) -> &[Effect] {
        &self.effects
    }

    /// Apply every effect in order and return the final image.
    ///
    /// An empty effect list returns the base image unchanged.
    #[tracing::instrument(
        skip(self, canvas),
        fields(width = self.base.width(), height = self.base.height(), effects = self.effects.len())
    )]
    pub fn render(&self, canvas: &mut dyn Canvas) -> FxResult<RasterImage> {
        let mut current = self.base.clone();
        for (idx, effect) in self.effects.iter().enumerate() {
            tracing::trace!(idx, kind = effect.kind(), "apply effect");
            current = effect.apply(&current, canvas)?;
        }
        Ok(current)
    }
}

/// Options for [`render_batch`].
#[derive(Clone, Debug, Default)]
pub struct BatchOpts {
    /// Options for each worker's canvas.
    pub canvas: CpuCanvasOpts,
    /// Worker thread count. `None` uses rayon defaults.
    pub threads: Option<usize>,
}

impl BatchOpts {
    /// Set per-worker canvas options.
    pub fn with_canvas(mut self, canvas: CpuCanvasOpts) -> Self {
        self.canvas = canvas;
        self
    }

    /// Set the worker thread count.
    pub fn with_threads(mut self, threads: Option<usize>) -> Self {
        self.threads = threads;
        self
    }
}

/// Render many independent images in parallel, one [`CpuCanvas`] per worker.
///
/// Output order matches input order. The first failure is returned.
#[tracing::instrument(skip(items, opts), fields(items = items.len()))]
pub fn render_batch(items: &[ImageWithEffects], opts: &BatchOpts) -> FxResult<Vec<RasterImage>> {
    let pool = build_thread_pool(opts.threads)?;
    let rendered = pool.install(|| {
        items
            .par_iter()
            .map_init(
                || CpuCanvas::new(opts.canvas),
                |canvas, item| item.render(canvas),
            )
            .collect::<Vec<_>>()
    });
    rendered.into_iter().collect()
}

fn build_thread_pool(threads: Option<usize>) -> FxResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(FxError::validation("batch 'threads' must be >= 1 when set"));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| FxError::evaluation(format!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/render/pipeline.rs"]
mod tests;
