// Copyright @yucwang 2021

use crate::core::context::RenderContext;
use crate::core::integrator::Integrator;
use crate::core::rng::LcgRng;
use crate::math::bitmap::Bitmap;
use crate::renderers::estimator::{PixelEstimator, PixelSample};
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{mpsc, Arc};
use std::thread;

pub use super::renderer::Renderer;

const TILE_SIZE: usize = 32;

struct Tile {
    x0: usize,
    y0: usize,
    x1: usize,
    y1: usize,
    pixels: Vec<PixelSample>,
}

/// Tile-parallel frame driver. Every pixel owns a random stream derived from
/// the render seed and its coordinates, so the image does not depend on
/// which worker picked up which tile.
pub struct SimpleRenderer {
    integrator: Box<dyn Integrator>,
    seed: u64,
    threads: usize,
    show_progress: bool,
}

impl Renderer for SimpleRenderer {
    fn render(&self, context: &RenderContext) -> Bitmap {
        let (width, height) = (context.width, context.height);
        let mut bitmap = Bitmap::new(width, height);
        if width == 0 || height == 0 {
            return bitmap;
        }

        let tiles_x = (width + TILE_SIZE - 1) / TILE_SIZE;
        let tiles_y = (height + TILE_SIZE - 1) / TILE_SIZE;
        let total_tiles = tiles_x * tiles_y;
        let estimator = PixelEstimator::new(context, self.integrator.as_ref());
        let estimator_ref = &estimator;
        let seed = self.seed;

        log::info!("Rendering {}x{} with {} samples per pixel on {} threads.",
                   width, height, context.samples_per_pixel(), self.threads);
        log::debug!("{}\n{}", context.medium.describe(), estimator.sensor().describe());

        let progress = if self.show_progress {
            ProgressBar::new((width * height) as u64)
        } else {
            ProgressBar::with_draw_target(Some((width * height) as u64), ProgressDrawTarget::hidden())
        };
        progress.set_style(
            ProgressStyle::with_template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} pixels ({eta})")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );

        let next_tile = Arc::new(AtomicUsize::new(0));
        let (tx, rx) = mpsc::channel::<Tile>();

        thread::scope(|scope| {
            for _ in 0..self.threads.max(1) {
                let next_tile = Arc::clone(&next_tile);
                let tx = tx.clone();
                scope.spawn(move || {
                    loop {
                        let tile_index = next_tile.fetch_add(1, Ordering::Relaxed);
                        if tile_index >= total_tiles {
                            break;
                        }

                        let x0 = (tile_index % tiles_x) * TILE_SIZE;
                        let y0 = (tile_index / tiles_x) * TILE_SIZE;
                        let x1 = (x0 + TILE_SIZE).min(width);
                        let y1 = (y0 + TILE_SIZE).min(height);

                        let mut pixels = Vec::with_capacity((x1 - x0) * (y1 - y0));
                        for y in y0..y1 {
                            for x in x0..x1 {
                                let mut rng = LcgRng::for_pixel(seed, x, y);
                                pixels.push(estimator_ref.shade_pixel(x, y, &mut rng));
                                log::trace!("Traced ({},{}) OK", x, y);
                            }
                        }
                        if tx.send(Tile { x0, y0, x1, y1, pixels }).is_err() {
                            break;
                        }
                    }
                });
            }

            drop(tx);
            for tile in rx.iter() {
                let tile_width = tile.x1 - tile.x0;
                for y in tile.y0..tile.y1 {
                    for x in tile.x0..tile.x1 {
                        let sample = &tile.pixels[(x - tile.x0) + tile_width * (y - tile.y0)];
                        bitmap.set_pixel(x, y, sample.bgra, sample.radiance);
                    }
                }
                progress.inc(tile.pixels.len() as u64);
            }
        });
        progress.finish_and_clear();

        bitmap
    }
}

impl SimpleRenderer {
    pub fn new(integrator: Box<dyn Integrator>, seed: u64, threads: usize) -> Self {
        Self {
            integrator,
            seed,
            threads: threads.max(1),
            show_progress: true,
        }
    }

    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }
}

pub fn default_thread_count() -> usize {
    thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}
