//! Row-band partitioning for parallel rendering.
//!
//! Divides the image into contiguous bands of scanlines, one per worker.
//! Each worker renders its band straight into a disjoint slice of the
//! shared pixel grid, so no synchronization is needed on the output.

use std::num::NonZeroUsize;
use std::thread;
use std::time::Instant;

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::error::RenderResult;
use crate::renderer::{render_rows, ImageBuffer};
use crate::{Camera, RenderConfig, Scene};

/// Worker count used when the hardware concurrency cannot be determined.
pub const FALLBACK_WORKERS: usize = 4;

/// A horizontal band of scanlines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Band {
    /// First scanline of the band (0 = top of the image)
    pub y: u32,
    /// Number of scanlines in the band
    pub height: u32,
    /// Index of this band, top to bottom
    pub index: usize,
}

impl Band {
    /// Create a new band.
    pub fn new(y: u32, height: u32, index: usize) -> Self {
        Self { y, height, index }
    }

    /// Get the total number of pixels in this band.
    pub fn pixel_count(&self, image_width: u32) -> usize {
        self.height as usize * image_width as usize
    }
}

/// Split `image_height` scanlines into at most `count` bands.
///
/// Bands are ordered top to bottom, cover every scanline exactly once and
/// differ in height by at most one row. No band is empty.
pub fn generate_bands(image_height: u32, count: usize) -> Vec<Band> {
    let count = count.clamp(1, image_height.max(1) as usize) as u32;
    let base = image_height / count;
    let remainder = image_height % count;

    let mut bands = Vec::with_capacity(count as usize);
    let mut y = 0;
    for index in 0..count {
        // The first `remainder` bands take one extra row
        let height = base + u32::from(index < remainder);
        if height == 0 {
            break;
        }
        bands.push(Band::new(y, height, index as usize));
        y += height;
    }

    bands
}

/// Number of workers a render with this configuration uses.
pub fn resolve_worker_count(config: &RenderConfig) -> usize {
    match config.threads {
        Some(threads) => threads.max(1),
        None => thread::available_parallelism()
            .map(NonZeroUsize::get)
            .unwrap_or(FALLBACK_WORKERS),
    }
}

/// Render the whole image with one worker per row band.
///
/// Workers run on a dedicated thread pool sized to the band count and the
/// call returns once every band is finished. Each worker owns its random
/// generator: seeded from `config.seed + 1 + band index` when a seed is
/// set, from entropy otherwise. Seed `config.seed` itself belongs to scene
/// construction (see [`scene_rng`]).
pub fn render_bands(camera: &Camera, scene: &Scene, config: &RenderConfig) -> RenderResult<ImageBuffer> {
    let width = config.image_width;
    let height = config.image_height();
    let bands = generate_bands(height, resolve_worker_count(config));

    let mut image = ImageBuffer::new(width, height);
    if width == 0 || bands.is_empty() {
        return Ok(image);
    }

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(bands.len())
        .thread_name(|index| format!("ember-band-{index}"))
        .build()?;

    log::info!(
        "Rendering {}x{} @ {} spp, depth {} on {} bands",
        width,
        height,
        config.samples_per_pixel,
        config.max_depth,
        bands.len()
    );

    // Carve the grid into one disjoint mutable slice per band
    let mut slices = Vec::with_capacity(bands.len());
    let mut rest = image.pixels.as_mut_slice();
    for band in &bands {
        let (head, tail) = std::mem::take(&mut rest).split_at_mut(band.pixel_count(width));
        slices.push((*band, head));
        rest = tail;
    }

    pool.scope(|scope| {
        for (band, pixels) in slices {
            scope.spawn(move |_| render_band(camera, scene, config, band, pixels));
        }
    });

    Ok(image)
}

/// Generator for scene construction.
pub fn scene_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// Generator for the worker rendering band `index`.
///
/// Offset by one from the scene seed so no worker replays the stream that
/// built the scene.
pub fn worker_rng(seed: Option<u64>, index: usize) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(1).wrapping_add(index as u64)),
        None => StdRng::from_entropy(),
    }
}

fn render_band(camera: &Camera, scene: &Scene, config: &RenderConfig, band: Band, pixels: &mut [[u8; 3]]) {
    let mut rng = worker_rng(config.seed, band.index);

    log::debug!("Band {}: rows {}..{} starting", band.index, band.y, band.y + band.height);
    let start = Instant::now();

    render_rows(camera, scene, config, band.y, pixels, &mut rng);

    log::info!("Band {}: finished in {:.2?}", band.index, start.elapsed());
}
