use volpath::core::rng::LcgRng;
use volpath::core::scene_loader::{load_scene, SceneSettings};
use volpath::integrators::volume_path::VolumePathIntegrator;
use volpath::renderers::estimator::PixelEstimator;
use std::env;

fn main() {
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info");
    }
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 3 {
        eprintln!("Usage: {} <x> <y> [scene.xml] [--spp N] [--seed N]", args[0]);
        std::process::exit(1);
    }

    let x: usize = args[1].parse().unwrap_or(0);
    let y: usize = args[2].parse().unwrap_or(0);

    let mut scene_path: Option<String> = None;
    let mut spp: Option<u32> = None;
    let mut seed: Option<u64> = None;

    let mut i = 3;
    while i < args.len() {
        match args[i].as_str() {
            "--spp" => {
                i += 1;
                spp = args.get(i).and_then(|v| v.parse::<u32>().ok());
            }
            "--seed" => {
                i += 1;
                seed = args.get(i).and_then(|v| v.parse::<u64>().ok());
            }
            other => scene_path = Some(other.to_string()),
        }
        i += 1;
    }

    let mut settings = match &scene_path {
        Some(path) => load_scene(path).unwrap_or_else(|e| {
            log::error!("Failed to load scene {}: {}", path, e);
            std::process::exit(1);
        }),
        None => SceneSettings::default(),
    };
    if let Some(spp) = spp {
        settings.samples_per_axis = spp;
    }
    if let Some(seed) = seed {
        settings.seed = seed;
    }

    let context = settings.build_context().unwrap_or_else(|e| {
        log::error!("Invalid scene: {}", e);
        std::process::exit(1);
    });
    if x >= context.width || y >= context.height {
        eprintln!("Pixel out of bounds: ({}, {}) for size {}x{}", x, y, context.width, context.height);
        std::process::exit(2);
    }

    let integrator = VolumePathIntegrator::new();
    let estimator = PixelEstimator::new(&context, &integrator);
    let mut rng = LcgRng::for_pixel(settings.seed, x, y);
    let sample = estimator.shade_pixel(x, y, &mut rng);

    println!(
        "pixel ({}, {}) spp={} seed={} -> R {:.6}, G {:.6}, B {:.6} | BGRA {:?}",
        x, y, context.samples_per_pixel(), settings.seed,
        sample.radiance.x, sample.radiance.y, sample.radiance.z, sample.bgra
    );
}
