// Copyright 2020 TwoCookingMice

use volpath::core::scene_loader::{load_scene, SceneSettings};
use volpath::integrators::volume_path::VolumePathIntegrator;
use volpath::io::image_utils::write_bitmap;
use volpath::renderers::simple::{Renderer, SimpleRenderer};

use console::style;
use std::env;
use std::path::PathBuf;
use std::time::Instant;

fn usage(program: &str) -> ! {
    eprintln!("Usage: {} [scene.xml] [--output P] [--spp N] [--max-interactions N] [--seed N] [--threads N]", program);
    std::process::exit(1);
}

fn parse_flag<T: std::str::FromStr>(program: &str, flag: &str, value: Option<&String>) -> T {
    match value.and_then(|v| v.parse::<T>().ok()) {
        Some(v) => v,
        None => {
            eprintln!("Invalid or missing value for {}", flag);
            usage(program)
        }
    }
}

fn main() {
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info");
    }
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let program = args[0].as_str();

    let mut scene_path: Option<String> = None;
    let mut output_override: Option<PathBuf> = None;
    let mut spp_override: Option<u32> = None;
    let mut max_interactions_override: Option<u32> = None;
    let mut seed_override: Option<u64> = None;
    let mut threads_override: Option<usize> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--output" => {
                i += 1;
                output_override = Some(PathBuf::from(parse_flag::<String>(program, "--output", args.get(i))));
            }
            "--spp" => {
                i += 1;
                spp_override = Some(parse_flag(program, "--spp", args.get(i)));
            }
            "--max-interactions" => {
                i += 1;
                max_interactions_override = Some(parse_flag(program, "--max-interactions", args.get(i)));
            }
            "--seed" => {
                i += 1;
                seed_override = Some(parse_flag(program, "--seed", args.get(i)));
            }
            "--threads" => {
                i += 1;
                threads_override = Some(parse_flag(program, "--threads", args.get(i)));
            }
            "-h" | "--help" => usage(program),
            other if other.starts_with("--") => {
                eprintln!("Unknown option {}", other);
                usage(program);
            }
            other => {
                if scene_path.is_some() {
                    usage(program);
                }
                scene_path = Some(other.to_string());
            }
        }
        i += 1;
    }

    let mut settings = match &scene_path {
        Some(path) => match load_scene(path) {
            Ok(settings) => settings,
            Err(e) => {
                log::error!("Failed to load scene {}: {}", path, e);
                std::process::exit(1);
            }
        },
        None => SceneSettings::default(),
    };
    if let Some(output) = output_override {
        settings.output = output;
    }
    if let Some(spp) = spp_override {
        settings.samples_per_axis = spp;
    }
    if let Some(max_interactions) = max_interactions_override {
        settings.max_interactions = max_interactions;
    }
    if let Some(seed) = seed_override {
        settings.seed = seed;
    }
    if let Some(threads) = threads_override {
        settings.threads = threads.max(1);
    }

    let start = Instant::now();
    let context = match settings.build_context() {
        Ok(context) => context,
        Err(e) => {
            log::error!("Invalid scene: {}", e);
            std::process::exit(1);
        }
    };

    let renderer = SimpleRenderer::new(Box::new(VolumePathIntegrator::new()), settings.seed, settings.threads);
    let image = renderer.render(&context);

    if let Err(e) = write_bitmap(&image, &settings.output) {
        log::error!("Failed to write {}: {}", settings.output.display(), e);
        std::process::exit(1);
    }

    let elapsed = start.elapsed();
    log::info!("Wrote {} in {:.3}s.", settings.output.display(), elapsed.as_secs_f64());
    println!("{} {} ({}x{}) in {}",
             style("Finished").green().bold(),
             style(settings.output.display()).cyan(),
             image.width(), image.height(),
             style(format!("{:.3}s", elapsed.as_secs_f64())).yellow());
}
