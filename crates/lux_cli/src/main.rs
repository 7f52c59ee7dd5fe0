//! Render a scene to an image file.
//!
//! Run with: cargo run --release -- [SCENE] [-o PATH] [--seed N]
//!
//! `SCENE` is either a built-in scene name or a path to a JSON scene file.

use std::env;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{bail, Context, Result};
use env_logger::Env;
use lux_renderer::{render, render_parallel, DEFAULT_BUCKET_SIZE};
use lux_scene::{builtin, load_scene, Scene, BUILTIN_SCENES};
use rand::rngs::StdRng;
use rand::SeedableRng;

const USAGE: &str = "\
Usage: lux [SCENE] [OPTIONS]

SCENE is a built-in scene name or a path to a JSON scene file
(default: materials).

Options:
  -o, --output <PATH>    Output image, .ppm or .png (default: image.ppm)
      --seed <N>         Random seed (default: 0)
      --threads <N>      Worker threads (default: all cores)
      --bucket-size <N>  Bucket edge length in pixels (default: 64)
      --reference        Render single-threaded, top to bottom
  -h, --help             Print this help";

/// Parsed command line.
#[derive(Debug, Clone, PartialEq)]
struct Args {
    scene: String,
    output: PathBuf,
    seed: u64,
    threads: Option<usize>,
    bucket_size: u32,
    reference: bool,
    help: bool,
}

impl Default for Args {
    fn default() -> Self {
        Self {
            scene: "materials".to_string(),
            output: PathBuf::from("image.ppm"),
            seed: 0,
            threads: None,
            bucket_size: DEFAULT_BUCKET_SIZE,
            reference: false,
            help: false,
        }
    }
}

impl Args {
    fn parse<I: IntoIterator<Item = String>>(args: I) -> Result<Self> {
        let mut parsed = Args::default();
        let mut scene_set = false;
        let mut iter = args.into_iter();

        while let Some(arg) = iter.next() {
            match arg.as_str() {
                "-o" | "--output" => {
                    parsed.output = PathBuf::from(next_value(&mut iter, &arg)?);
                }
                "--seed" => {
                    let value = next_value(&mut iter, &arg)?;
                    parsed.seed = value
                        .parse()
                        .with_context(|| format!("Invalid seed: {}", value))?;
                }
                "--threads" => {
                    let value = next_value(&mut iter, &arg)?;
                    let threads: usize = value
                        .parse()
                        .with_context(|| format!("Invalid thread count: {}", value))?;
                    parsed.threads = Some(threads);
                }
                "--bucket-size" => {
                    let value = next_value(&mut iter, &arg)?;
                    parsed.bucket_size = value
                        .parse()
                        .with_context(|| format!("Invalid bucket size: {}", value))?;
                }
                "--reference" => parsed.reference = true,
                "-h" | "--help" => parsed.help = true,
                flag if flag.starts_with('-') => bail!("Unknown option: {}", flag),
                _ => {
                    if scene_set {
                        bail!("Unexpected argument: {}", arg);
                    }
                    parsed.scene = arg;
                    scene_set = true;
                }
            }
        }

        Ok(parsed)
    }
}

fn next_value<I: Iterator<Item = String>>(iter: &mut I, flag: &str) -> Result<String> {
    iter.next()
        .with_context(|| format!("Missing value for {}", flag))
}

/// Built-in names win over files; anything else is treated as a path.
fn resolve_scene(name: &str, seed: u64) -> Result<Scene> {
    if BUILTIN_SCENES.contains(&name) {
        log::info!("Using built-in scene '{}'", name);
        return Ok(builtin(name, seed)?);
    }

    let path = Path::new(name);
    if !path.exists() {
        bail!(
            "'{}' is neither a scene file nor a built-in scene ({})",
            name,
            BUILTIN_SCENES.join(", ")
        );
    }

    load_scene(path).with_context(|| format!("Failed to load scene {}", path.display()))
}

/// Logger honoring the filter in `env`, falling back to info.
fn logger_builder(env: Env<'_>) -> env_logger::Builder {
    env_logger::Builder::from_env(env.default_filter_or("info"))
}

fn main() -> Result<()> {
    logger_builder(Env::default()).init();

    let args = Args::parse(env::args().skip(1))?;
    if args.help {
        println!("{}", USAGE);
        return Ok(());
    }

    if let Some(threads) = args.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .context("Failed to configure thread pool")?;
    }

    let scene = resolve_scene(&args.scene, args.seed)?;
    log::info!(
        "Scene has {} objects, camera {}x{}",
        scene.world.len(),
        scene.camera.image_width(),
        scene.camera.image_height()
    );

    let start = Instant::now();
    let image = if args.reference {
        let mut rng = StdRng::seed_from_u64(args.seed);
        render(&scene.camera, &scene.world, &mut rng)
    } else {
        render_parallel(&scene.camera, &scene.world, args.seed, args.bucket_size)
    };
    log::info!("Done in {:.2}s", start.elapsed().as_secs_f64());

    image
        .save(&args.output)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Args> {
        Args::parse(args.iter().map(|s| s.to_string()))
    }

    #[test]
    fn test_defaults() {
        let args = parse(&[]).unwrap();
        assert_eq!(args, Args::default());
        assert_eq!(args.scene, "materials");
        assert_eq!(args.output, PathBuf::from("image.ppm"));
    }

    #[test]
    fn test_all_options() {
        let args = parse(&[
            "cover",
            "-o",
            "out.png",
            "--seed",
            "7",
            "--threads",
            "4",
            "--bucket-size",
            "16",
            "--reference",
        ])
        .unwrap();

        assert_eq!(args.scene, "cover");
        assert_eq!(args.output, PathBuf::from("out.png"));
        assert_eq!(args.seed, 7);
        assert_eq!(args.threads, Some(4));
        assert_eq!(args.bucket_size, 16);
        assert!(args.reference);
    }

    #[test]
    fn test_bad_arguments() {
        assert!(parse(&["--seed"]).is_err());
        assert!(parse(&["--seed", "abc"]).is_err());
        assert!(parse(&["--bogus"]).is_err());
        assert!(parse(&["one", "two"]).is_err());
    }

    #[test]
    fn test_logger_level_from_env() {
        env::set_var("LUX_TEST_LOG_DEBUG", "debug");
        let logger = logger_builder(Env::new().filter("LUX_TEST_LOG_DEBUG")).build();
        assert_eq!(logger.filter(), log::LevelFilter::Debug);

        env::remove_var("LUX_TEST_LOG_UNSET");
        let logger = logger_builder(Env::new().filter("LUX_TEST_LOG_UNSET")).build();
        assert_eq!(logger.filter(), log::LevelFilter::Info);
    }

    #[test]
    fn test_resolve_unknown_scene() {
        assert!(resolve_scene("definitely-not-a-scene", 0).is_err());
        assert!(resolve_scene("materials", 0).is_ok());
    }
}
