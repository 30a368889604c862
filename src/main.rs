#![deny(future_incompatible)]
#![deny(nonstandard_style)]
#![deny(clippy::pedantic)]
#![allow(
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss,
    clippy::float_cmp,
    clippy::many_single_char_names,
    clippy::missing_errors_doc,
    clippy::module_name_repetitions,
    clippy::similar_names,
    clippy::too_many_arguments,
    clippy::too_many_lines,
    clippy::unreadable_literal,
    clippy::wildcard_imports
)]

use std::{
    mem,
    path::PathBuf,
    sync::atomic::{AtomicBool, Ordering},
    time::Instant,
};

use anyhow::{ensure, Context, Result};
use bytemuck::{Pod, Zeroable};
use log::{debug, info};
use nalgebra as na;
use nalgebra::{point, vector};
use rand::prelude::*;
use rayon::prelude::*;

#[cfg(test)]
use approx::{assert_abs_diff_eq, assert_ulps_eq};

mod color;
mod cpupt;
mod demo;
mod math;
mod scene;

use color::*;
use math::*;
use scene::*;

const PI: f32 = std::f32::consts::PI;
const TAU: f32 = std::f32::consts::TAU;
const INV_PI: f32 = std::f32::consts::FRAC_1_PI;

//
// Main
//

#[derive(clap::Parser)]
#[clap(author, version, about)]
struct CliArgs {
    /// Image width in pixels.
    #[arg(long, default_value_t = 512)]
    width: u32,

    /// Image height in pixels.
    #[arg(long, default_value_t = 512)]
    height: u32,

    /// Samples per pixel.
    #[arg(long, default_value_t = 256)]
    samples: u32,

    /// Maximum number of surface bounces per path.
    #[arg(long, default_value_t = 5)]
    max_depth: u32,

    /// Base seed for the per-pixel sampler streams.
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Output image path.
    #[arg(long, default_value = "cornell.png")]
    output: PathBuf,
}

fn main() -> Result<()> {
    use clap::Parser;
    use indicatif::{ProgressBar, ProgressStyle};

    // Init logging.
    env_logger::init();

    let args = CliArgs::parse();
    ensure!(args.samples > 0, "--samples must be positive");
    let desc = demo::cornell_box(args.width, args.height);
    let scene = cpupt::Scene::create(&desc)?;

    // Accumulate one-sample frames so the progress bar tracks real work.
    let pixel_count = (args.width * args.height) as usize;
    let mut accumulated = vec![ColorRgb::BLACK; pixel_count];
    let pb = ProgressBar::new(u64::from(args.samples)).with_style(
        ProgressStyle::with_template("{wide_bar} elapsed={elapsed_precise} eta={eta_precise}")?,
    );
    for sample_index in 0..args.samples {
        let params = cpupt::Params {
            samples_per_pixel: 1,
            max_depth: args.max_depth,
            seed: args
                .seed
                .wrapping_add(u64::from(sample_index).wrapping_mul(0x51ed270b)),
        };
        let frame = cpupt::render(&scene, &params);
        for (sum, sample) in accumulated.iter_mut().zip(frame) {
            *sum += sample;
        }
        pb.inc(1);
    }
    pb.finish_and_clear();

    // Tonemap and write out. Radiance is linear; the file gets gamma 2.2.
    let normalization_factor = 1.0 / args.samples as f32;
    let image = imagelib::RgbImage::from_fn(args.width, args.height, |x, y| {
        let color = accumulated[(y * args.width + x) as usize] * normalization_factor;
        imagelib::Rgb([
            quantize(color.red()),
            quantize(color.green()),
            quantize(color.blue()),
        ])
    });
    image
        .save(&args.output)
        .with_context(|| format!("Writing image: {}", args.output.display()))?;
    info!("Wrote {}", args.output.display());

    Ok(())
}

fn quantize(value: f32) -> u8 {
    (255.0 * value.clamp(0.0, 1.0).powf(1.0 / 2.2)) as u8
}
