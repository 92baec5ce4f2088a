use crate::config::DeblurConfig;
use crate::error::DeblurError;
use crate::filters::filter::Filter;
use crate::filters::wiener::WienerDeconvolution;
use anyhow::Context;
use clap::Parser;
use std::ffi::OsString;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

mod config;
mod error;
mod filters;
mod io;
mod math_tools;

/// Exit status reported when the input image cannot be loaded (-1 as an 8-bit status).
const LOAD_FAILURE: u8 = 255;

/// Printed once at startup, before the arguments are parsed.
const BANNER: [&str; 3] = [
    "2018-08-06",
    "Motion_deblur_v1",
    "You will learn how to recover a motion blur image by Wiener filter",
];

#[derive(Debug, Parser)]
#[command(
    name = "motion-deblur",
    about = "Motion_deblur_v1\nRecovers a motion blurred image with a Wiener filter.",
    after_help = "`-usage`, `--usage` and `-?` are accepted as aliases of `--help`."
)]
struct Cli {
    /// input image name
    #[arg(long, default_value = "P1030513.JPG")]
    image: PathBuf,
    /// length of a motion
    #[arg(long = "LEN", default_value_t = 78)]
    len: u32,
    /// angle of a motion in degrees
    #[arg(long = "THETA", default_value_t = 12, allow_negative_numbers = true)]
    theta: i32,
    /// signal to noise ratio
    #[arg(long = "SNR", default_value_t = 100, allow_negative_numbers = true)]
    snr: i32,
}

impl From<Cli> for DeblurConfig {
    fn from(cli: Cli) -> Self {
        DeblurConfig {
            image: cli.image,
            length: cli.len,
            angle: cli.theta,
            snr: cli.snr,
            ..DeblurConfig::default()
        }
    }
}

/// Rewrites the alternative help spellings `-usage`, `--usage` and `-?` to `--help`.
fn normalize_help_aliases<I>(args: I) -> impl Iterator<Item = OsString>
where
    I: IntoIterator<Item = OsString>,
{
    args.into_iter().map(|arg| {
        if arg == "-usage" || arg == "--usage" || arg == "-?" {
            OsString::from("--help")
        } else {
            arg
        }
    })
}

fn run(config: &DeblurConfig) -> anyhow::Result<()> {
    let image = io::load_grayscale(&config.image)?;
    log::info!(
        "opened {:?} ({} x {})",
        config.image,
        image.ncols(),
        image.nrows()
    );

    // only even dimensions can be processed
    let roi = io::crop_even(&image)?;
    if roi.dim() != image.dim() {
        log::debug!("cropped to {} x {}", roi.ncols(), roi.nrows());
    }

    let filter = WienerDeconvolution::new(config.length, config.angle as f32, config.nsr());
    let filter_config = filter.config();
    log::info!(
        "applying {} (LEN = {}, THETA = {}, SNR = {})",
        filter_config.name,
        config.length,
        config.angle,
        config.snr
    );
    log::debug!("{}", filter_config.description);
    if let Some((label, url)) = &filter_config.hyperlink {
        log::debug!("{}: {}", label.as_deref().unwrap_or("reference"), url);
    }
    let start = Instant::now();
    let restored = filter
        .filter(&roi)
        .with_context(|| format!("failed to restore {:?}", config.image))?;
    log::info!("restoration done. This took {:?}", start.elapsed());

    let output = io::to_u8_normalized(&restored);
    io::save_grayscale(&config.output, &output)?;
    log::info!("saved {:?}", config.output);
    Ok(())
}

fn exit_status_for(err: &anyhow::Error) -> u8 {
    match err.downcast_ref::<DeblurError>() {
        Some(deblur_err) if deblur_err.is_input_failure() => LOAD_FAILURE,
        _ => 1,
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    for line in BANNER {
        log::info!("{line}");
    }

    let cli = Cli::parse_from(normalize_help_aliases(std::env::args_os()));
    let config = DeblurConfig::from(cli);
    log::debug!("{config:?}");

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err:#}");
            ExitCode::from(exit_status_for(&err))
        }
    }
}
