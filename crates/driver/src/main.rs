//! Squares Bench CLI
//!
//! Compares a host arbitrary-precision loop with the native squares kernel
//! loaded from its dynamic library.

use clap::Parser as ClapParser;
use squares_bench::platform::{KERNEL_PATH_ENV, resolve_library_path};
use squares_bench::report::render;
use squares_bench::{
    BenchConfig, ConfigOverrides, DriverError, NativeLibrary, Platform, ReportFormat,
    run_comparison,
};
use std::path::PathBuf;
use std::process;
use tracing::{info, warn};

/// Exit code when host and native results differ under `--verify`
const EXIT_MISMATCH: i32 = 2;

#[derive(ClapParser)]
#[command(name = "squares-bench")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Compare a host sum-of-squares loop with the native kernel", long_about = None)]
struct Cli {
    /// Number of input elements (default 1000000)
    #[arg(short = 'n', long)]
    size: Option<usize>,

    /// First value of the sequential input (default 0)
    #[arg(long, allow_hyphen_values = true)]
    start: Option<i32>,

    /// Use seeded random input instead of a sequential one
    #[arg(long, value_name = "SEED")]
    random: Option<u64>,

    /// Lower bound of random values
    #[arg(long, allow_hyphen_values = true)]
    min: Option<i32>,

    /// Upper bound of random values
    #[arg(long, allow_hyphen_values = true)]
    max: Option<i32>,

    /// Repeat the measurement and report the best time
    #[arg(short, long)]
    runs: Option<u32>,

    /// Kernel library path (overrides SQUARES_KERNEL_PATH and --library-dir)
    #[arg(long, value_name = "PATH")]
    library: Option<PathBuf>,

    /// Directory containing the platform's kernel library
    #[arg(long, value_name = "DIR")]
    library_dir: Option<PathBuf>,

    /// Report format
    #[arg(long, value_enum)]
    format: Option<ReportFormat>,

    /// Exit with status 2 if host and native results differ
    #[arg(long)]
    verify: bool,

    /// TOML config file
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,
}

impl Cli {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            size: self.size,
            start: self.start,
            seed: self.random,
            min: self.min,
            max: self.max,
            runs: self.runs,
            library: self.library.clone(),
            library_dir: self.library_dir.clone(),
            format: self.format,
            verify: self.verify,
        }
    }
}

fn main() {
    // Logs go to stderr so stdout carries only the report
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("squares_bench=info".parse().expect("valid directive")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(&cli) {
        Ok(true) => {}
        Ok(false) => process::exit(EXIT_MISMATCH),
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}

/// Run the comparison; `Ok(false)` means verification failed
fn run(cli: &Cli) -> Result<bool, DriverError> {
    let config = BenchConfig::load(cli.config.as_deref())?.apply(cli.overrides());

    let path = resolve_library_path(
        Platform::current(),
        config.library.as_deref(),
        std::env::var_os(KERNEL_PATH_ENV).map(PathBuf::from),
        config.library_dir.as_deref(),
    )?;
    let library = NativeLibrary::open(&path)?;
    let kernel = library.bind()?;

    let spec = config.input_spec();
    let values = spec.build()?;
    info!("Built {} input elements ({:?})", values.len(), spec);

    let comparison = run_comparison(&kernel, &values, config.runs)?;
    print!("{}", render(&comparison, config.format)?);

    let live = kernel.live_buffers();
    if live != 0 {
        warn!("{} kernel result buffer(s) were not released", live);
    }

    if !comparison.agree() {
        warn!(
            "host result {} differs from native result {}",
            comparison.host.result, comparison.native.result
        );
        return Ok(!config.verify);
    }
    Ok(true)
}
