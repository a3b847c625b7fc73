use clap::Parser;
use shellnav::core::config::{self, CliOverrides};
use shellnav::tui;
use simplelog::{ConfigBuilder, WriteLogger};
use std::fs::File;

#[derive(Parser)]
#[command(name = "shellnav", about = "Navigation shell demo: screens, modals, side menu and status bar")]
struct Args {
    /// Delay before an attached panel starts animating, in milliseconds
    #[arg(long)]
    start_delay_ms: Option<u64>,

    /// Length of one animation, in milliseconds
    #[arg(long)]
    animation_ms: Option<u64>,

    /// Log level: off, error, warn, info, debug or trace
    #[arg(long)]
    log_level: Option<String>,
}

fn main() -> std::io::Result<()> {
    let args = Args::parse();

    let file_config = match config::load_config() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Warning: {e}, using defaults");
            Default::default()
        }
    };
    let cli = CliOverrides {
        start_delay_ms: args.start_delay_ms,
        animation_ms: args.animation_ms,
        log_level: args.log_level,
    };
    let resolved = config::resolve(&file_config, &cli);

    // Initialize file logger - writes to shellnav.log in current directory
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create("shellnav.log") {
        let _ = WriteLogger::init(resolved.log_level, log_config, log_file);
    }

    log::info!(
        "shellnav starting up (start delay {:?}, animation {:?})",
        resolved.start_delay,
        resolved.animation
    );

    tui::run(resolved)
}
