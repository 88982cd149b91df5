use clap::Parser;
use color_eyre::Result;
use ebioxp_tool::Cli;
use tracing_subscriber::filter::{EnvFilter, LevelFilter};

#[cfg(any(target_os = "linux", target_os = "android"))]
fn main() -> Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .from_env_lossy(),
        )
        .init();
    Cli::parse().run()
}

#[cfg(not(any(target_os = "linux", target_os = "android")))]
fn main() {
    eprintln!("ebioxp-tool currently supports Linux only.");
}
