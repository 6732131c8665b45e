use clap::Parser;
use fieldset::app;
use fieldset::cli::Cli;
use fieldset::FormError;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // RUST_LOG wins over --log-level
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let output = match app::run(&cli) {
        Ok(output) => output,
        Err(err) => {
            if let Some(FormError::CheckFailed { report, .. }) = err.downcast_ref::<FormError>() {
                print!("{}", report);
            }
            return Err(err);
        }
    };
    print!("{}", output);

    Ok(())
}
