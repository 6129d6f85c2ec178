use clap::Parser;
use tracing_subscriber::EnvFilter;

use sharescope::cli;
use sharescope::errors::SharescopeError;

#[tokio::main]
async fn main() {
    let cli = cli::Cli::parse();

    // Initialize logging
    let log_level = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(!cli.no_color)
        .init();

    if cli.no_color {
        console::set_colors_enabled(false);
    }

    let result = match cli.command {
        cli::Commands::Serve(args) => cli::serve::handle_serve(args).await,
        cli::Commands::Sessions(args) => cli::sessions::handle_sessions(args),
        cli::Commands::Shares(args) => cli::shares::handle_shares(args),
        cli::Commands::Diff(args) => cli::diff::handle_diff(args),
        cli::Commands::Stats(args) => cli::stats::handle_stats(args),
    };

    match result {
        Ok(()) => {}
        Err(e) => {
            eprintln!("Error: {}", e);
            let exit_code = match &e {
                SharescopeError::Config(_) => 2,
                SharescopeError::SessionNotFound(_) => 3,
                SharescopeError::Database(_) => 4,
                _ => 1,
            };
            std::process::exit(exit_code);
        }
    }
}
