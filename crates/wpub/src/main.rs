//! wpub CLI - publish generated images to WordPress.
//!
//! Provides commands for:
//! - `publish`: Upload an image and create a post around it

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::PublishArgs;
use output::Output;

/// wpub - publish generated images as WordPress posts.
#[derive(Parser)]
#[command(name = "wpub", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Upload an image and publish it as a post.
    Publish(PublishArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    let verbose = matches!(&cli.command, Commands::Publish(args) if args.verbose);

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let result = match cli.command {
        Commands::Publish(args) => args.execute(),
    };

    match result {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(err) => {
            output.error(&format!("Error: {err}"));
            std::process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_publish_requires_image() {
        assert!(Cli::try_parse_from(["wpub", "publish"]).is_err());
        assert!(Cli::try_parse_from(["wpub", "publish", "--image", "render.png"]).is_ok());
    }

    #[test]
    fn test_unknown_sampler_rejected() {
        let result = Cli::try_parse_from([
            "wpub",
            "publish",
            "--image",
            "render.png",
            "--sampler",
            "dpmpp2m",
        ]);
        assert!(result.is_err());
    }
}
