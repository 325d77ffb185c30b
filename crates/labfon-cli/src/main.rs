//! Laboratório de Fonética site renderer CLI.

use std::io::{self, IsTerminal};

use clap::{ColorChoice, Parser};
use tracing::level_filters::LevelFilter;

use labfon_cli::cli::{Cli, Command, ListingFormatArg, LogFormatArg, LogLevelArg};
use labfon_cli::commands::{open_preferences, run_cite, run_facets, run_publications, run_site};
use labfon_cli::logging::{LogConfig, LogFormat, init_logging};
use labfon_cli::summary::{print_facets, print_listing, print_site_summary};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let exit_code = match &cli.command {
        Command::Site(args) => {
            let preferences = open_preferences(cli.prefs_file.as_deref());
            match run_site(args, preferences) {
                Ok(result) => {
                    if result.output.is_some() {
                        print_site_summary(&result);
                    } else {
                        print!("{}", result.html);
                    }
                    if result.has_errors() { 1 } else { 0 }
                }
                Err(error) => report(&error),
            }
        }
        Command::Publications(args) => {
            let preferences = open_preferences(cli.prefs_file.as_deref());
            match run_publications(args, preferences) {
                Ok(result) => {
                    match args.format {
                        ListingFormatArg::Html => println!("{}", result.markup),
                        ListingFormatArg::Table => print_listing(&result),
                    }
                    if let Some(announcement) = &result.announcement {
                        eprintln!("{announcement}");
                    }
                    if matches!(result.outcome, labfon_render::RenderOutcome::Failed(_)) {
                        1
                    } else {
                        0
                    }
                }
                Err(error) => report(&error),
            }
        }
        Command::Cite(args) => match run_cite(args) {
            Ok(citation) => {
                println!("{citation}");
                0
            }
            Err(error) => report(&error),
        },
        Command::Facets(args) => match run_facets(args) {
            Ok(index) => {
                print_facets(&index);
                0
            }
            Err(error) => report(&error),
        },
    };
    std::process::exit(exit_code);
}

fn report(error: &anyhow::Error) -> i32 {
    eprintln!("error: {error:#}");
    1
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        ..LogConfig::default()
    };
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    if let Some(level) = cli.log_level {
        config.level_filter = match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        };
    }
    config.format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    config.log_file = cli.log_file.clone();
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}
