//! sel2casper CLI
//!
//! Translate a Selenium IDE HTML test into a CasperJS script on stdout.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use sel2casper::{RunConfig, Translator};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "sel2casper")]
#[command(version)]
#[command(about = "Translate Selenium IDE test tables into CasperJS scripts")]
#[command(disable_help_flag = true)]
struct Cli {
    /// Selenium IDE HTML file
    #[arg(required_unless_present_any = ["help", "list_commands"])]
    file: Option<PathBuf>,

    /// Only report warnings and errors; never print the script
    #[arg(short, long)]
    lint: bool,

    /// Template directory replacing the built-in templates
    #[arg(long, value_name = "DIR")]
    templates: Option<PathBuf>,

    /// List known commands and whether they are translated
    #[arg(long = "list-commands")]
    list_commands: bool,

    /// Print usage and exit
    #[arg(short, long)]
    help: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    if cli.help {
        // Asking for help is not a successful run.
        println!("{}", Cli::command().render_help());
        return ExitCode::FAILURE;
    }

    let result = if cli.list_commands {
        print_commands(&cli)
    } else {
        translate(&cli)
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn config(cli: &Cli) -> RunConfig {
    RunConfig {
        input: cli.file.clone().unwrap_or_default(),
        templates: cli.templates.clone(),
        lint: cli.lint,
    }
}

fn translate(cli: &Cli) -> Result<()> {
    let config = config(cli);
    let translation = sel2casper::run(&config)
        .with_context(|| format!("failed to translate {}", config.input.display()))?;
    print!("{}", translation.output);
    tracing::debug!("{}", translation.summary());
    Ok(())
}

fn print_commands(cli: &Cli) -> Result<()> {
    let translator = Translator::from_config(&config(cli)).context("failed to load templates")?;
    let engine = translator.engine();

    println!("Translated commands:");
    println!();
    let mut translated: Vec<_> = engine
        .commands
        .iter()
        .filter(|(name, _)| engine.is_implemented(name))
        .collect();
    translated.sort_by_key(|(name, _)| (*name).clone());
    for (name, cmd) in &translated {
        let usage = cmd.usage();
        println!("  {:<20} {} ({} assertion(s))", name, usage.summary, usage.assertions);
    }

    println!();
    println!("Recognized, not translated:");
    println!();
    for name in engine.templates.vocabulary() {
        if !engine.is_implemented(name) {
            println!("  {}", name);
        }
    }
    Ok(())
}
