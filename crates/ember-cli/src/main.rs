//! `ember` : CLI d'Ember
//!
//! Ici on fait uniquement : parsing d'arguments, initialisation (logger,
//! couleur), et délégation à `ember_cli` (lib).

#![forbid(unsafe_code)]

use std::{path::PathBuf, process::ExitCode};

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use ember_lexer::ScannerOptions;

use ember_cli as cli;

// ──────────────────────────── CLI (clap) ────────────────────────────

#[derive(Debug, Parser)]
#[command(name = "ember", version, about = "Ember CLI : jetons et vérification lexicale", long_about = None)]
struct Opt {
    /// Augmente la verbosité (-v, -vv, -vvv)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Mode silencieux (n'affiche que les erreurs)
    #[arg(short = 'q', long = "quiet", action = ArgAction::SetTrue, global = true)]
    quiet: bool,

    /// Couleur des messages d'état
    #[arg(long = "color", value_enum, default_value_t = ColorChoice::Auto, global = true)]
    color: ColorChoice,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ColorChoice {
    Auto,
    Always,
    Never,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Afficher les jetons d'une source
    Tokens {
        /// Fichier source (ou - pour stdin)
        input: Option<PathBuf>,
        /// Fichier de sortie (stdout si omis)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Sortie JSON
        #[arg(long)]
        json: bool,
        /// `fun` produit FUN au lieu de FOR
        #[arg(long = "distinct-fun")]
        distinct_fun: bool,
    },

    /// Vérifier qu'une source ne contient aucune erreur lexicale
    Check {
        /// Fichier source (ou - pour stdin)
        input: Option<PathBuf>,
        /// `fun` produit FUN au lieu de FOR
        #[arg(long = "distinct-fun")]
        distinct_fun: bool,
    },
}

fn input_from_opt(p: Option<PathBuf>) -> cli::Input {
    match p {
        Some(path) if path.as_os_str() == "-" => cli::Input::Stdin,
        Some(path) => cli::Input::Path(path),
        None => cli::Input::Stdin,
    }
}

// ──────────────────────────── Logger / Couleur ────────────────────────────

fn init_telemetry(verbose: u8, quiet: bool) {
    let level = if quiet {
        "error"
    } else {
        match verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    };
    std::env::set_var("RUST_LOG", std::env::var("RUST_LOG").unwrap_or_else(|_| level.to_string()));
    cli::init_logger();
}

fn init_color(choice: ColorChoice) {
    // owo-colors détecte le TTY ; on ne fait que forcer.
    match choice {
        ColorChoice::Auto => {},
        ColorChoice::Always => {
            std::env::set_var("CLICOLOR_FORCE", "1");
            std::env::remove_var("NO_COLOR");
        },
        ColorChoice::Never => {
            std::env::set_var("NO_COLOR", "1");
            std::env::remove_var("CLICOLOR_FORCE");
        },
    }
}

// ──────────────────────────── main ────────────────────────────

fn main() -> ExitCode {
    match real_main() {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::from(1)
        },
    }
}

fn real_main() -> Result<u8> {
    let opt = Opt::parse();

    init_color(opt.color);
    init_telemetry(opt.verbose, opt.quiet);

    let command = match opt.cmd {
        Command::Tokens { input, output, json, distinct_fun } => cli::Command::Tokens(cli::TokensTask {
            input: input_from_opt(input),
            output: output.map_or(cli::Output::Stdout, cli::Output::Path),
            format: if json { cli::TokenFormat::Json } else { cli::TokenFormat::Text },
            options: ScannerOptions { distinct_fun },
        }),
        Command::Check { input, distinct_fun } => cli::Command::Check(cli::CheckTask {
            input: input_from_opt(input),
            options: ScannerOptions { distinct_fun },
        }),
    };

    let code = cli::execute(command).context("échec d'exécution de la commande")?;
    Ok(u8::try_from(code).unwrap_or(1))
}
