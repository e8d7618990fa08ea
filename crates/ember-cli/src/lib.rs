//! ember-cli : bibliothèque interne du binaire `ember`
//!
//! But : fournir une API **testable** pour le CLI sans mélanger la logique
//! d'E/S et le parsing d'arguments (laisse ça à `main.rs`).
//!
//! Points clés :
//! - `tokens` : dump des jetons (texte aligné ou JSON)
//! - `check`  : scan complet, rapport des erreurs lexicales, code de sortie 65
//! - l'hôte possède la source ; le scanner ne fait que l'emprunter
//! - Traces (`feature = "trace"`) et couleurs (`feature = "color"`) optionnelles

#![deny(unused_must_use)]
#![forbid(unsafe_code)]

use std::{
    fmt::Write as _,
    fs::{self, File},
    io::{self, BufReader, BufWriter, Read, Write},
    path::{Path, PathBuf},
};

use anyhow::{anyhow, Context, Result};
use ember_lexer::{Scanner, ScannerOptions, Token};

#[cfg(feature = "color")]
use owo_colors::OwoColorize;

/// Code de sortie quand la source contient des erreurs lexicales.
pub const EXIT_LEX_ERROR: i32 = 65;

// ───────────────────────────── Types publics ─────────────────────────────

/// Commande haut-niveau (le parsing CLI reste dans main.rs).
#[derive(Clone, Debug)]
pub enum Command {
    /// Affiche les jetons d'une source.
    Tokens(TokensTask),
    /// Vérifie qu'une source ne contient aucune erreur lexicale.
    Check(CheckTask),
}

/// Paramètres de `tokens`.
#[derive(Clone, Debug, Default)]
pub struct TokensTask {
    /// Source à scanner.
    pub input: Input,
    /// Destination du dump.
    pub output: Output,
    /// Texte ou JSON.
    pub format: TokenFormat,
    /// Options du scanner.
    pub options: ScannerOptions,
}

/// Paramètres de `check`.
#[derive(Clone, Debug, Default)]
pub struct CheckTask {
    /// Source à scanner.
    pub input: Input,
    /// Options du scanner.
    pub options: ScannerOptions,
}

/// Format du dump de jetons.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TokenFormat {
    /// Une ligne par jeton.
    #[default]
    Text,
    /// Tableau JSON.
    Json,
}

/// Entrée texte (source) : fichier ou `-` (=stdin).
#[derive(Clone, Debug, Default)]
pub enum Input {
    /// Fichier.
    Path(PathBuf),
    /// Entrée standard.
    #[default]
    Stdin,
}

/// Sortie texte.
#[derive(Clone, Debug, Default)]
pub enum Output {
    /// Fichier (écriture atomique).
    Path(PathBuf),
    /// Sortie standard.
    #[default]
    Stdout,
}

// ───────────────────────────── Initialisation ─────────────────────────────

/// Initialise le logger selon la feature `trace`.
pub fn init_logger() {
    #[cfg(feature = "trace")]
    {
        let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
            .format_timestamp_secs()
            .try_init();
    }
}

// ───────────────────────────── Exécution ─────────────────────────────

/// Exécute une commande. Retourne un code de sortie.
///
/// # Errors
/// Erreurs d'E/S (lecture de la source, écriture du dump) ou de sérialisation.
pub fn execute(cmd: Command) -> Result<i32> {
    match cmd {
        Command::Tokens(t) => tokens_entry(&t),
        Command::Check(t) => {
            let src = read_source(&t.input).context("lecture de la source")?;
            let errors = lexical_errors(&src, t.options);
            let mut err = io::stderr().lock();
            for line in &errors {
                writeln!(err, "{line}")?;
            }
            if errors.is_empty() {
                status_ok("CHECK", "aucune erreur lexicale");
                Ok(0)
            } else {
                status_err("CHECK", &format!("{} erreur(s) lexicale(s)", errors.len()));
                Ok(EXIT_LEX_ERROR)
            }
        },
    }
}

fn tokens_entry(task: &TokensTask) -> Result<i32> {
    let src = read_source(&task.input).context("lecture de la source")?;
    let text = match task.format {
        TokenFormat::Text => render_tokens(&src, task.options),
        TokenFormat::Json => render_tokens_json(&src, task.options)?,
    };
    match task.output {
        Output::Stdout => {
            let mut w = BufWriter::new(io::stdout().lock());
            w.write_all(text.as_bytes())?;
            w.flush()?;
        },
        Output::Path(ref p) => {
            write_text_atomic(p, &text).with_context(|| format!("écriture de {}", display(p)))?;
            status_ok("TOKENS", &display(p));
        },
    }
    Ok(0)
}

// ───────────────────────────── Rendus ─────────────────────────────

/// Une ligne par jeton : ligne (ou `|` si inchangée), genre, lexème.
#[must_use]
pub fn render_tokens(src: &str, options: ScannerOptions) -> String {
    let mut out = String::new();
    let mut last_line = None;
    for token in Scanner::with_options(src, options) {
        if last_line == Some(token.line) {
            let _ = write!(out, "   | ");
        } else {
            let _ = write!(out, "{:4} ", token.line);
            last_line = Some(token.line);
        }
        let _ = writeln!(out, "{:<13} '{}'", token.kind, token.lexeme);
    }
    out
}

/// Tableau JSON de tous les jetons, `EOF` compris.
///
/// # Errors
/// Échec de sérialisation (ne devrait pas arriver pour des jetons valides).
pub fn render_tokens_json(src: &str, options: ScannerOptions) -> Result<String> {
    let tokens: Vec<Token<'_>> = Scanner::with_options(src, options).collect();
    let mut json = serde_json::to_string_pretty(&tokens)?;
    json.push('\n');
    Ok(json)
}

/// Erreurs lexicales au format `[line N] Error: message`.
#[must_use]
pub fn lexical_errors(src: &str, options: ScannerOptions) -> Vec<String> {
    Scanner::with_options(src, options)
        .filter(Token::is_error)
        .map(|t| {
            log::debug!("error token at {:?}", t.span);
            format!("[line {}] Error: {}", t.line, t.lexeme)
        })
        .collect()
}

// ───────────────────────────── Utilitaires E/S ─────────────────────────────

/// Lit toute la source (fichier ou stdin).
///
/// # Errors
/// Fichier introuvable/illisible ou contenu non UTF-8.
pub fn read_source(input: &Input) -> Result<String> {
    match input {
        Input::Stdin => {
            let mut s = String::new();
            io::stdin().read_to_string(&mut s)?;
            Ok(s)
        },
        Input::Path(p) => {
            let f = File::open(p).with_context(|| format!("ouverture: {}", display(p)))?;
            let mut r = BufReader::new(f);
            let mut s = String::new();
            r.read_to_string(&mut s).with_context(|| format!("lecture: {}", display(p)))?;
            log::info!("source chargée: {} ({} octets)", display(p), s.len());
            Ok(s)
        },
    }
}

fn write_text_atomic(path: &Path, text: &str) -> Result<()> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        Some(_) => Path::new("."),
        None => return Err(anyhow!("chemin de sortie sans parent: {}", display(path))),
    };
    let tmp = unique_tmp_path(parent, path.file_name().unwrap_or_default());
    {
        let mut w = BufWriter::new(File::create(&tmp)?);
        w.write_all(text.as_bytes())?;
        w.flush()?;
    }
    if path.exists() {
        // Windows : Rename sur cible existante peut échouer
        let _ = fs::remove_file(path);
    }
    fs::rename(&tmp, path).or_else(|_| {
        // fallback : copie puis suppr tmp
        fs::copy(&tmp, path).map(|_| ()).and_then(|()| fs::remove_file(&tmp))
    })?;
    Ok(())
}

fn unique_tmp_path(dir: &Path, base: &std::ffi::OsStr) -> PathBuf {
    let mut i = 0u32;
    loop {
        let candidate = dir.join(format!("{}.tmp{}", base.to_string_lossy(), i));
        if !candidate.exists() {
            return candidate;
        }
        i = i.wrapping_add(1);
    }
}

fn display(p: &Path) -> String { p.to_string_lossy().to_string() }

// ───────────────────────────── Sorties jolies ─────────────────────────────

fn status_ok(tag: &str, msg: &str) {
    #[cfg(feature = "color")]
    {
        eprintln!("{} {}", tag.green().bold(), msg);
    }
    #[cfg(not(feature = "color"))]
    {
        eprintln!("{tag} {msg}");
    }
}

fn status_err(tag: &str, msg: &str) {
    #[cfg(feature = "color")]
    {
        eprintln!("{} {}", tag.red().bold(), msg);
    }
    #[cfg(not(feature = "color"))]
    {
        eprintln!("{tag} {msg}");
    }
}

// ───────────────────────────── Tests ─────────────────────────────
