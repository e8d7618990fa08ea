//! ember-lexer : analyse lexicale pour Ember
//!
//! Faits saillants :
//! - `Scanner` : curseur sur une source empruntée, produit un jeton à la demande
//!   (`next_token`) ou s'utilise comme itérateur (`Eof` rendu une seule fois)
//! - mots-clés par aiguillage sur le premier/second caractère, identifiants,
//!   nombres décimaux (`123`, `1.5`), chaînes entre guillemets (multi-lignes,
//!   sans échappement), commentaires `//`
//! - erreurs lexicales rendues comme **données** : jeton `Error` dont le lexème
//!   est le message ; le scan continue
//!
//! Exemple éclair :
//! ```
//! use ember_lexer::{Scanner, TokenKind};
//!
//! let src = "var x = 1.5; // commentaire\nprint x;";
//! let mut sc = Scanner::new(src);
//! loop {
//!     let tok = sc.next_token();
//!     if tok.kind == TokenKind::Eof { break; }
//!     assert_ne!(tok.kind, TokenKind::Error);
//! }
//! assert_eq!(sc.line(), 2);
//! ```

#![deny(missing_docs)]

/* ─────────────────────────── Traces ─────────────────────────── */

#[cfg(feature = "trace")]
macro_rules! trace_log {
    ($($arg:tt)*) => { ::log::trace!($($arg)*) };
}

#[cfg(not(feature = "trace"))]
macro_rules! trace_log {
    ($($arg:tt)*) => {{ let _ = format_args!($($arg)*); }};
}

#[cfg(feature = "trace")]
macro_rules! debug_log {
    ($($arg:tt)*) => { ::log::debug!($($arg)*) };
}

#[cfg(not(feature = "trace"))]
macro_rules! debug_log {
    ($($arg:tt)*) => {{ let _ = format_args!($($arg)*); }};
}

/* ─────────────────────────── Modules ─────────────────────────── */

/// Scanner et options.
pub mod scanner;
/// Jetons et genres de jetons.
pub mod token;

pub use scanner::{Scanner, ScannerOptions, UNEXPECTED_CHARACTER, UNTERMINATED_STRING};
pub use token::{Token, TokenKind};

/// Tokenise toute la source (ajoute `Eof` final).
#[must_use]
pub fn tokenize(source: &str) -> Vec<Token<'_>> { Scanner::new(source).collect() }

/// Comme [`tokenize`], avec des options explicites.
#[must_use]
pub fn tokenize_with(source: &str, opts: ScannerOptions) -> Vec<Token<'_>> {
    Scanner::with_options(source, opts).collect()
}
