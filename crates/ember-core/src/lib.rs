//! ember-core : primitives partagées du runtime Ember
//!
//! Fournit :
//! - `DynArray<T>` : tableau à croissance amortie (politique `max(8, 2×cap)`)
//! - `Value` : scalaire numérique (f64) affiché comme `%g`
//! - `Chunk` : octets d'instructions + table des lignes (en phase) + pool de constantes
//! - `disasm` : listing textuel d'un chunk
//! - `Pos`, `Span` : positions dans une source
//! - Erreurs `CoreError` + alias `CoreResult<T>`
//!
//! Features :
//! - `trace` (par défaut) : traces de croissance via la façade `log`
//! - `serde` : derive (dé)sérialisation sur `Pos`/`Span`
//!
//! Exemple éclair :
//! ```
//! use ember_core::{Chunk, Value};
//!
//! let mut chunk = Chunk::new();
//! let ix = chunk.add_constant(Value(1.2));
//! chunk.append(0x01, 123);
//! chunk.append(ix as u8, 123);
//! assert_eq!(chunk.code(), &[0x01, 0x00]);
//! assert_eq!(chunk.lines(), &[123, 123]);
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

/* ─────────────────────────── Modules publics ─────────────────────────── */

/// Tableau dynamique générique (croissance amortie).
pub mod array;
/// Primitives de bytecode (chunk, listing).
pub mod bytecode;
/// Valeur scalaire du pool de constantes.
pub mod value;

pub use array::{grow_capacity, DynArray, MIN_CAPACITY};
pub use bytecode::{disasm, Chunk, LineRuns};
pub use value::Value;

use thiserror::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/* ─────────────────────────── Résultat commun ─────────────────────────── */

/// Alias résultat commun au core.
pub type CoreResult<T> = core::result::Result<T, CoreError>;

/* ─────────────────────────── Spans / Positions ─────────────────────────── */

/// Position (offset byte) depuis le début de la source.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Pos(pub u32);

impl Pos {
    /// Position nulle.
    pub const ZERO: Self = Self(0);

    /// Construit une position depuis un offset `usize` (saturé à `u32::MAX`).
    pub fn from_usize(off: usize) -> Self { Self(u32::try_from(off).unwrap_or(u32::MAX)) }

    /// Offset sous forme d'index.
    pub const fn index(self) -> usize { self.0 as usize }
}

/// Plage (demi-ouverte) `[start, end)` dans une source.
///
/// Offsets sur 32 bits : au-delà de 4 Gio ils saturent à `u32::MAX` et
/// `range()` ne retrouve plus le texte d'origine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Span {
    /// Début inclus.
    pub start: Pos,
    /// Fin exclue.
    pub end: Pos,
}

impl Span {
    /// Crée un span.
    pub const fn new(start: Pos, end: Pos) -> Self { Self { start, end } }
    /// Span couvrant les offsets `start..end`.
    pub fn from_range(start: usize, end: usize) -> Self { Self::new(Pos::from_usize(start), Pos::from_usize(end)) }
    /// Longueur en bytes.
    pub const fn len(&self) -> u32 { self.end.0.saturating_sub(self.start.0) }
    /// Vrai si le span est vide.
    pub const fn is_empty(&self) -> bool { self.start.0 >= self.end.0 }
    /// Plage d'indices utilisable pour re-slicer la source.
    pub const fn range(&self) -> core::ops::Range<usize> { self.start.index()..self.end.index() }
}

/* ─────────────────────────── Erreurs ─────────────────────────── */

/// Erreurs de bas niveau communes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// L'allocateur a refusé la croissance d'un tableau.
    #[error("allocation failed while growing to {requested} slots")]
    Alloc {
        /// Capacité (en éléments) demandée.
        requested: usize,
    },
    /// Le code et la table des lignes ne sont plus en phase.
    #[error("line table mismatch: {code} instruction bytes but {lines} line entries")]
    LineTableMismatch {
        /// Nombre d'octets d'instructions.
        code: usize,
        /// Nombre d'entrées de lignes.
        lines: usize,
    },
}

/* ─────────────────────────── Prélude (reexports utiles) ─────────────────────────── */

/// Prélude pratique pour importer les types clés du crate.
pub mod prelude {
    /// Réexports utiles pour une importation rapide.
    pub use super::{
        grow_capacity, Chunk, CoreError, CoreResult, DynArray, Pos, Span, Value, MIN_CAPACITY,
    };
}

/* ─────────────────────────── Tests ─────────────────────────── */
