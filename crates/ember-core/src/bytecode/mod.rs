//! Bytecode storage: the chunk container and its textual listing.
//!
//! The compiler appends bytes (with their source line) and registers
//! constants; the interpreter and the listing only read.

/// Chunk: instruction bytes, aligned line table and constant pool.
pub mod chunk;
/// Human readable listing of a chunk.
pub mod disasm;

pub use chunk::{Chunk, LineRuns};
