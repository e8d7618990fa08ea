//! Textual listing of a chunk.
//!
//! The core defines no opcode set, so the listing is byte oriented: offset,
//! source line (`|` when unchanged from the previous byte) and the raw byte.

use core::fmt::Write;

use crate::bytecode::chunk::Chunk;

/// Produce a multi-line listing with a header and the constant pool.
///
/// Bytes are walked run by run (see [`Chunk::line_runs`]): the first byte of
/// a run shows its line, the others show `|`.
#[must_use]
pub fn disassemble(chunk: &Chunk, name: &str) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "== {name} ==");
    if let Err(e) = chunk.validate() {
        let _ = writeln!(out, ";; {e}");
    }

    for (run, line) in chunk.line_runs() {
        let first = run.start;
        for offset in run {
            let Some(&byte) = chunk.code().get(offset) else { break };
            write_byte(&mut out, offset, byte, (offset == first).then_some(line));
        }
    }

    if !chunk.constants().is_empty() {
        let _ = writeln!(out, ";; constants");
        for (idx, value) in chunk.constants().iter().enumerate() {
            let _ = writeln!(out, "[{idx:04}] {value}");
        }
    }

    out
}

/// Append the listing line for the byte at `offset`; return the next offset.
pub fn disassemble_instruction(chunk: &Chunk, offset: usize, out: &mut String) -> usize {
    let Some(&byte) = chunk.code().get(offset) else {
        return offset;
    };
    let line = chunk.line_at(offset).unwrap_or_default();
    let same_line = offset > 0 && chunk.line_at(offset - 1) == Some(line);
    write_byte(out, offset, byte, (!same_line).then_some(line));
    offset + 1
}

fn write_byte(out: &mut String, offset: usize, byte: u8, line: Option<u32>) {
    let _ = match line {
        Some(line) => writeln!(out, "{offset:04} {line:4} 0x{byte:02X}"),
        None => writeln!(out, "{offset:04}    | 0x{byte:02X}"),
    };
}
