//! Snake-encoded strings: byte data continued through the first reference of
//! each cell.

use tracing::debug;

use crate::{
    cell::{Boc, Cell, CellRef},
    error::BocError,
};

/// Operation code that prefixes a plain text comment.
pub const TEXT_COMMENT_OPCODE: u32 = 0;

const OPCODE_BYTES: usize = 4;
const CELL_BYTES: usize = 127;

/// Concatenate the whole bytes of `cell` and of every cell reached by
/// following first references. Trailing bits that do not fill a byte are
/// ignored.
pub fn read_snake_bytes(cell: CellRef<'_>) -> Result<Vec<u8>, BocError> {
    let mut out = Vec::new();
    let mut current = Some(cell);
    while let Some(cell_ref) = current {
        let cell = cell_ref.cell();
        if cell.is_exotic() {
            return Err(BocError::ExoticCell {
                index: cell_ref.index(),
            });
        }
        out.extend_from_slice(&cell.data()[..cell.bit_len() / 8]);
        current = cell_ref.reference(0);
    }
    Ok(out)
}

/// Read a snake string, dropping a leading 32-bit text comment opcode.
pub fn read_snake_string(cell: CellRef<'_>) -> Result<String, BocError> {
    let mut bytes = read_snake_bytes(cell)?;
    let root = cell.cell();
    if root.bit_len() >= 32 && root.data()[..OPCODE_BYTES] == TEXT_COMMENT_OPCODE.to_be_bytes() {
        bytes.drain(..OPCODE_BYTES);
    }
    Ok(String::from_utf8(bytes)?)
}

/// Extract the text comment carried by a serialized message body.
///
/// Returns `None` when the payload is not a bag of cells or does not hold a
/// UTF-8 snake string. NUL characters are removed from the result.
pub fn extract_comment(boc: &[u8]) -> Option<String> {
    let comment = Boc::parse(boc)
        .and_then(|boc| boc.root().and_then(read_snake_string));
    match comment {
        Ok(text) => Some(text.replace('\0', "")),
        Err(error) => {
            debug!(%error, len = boc.len(), "payload carries no text comment");
            None
        }
    }
}

/// Serialize `text` as a text comment body: the zero opcode followed by the
/// text, snaked over as many cells as needed.
pub fn encode_text_comment(text: &str) -> Vec<u8> {
    let mut payload = Vec::with_capacity(OPCODE_BYTES + text.len());
    payload.extend_from_slice(&TEXT_COMMENT_OPCODE.to_be_bytes());
    payload.extend_from_slice(text.as_bytes());
    snake_boc(&payload).to_bytes()
}

fn snake_boc(payload: &[u8]) -> Boc {
    let chunks: Vec<&[u8]> = payload.chunks(CELL_BYTES).collect();
    let last = chunks.len().saturating_sub(1);
    let cells = chunks
        .into_iter()
        .enumerate()
        .map(|(index, chunk)| {
            let refs = if index < last { vec![index + 1] } else { Vec::new() };
            Cell::from_parts(chunk.to_vec(), chunk.len() * 8, refs, false, 0)
        })
        .collect();
    Boc {
        cells,
        roots: vec![0],
    }
}
