//! Bag-of-cells (BoC) payloads as stored by TON indexers.
//!
//! A BoC serializes a DAG of cells, each holding up to 1023 data bits and up
//! to four references. Message bodies carrying a text comment start with a
//! zero 32-bit opcode followed by the UTF-8 text, continued in the first
//! reference of each cell ("snake" encoding).
//!
//! ```
//! use cdc2lake_boc::{encode_text_comment, extract_comment};
//!
//! let body = encode_text_comment("hello");
//! assert_eq!(extract_comment(&body).as_deref(), Some("hello"));
//! ```

mod cell;
mod de;
mod error;
mod ser;
mod snake;

pub use cell::{Boc, Cell, CellRef, MAX_CELL_BITS, MAX_CELL_REFS};
pub use de::{BOC_GENERIC_MAGIC, BOC_INDEXED_CRC32_MAGIC, BOC_INDEXED_MAGIC};
pub use error::BocError;
pub use snake::{
    TEXT_COMMENT_OPCODE, encode_text_comment, extract_comment, read_snake_bytes, read_snake_string,
};
