//! Bag-of-cells serialization in the generic format, without index or CRC.

use bytes::BufMut;

use crate::{
    cell::{Boc, Cell},
    de::BOC_GENERIC_MAGIC,
};

impl Boc {
    pub fn to_bytes(&self) -> Vec<u8> {
        let ref_size = min_bytes(self.cells.len() as u64);
        let cells_size: usize = self.cells.iter().map(|cell| serialized_len(cell, ref_size)).sum();
        let offset_size = min_bytes(cells_size as u64);

        let mut out = Vec::with_capacity(6 + 3 * ref_size + offset_size + cells_size);
        out.put_u32(BOC_GENERIC_MAGIC);
        out.put_u8(ref_size as u8);
        out.put_u8(offset_size as u8);
        out.put_uint(self.cells.len() as u64, ref_size);
        out.put_uint(self.roots.len() as u64, ref_size);
        out.put_uint(0, ref_size);
        out.put_uint(cells_size as u64, offset_size);
        for &root in &self.roots {
            out.put_uint(root as u64, ref_size);
        }

        for cell in &self.cells {
            write_cell(&mut out, cell, ref_size);
        }
        out
    }
}

fn write_cell(out: &mut Vec<u8>, cell: &Cell, ref_size: usize) {
    let (d1, d2) = descriptors(cell);
    out.put_u8(d1);
    out.put_u8(d2);

    let partial_bits = cell.bit_len() % 8;
    match cell.data().split_last() {
        Some((last, head)) if partial_bits != 0 => {
            out.put_slice(head);
            out.put_u8(last | (0x80 >> partial_bits));
        }
        _ => out.put_slice(cell.data()),
    }

    for &reference in cell.refs() {
        out.put_uint(reference as u64, ref_size);
    }
}

fn descriptors(cell: &Cell) -> (u8, u8) {
    let d1 = cell.refs().len() as u8 + 8 * u8::from(cell.is_exotic()) + 32 * cell.level_mask();
    let d2 = (cell.bit_len() / 8 + cell.bit_len().div_ceil(8)) as u8;
    (d1, d2)
}

fn serialized_len(cell: &Cell, ref_size: usize) -> usize {
    2 + cell.bit_len().div_ceil(8) + cell.refs().len() * ref_size
}

/// Smallest byte width (at least one) able to hold `value`.
fn min_bytes(value: u64) -> usize {
    let bits = 64 - value.leading_zeros() as usize;
    bits.div_ceil(8).max(1)
}
