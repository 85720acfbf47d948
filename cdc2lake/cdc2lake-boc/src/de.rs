//! Bag-of-cells deserialization.

use bytes::Buf;

use crate::{
    cell::{Boc, Cell, MAX_CELL_REFS},
    error::BocError,
};

/// Magic of the generic serialization format.
pub const BOC_GENERIC_MAGIC: u32 = 0xb5ee_9c72;
/// Legacy single-root format with an index.
pub const BOC_INDEXED_MAGIC: u32 = 0x68ff_65f3;
/// Legacy single-root format with an index and a CRC32-C trailer.
pub const BOC_INDEXED_CRC32_MAGIC: u32 = 0xacc3_a728;

const HASH_BYTES: usize = 32;
const DEPTH_BYTES: usize = 2;

struct Header {
    ref_size: usize,
    cell_count: usize,
    roots: Vec<usize>,
    cells_size: usize,
    has_index: bool,
    has_crc32c: bool,
    offset_size: usize,
}

struct Reader<'a> {
    buf: &'a [u8],
}

impl<'a> Reader<'a> {
    fn need(&self, n: usize, context: &'static str) -> Result<(), BocError> {
        if self.buf.remaining() < n {
            return Err(BocError::UnexpectedEof { context });
        }
        Ok(())
    }

    fn u8(&mut self, context: &'static str) -> Result<u8, BocError> {
        self.need(1, context)?;
        Ok(self.buf.get_u8())
    }

    fn u32(&mut self, context: &'static str) -> Result<u32, BocError> {
        self.need(4, context)?;
        Ok(self.buf.get_u32())
    }

    /// Big-endian unsigned integer of `n` bytes (`1..=8`).
    fn uint(&mut self, n: usize, context: &'static str) -> Result<usize, BocError> {
        self.need(n, context)?;
        let value = self.buf.get_uint(n);
        usize::try_from(value)
            .map_err(|_| BocError::InvalidHeader(format!("{context} {value} does not fit in memory")))
    }

    fn take(&mut self, n: usize, context: &'static str) -> Result<&'a [u8], BocError> {
        self.need(n, context)?;
        let (head, tail) = self.buf.split_at(n);
        self.buf = tail;
        Ok(head)
    }

    fn skip(&mut self, n: usize, context: &'static str) -> Result<(), BocError> {
        self.need(n, context)?;
        self.buf.advance(n);
        Ok(())
    }
}

impl Boc {
    /// Deserialize a bag of cells.
    ///
    /// The generic format and both legacy indexed formats are accepted. The
    /// index and the CRC32-C trailer are skipped without verification.
    pub fn parse(data: &[u8]) -> Result<Self, BocError> {
        let mut reader = Reader { buf: data };
        let header = read_header(&mut reader)?;

        if header.has_index {
            let index_size = header
                .cell_count
                .checked_mul(header.offset_size)
                .ok_or_else(|| BocError::InvalidHeader("index size overflows".to_string()))?;
            reader.skip(index_size, "cell index")?;
        }

        let mut cells_reader = Reader {
            buf: reader.take(header.cells_size, "cell data")?,
        };
        let mut cells = Vec::with_capacity(header.cell_count.min(cells_reader.buf.len() / 2));
        for index in 0..header.cell_count {
            cells.push(read_cell(&mut cells_reader, index, &header)?);
        }
        if cells_reader.buf.has_remaining() {
            return Err(BocError::InvalidHeader(format!(
                "{} unused bytes in cell data",
                cells_reader.buf.remaining()
            )));
        }

        if header.has_crc32c {
            reader.skip(4, "crc32c")?;
        }
        if reader.buf.has_remaining() {
            return Err(BocError::TrailingBytes(reader.buf.remaining()));
        }

        Boc::new(cells, header.roots)
    }
}

fn read_header(reader: &mut Reader<'_>) -> Result<Header, BocError> {
    let magic = reader.u32("magic")?;
    let flags = reader.u8("header flags")?;
    let (has_index, has_crc32c, ref_size) = match magic {
        BOC_GENERIC_MAGIC => (flags & 0x80 != 0, flags & 0x40 != 0, usize::from(flags & 0x07)),
        BOC_INDEXED_MAGIC => (true, false, usize::from(flags)),
        BOC_INDEXED_CRC32_MAGIC => (true, true, usize::from(flags)),
        other => return Err(BocError::UnknownMagic(other)),
    };
    if !(1..=4).contains(&ref_size) {
        return Err(BocError::InvalidHeader(format!("reference size {ref_size} not in 1..=4")));
    }
    let offset_size = usize::from(reader.u8("offset size")?);
    if !(1..=8).contains(&offset_size) {
        return Err(BocError::InvalidHeader(format!(
            "offset size {offset_size} not in 1..=8"
        )));
    }

    let cell_count = reader.uint(ref_size, "cell count")?;
    let root_count = reader.uint(ref_size, "root count")?;
    let absent = reader.uint(ref_size, "absent count")?;
    let cells_size = reader.uint(offset_size, "total cells size")?;

    if absent != 0 {
        return Err(BocError::UnsupportedAbsentCells(absent));
    }
    if root_count > cell_count {
        return Err(BocError::InvalidHeader(format!(
            "{root_count} roots but only {cell_count} cells"
        )));
    }

    let roots = if magic == BOC_GENERIC_MAGIC {
        (0..root_count)
            .map(|_| reader.uint(ref_size, "root list"))
            .collect::<Result<Vec<_>, _>>()?
    } else {
        if root_count != 1 {
            return Err(BocError::InvalidHeader(format!(
                "legacy format requires exactly one root, found {root_count}"
            )));
        }
        vec![0]
    };

    Ok(Header {
        ref_size,
        cell_count,
        roots,
        cells_size,
        has_index,
        has_crc32c,
        offset_size,
    })
}

fn read_cell(reader: &mut Reader<'_>, index: usize, header: &Header) -> Result<Cell, BocError> {
    let d1 = reader.u8("cell descriptor")?;
    let d2 = reader.u8("cell descriptor")?;

    let ref_count = usize::from(d1 & 0x07);
    let exotic = d1 & 0x08 != 0;
    let with_hashes = d1 & 0x10 != 0;
    let level_mask = d1 >> 5;
    if ref_count > MAX_CELL_REFS {
        return Err(BocError::InvalidCell {
            index,
            detail: format!("{ref_count} references"),
        });
    }

    if with_hashes {
        let hash_count = level_mask.count_ones() as usize + 1;
        reader.skip(hash_count * (HASH_BYTES + DEPTH_BYTES), "cell hashes")?;
    }

    let data_len = usize::from(d2).div_ceil(2);
    let aligned = d2 % 2 == 0;
    let mut data = reader.take(data_len, "cell data")?.to_vec();
    let bit_len = if aligned {
        data_len * 8
    } else {
        strip_completion_tag(&mut data).ok_or_else(|| BocError::InvalidCell {
            index,
            detail: "missing completion tag".to_string(),
        })?
    };

    let refs = (0..ref_count)
        .map(|_| reader.uint(header.ref_size, "cell reference"))
        .collect::<Result<Vec<_>, _>>()?;
    if let Some(&reference) = refs
        .iter()
        .find(|&&reference| reference <= index || reference >= header.cell_count)
    {
        return Err(BocError::RefOutOfRange {
            cell: index,
            reference,
        });
    }

    Ok(Cell::from_parts(data, bit_len, refs, exotic, level_mask))
}

/// Remove the `1` bit marking the end of data (and the zeros after it) from
/// the last byte, returning the number of data bits left.
fn strip_completion_tag(data: &mut Vec<u8>) -> Option<usize> {
    let last = data.last_mut()?;
    if *last == 0 {
        return None;
    }
    let padding = last.trailing_zeros() as usize + 1;
    *last &= !(1u8 << (padding - 1));
    let bit_len = data.len() * 8 - padding;
    data.truncate(bit_len.div_ceil(8));
    Some(bit_len)
}
