use crate::error::BocError;

/// Maximum number of data bits in an ordinary cell.
pub const MAX_CELL_BITS: usize = 1023;
/// Maximum number of references held by a cell.
pub const MAX_CELL_REFS: usize = 4;

/// A single cell: up to 1023 data bits and up to four references.
///
/// References are indices into the owning [`Boc`]'s cell list and always
/// point to a later cell, so a bag is acyclic by construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    data: Vec<u8>,
    bit_len: usize,
    refs: Vec<usize>,
    exotic: bool,
    level_mask: u8,
}

impl Cell {
    /// Build an ordinary cell. `data` must hold exactly `ceil(bit_len / 8)`
    /// bytes; bits past `bit_len` are cleared.
    pub fn new(mut data: Vec<u8>, bit_len: usize, refs: Vec<usize>) -> Result<Self, BocError> {
        if bit_len > MAX_CELL_BITS {
            return Err(invalid(format!("{bit_len} data bits exceed {MAX_CELL_BITS}")));
        }
        if data.len() != bit_len.div_ceil(8) {
            return Err(invalid(format!(
                "{} data bytes do not hold exactly {bit_len} bits",
                data.len()
            )));
        }
        if refs.len() > MAX_CELL_REFS {
            return Err(invalid(format!("{} references exceed {MAX_CELL_REFS}", refs.len())));
        }
        if bit_len % 8 != 0
            && let Some(last) = data.last_mut()
        {
            *last &= 0xff << (8 - bit_len % 8);
        }
        Ok(Self {
            data,
            bit_len,
            refs,
            exotic: false,
            level_mask: 0,
        })
    }

    /// Ordinary cell whose data is `bytes`, byte aligned.
    pub fn from_bytes(bytes: &[u8], refs: Vec<usize>) -> Result<Self, BocError> {
        Self::new(bytes.to_vec(), bytes.len() * 8, refs)
    }

    pub(crate) fn from_parts(
        data: Vec<u8>,
        bit_len: usize,
        refs: Vec<usize>,
        exotic: bool,
        level_mask: u8,
    ) -> Self {
        Self {
            data,
            bit_len,
            refs,
            exotic,
            level_mask,
        }
    }

    /// Data bytes; the last one may be partially used.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn bit_len(&self) -> usize {
        self.bit_len
    }

    pub fn refs(&self) -> &[usize] {
        &self.refs
    }

    pub fn is_exotic(&self) -> bool {
        self.exotic
    }

    pub fn level_mask(&self) -> u8 {
        self.level_mask
    }
}

fn invalid(detail: String) -> BocError {
    BocError::CellLayout(detail)
}

/// A deserialized bag of cells: a topologically ordered cell list and the
/// indices of its root cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Boc {
    pub(crate) cells: Vec<Cell>,
    pub(crate) roots: Vec<usize>,
}

impl Boc {
    /// Assemble a bag, checking that every reference points forward and
    /// every root exists.
    pub fn new(cells: Vec<Cell>, roots: Vec<usize>) -> Result<Self, BocError> {
        for (index, cell) in cells.iter().enumerate() {
            for &reference in cell.refs() {
                if reference <= index || reference >= cells.len() {
                    return Err(BocError::RefOutOfRange {
                        cell: index,
                        reference,
                    });
                }
            }
        }
        if let Some(&root) = roots.iter().find(|&&root| root >= cells.len()) {
            return Err(BocError::InvalidHeader(format!(
                "root index {root} out of {} cells",
                cells.len()
            )));
        }
        Ok(Self { cells, roots })
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn roots(&self) -> &[usize] {
        &self.roots
    }

    /// The first root cell.
    pub fn root(&self) -> Result<CellRef<'_>, BocError> {
        let index = *self.roots.first().ok_or(BocError::NoRoot)?;
        Ok(CellRef { boc: self, index })
    }

    pub fn cell(&self, index: usize) -> Option<CellRef<'_>> {
        (index < self.cells.len()).then_some(CellRef { boc: self, index })
    }
}

/// A cell borrowed together with its bag, so references can be followed.
#[derive(Debug, Clone, Copy)]
pub struct CellRef<'a> {
    boc: &'a Boc,
    index: usize,
}

impl<'a> CellRef<'a> {
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn cell(&self) -> &'a Cell {
        &self.boc.cells[self.index]
    }

    /// The `n`-th reference of this cell, if present.
    pub fn reference(&self, n: usize) -> Option<CellRef<'a>> {
        let index = *self.cell().refs().get(n)?;
        Some(CellRef {
            boc: self.boc,
            index,
        })
    }

    pub fn references(&self) -> impl Iterator<Item = CellRef<'a>> + use<'a> {
        let boc = self.boc;
        self.cell()
            .refs()
            .iter()
            .map(move |&index| CellRef { boc, index })
    }
}
