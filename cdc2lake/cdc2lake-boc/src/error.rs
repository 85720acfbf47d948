/// Errors raised while reading or navigating a bag of cells.
#[derive(Debug, thiserror::Error)]
pub enum BocError {
    #[error("unexpected end of input while reading {context}")]
    UnexpectedEof { context: &'static str },

    #[error("unknown bag-of-cells magic 0x{0:08x}")]
    UnknownMagic(u32),

    #[error("invalid bag-of-cells header: {0}")]
    InvalidHeader(String),

    #[error("bags with {0} absent cells are not supported")]
    UnsupportedAbsentCells(usize),

    #[error("invalid cell #{index}: {detail}")]
    InvalidCell { index: usize, detail: String },

    #[error("invalid cell layout: {0}")]
    CellLayout(String),

    #[error("cell #{cell} references cell #{reference}, which is not a later cell of the bag")]
    RefOutOfRange { cell: usize, reference: usize },

    #[error("{0} trailing bytes after the bag of cells")]
    TrailingBytes(usize),

    #[error("bag of cells has no root cell")]
    NoRoot,

    #[error("cell #{index} is exotic and has no readable data")]
    ExoticCell { index: usize },

    #[error("snake string is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),
}
