use cdc2lake_boc::{
    Boc, BocError, Cell, encode_text_comment, extract_comment, read_snake_bytes, read_snake_string,
};

/// Text comment "hello" in the generic format with one-byte sizes.
const HELLO: [u8; 20] = [
    0xb5, 0xee, 0x9c, 0x72, // magic
    0x01, // flags: no index, no crc, 1-byte references
    0x01, // 1-byte offsets
    0x01, 0x01, 0x00, // cells, roots, absent
    0x0b, // total cells size
    0x00, // root list
    0x00, 0x12, // descriptors: no refs, 9 whole bytes
    0x00, 0x00, 0x00, 0x00, b'h', b'e', b'l',
];

fn hello() -> Vec<u8> {
    let mut bytes = HELLO.to_vec();
    bytes.extend_from_slice(b"lo");
    bytes
}

#[test]
fn parses_single_cell_comment() {
    let boc = Boc::parse(&hello()).unwrap();
    assert_eq!(boc.cells().len(), 1);
    assert_eq!(boc.roots(), [0]);

    let root = boc.root().unwrap();
    assert_eq!(root.cell().bit_len(), 72);
    assert!(root.reference(0).is_none());
    assert_eq!(read_snake_string(root).unwrap(), "hello");
}

#[test]
fn encoder_matches_reference_layout() {
    assert_eq!(encode_text_comment("hello"), hello());
}

#[test]
fn long_comment_spans_several_cells() {
    let text = "the quick brown fox ".repeat(20);
    let bytes = encode_text_comment(&text);
    let boc = Boc::parse(&bytes).unwrap();

    assert_eq!(boc.cells().len(), 4);
    let root = boc.root().unwrap();
    assert_eq!(root.cell().data().len(), 127);
    assert_eq!(root.references().count(), 1);
    assert_eq!(extract_comment(&bytes).unwrap(), text);
}

#[test]
fn multibyte_characters_split_across_cells_survive() {
    let text = "ä".repeat(100);
    assert_eq!(extract_comment(&encode_text_comment(&text)).unwrap(), text);
}

#[test]
fn empty_comment() {
    assert_eq!(extract_comment(&encode_text_comment("")).as_deref(), Some(""));
}

#[test]
fn nul_characters_are_removed() {
    let bytes = encode_text_comment("a\0b\0");
    let boc = Boc::parse(&bytes).unwrap();
    assert_eq!(read_snake_string(boc.root().unwrap()).unwrap(), "a\0b\0");
    assert_eq!(extract_comment(&bytes).as_deref(), Some("ab"));
}

#[test]
fn payload_without_opcode_reads_whole_data() {
    let cell = Cell::from_bytes(b"plain", Vec::new()).unwrap();
    let bytes = Boc::new(vec![cell], vec![0]).unwrap().to_bytes();
    assert_eq!(extract_comment(&bytes).as_deref(), Some("plain"));
}

#[test]
fn partial_bits_are_ignored_by_snake_reader() {
    let cell = Cell::new(vec![0xab, 0xcf], 12, Vec::new()).unwrap();
    assert_eq!(cell.data(), [0xabu8, 0xc0]);

    let bytes = Boc::new(vec![cell.clone()], vec![0]).unwrap().to_bytes();
    // 12 bits: one whole byte plus a completion-tagged half byte.
    assert_eq!(&bytes[11..], [0x00u8, 0x03, 0xab, 0xc8]);

    let boc = Boc::parse(&bytes).unwrap();
    assert_eq!(boc.cells()[0], cell);
    assert_eq!(read_snake_bytes(boc.root().unwrap()).unwrap(), vec![0xabu8]);
}

#[test]
fn completion_tag_in_top_bit_drops_last_byte() {
    let mut bytes = hello();
    // Same cell, but declared as 8 whole bytes plus one tagged byte.
    bytes[12] = 0x11;
    let last = bytes.len() - 1;
    bytes[last] = 0x80;
    let boc = Boc::parse(&bytes).unwrap();
    let root = boc.root().unwrap();
    assert_eq!(root.cell().bit_len(), 64);
    assert_eq!(read_snake_string(root).unwrap(), "hell");
}

#[test]
fn legacy_indexed_format() {
    let mut bytes = vec![0x68, 0xff, 0x65, 0xf3, 0x01, 0x01, 0x01, 0x01, 0x00, 0x0b];
    bytes.push(0x0b); // index: end offset of the only cell
    bytes.extend_from_slice(&hello()[11..]);
    assert_eq!(extract_comment(&bytes).as_deref(), Some("hello"));
}

#[test]
fn crc_trailer_is_skipped() {
    let mut bytes = hello();
    bytes[4] |= 0x40;
    bytes.extend_from_slice(&[0xde, 0xad, 0xbe, 0xef]);
    assert_eq!(extract_comment(&bytes).as_deref(), Some("hello"));
}

#[test]
fn truncated_input() {
    let bytes = hello();
    assert!(matches!(
        Boc::parse(&bytes[..3]),
        Err(BocError::UnexpectedEof { context: "magic" })
    ));
    assert!(matches!(
        Boc::parse(&bytes[..bytes.len() - 1]),
        Err(BocError::UnexpectedEof { .. })
    ));
    assert_eq!(extract_comment(&bytes[..15]), None);
}

#[test]
fn unknown_magic() {
    let mut bytes = hello();
    bytes[0] = 0x00;
    assert!(matches!(Boc::parse(&bytes), Err(BocError::UnknownMagic(_))));
    assert_eq!(extract_comment(b"not a boc at all"), None);
}

#[test]
fn trailing_bytes_are_rejected() {
    let mut bytes = hello();
    bytes.push(0x00);
    assert!(matches!(Boc::parse(&bytes), Err(BocError::TrailingBytes(1))));
}

#[test]
fn absent_cells_are_unsupported() {
    let mut bytes = hello();
    bytes[8] = 0x01;
    assert!(matches!(
        Boc::parse(&bytes),
        Err(BocError::UnsupportedAbsentCells(1))
    ));
}

#[test]
fn backward_reference_is_rejected() {
    // Two cells where the second references the first.
    let bytes = [
        0xb5, 0xee, 0x9c, 0x72, 0x01, 0x01, 0x02, 0x01, 0x00, 0x05, 0x00, // header
        0x00, 0x00, // cell 0: empty
        0x01, 0x00, 0x00, // cell 1: one ref to cell 0
    ];
    assert!(matches!(
        Boc::parse(&bytes),
        Err(BocError::RefOutOfRange { cell: 1, reference: 0 })
    ));
}

#[test]
fn missing_completion_tag_is_invalid() {
    let mut bytes = hello();
    bytes[12] = 0x11;
    let last = bytes.len() - 1;
    bytes[last] = 0x00;
    assert!(matches!(
        Boc::parse(&bytes),
        Err(BocError::InvalidCell { index: 0, .. })
    ));
}

#[test]
fn invalid_utf8_is_reported() {
    let cell = Cell::from_bytes(&[0, 0, 0, 0, 0xff, 0xfe], Vec::new()).unwrap();
    let boc = Boc::new(vec![cell], vec![0]).unwrap();
    assert!(matches!(
        read_snake_string(boc.root().unwrap()),
        Err(BocError::InvalidUtf8(_))
    ));
    assert_eq!(extract_comment(&boc.to_bytes()), None);
}

#[test]
fn bag_without_root() {
    let boc = Boc::new(Vec::new(), Vec::new()).unwrap();
    assert!(matches!(boc.root(), Err(BocError::NoRoot)));
}

#[test]
fn cell_layout_is_validated() {
    assert!(matches!(
        Cell::new(vec![0; 3], 12, Vec::new()),
        Err(BocError::CellLayout(_))
    ));
    assert!(matches!(
        Cell::new(vec![0; 128], 1024, Vec::new()),
        Err(BocError::CellLayout(_))
    ));
    assert!(matches!(
        Cell::from_bytes(b"", vec![1, 2, 3, 4, 5]),
        Err(BocError::CellLayout(_))
    ));
}
