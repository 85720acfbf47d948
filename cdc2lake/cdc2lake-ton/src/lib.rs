//! Record-type converters for tables of a TON blockchain indexer.
//!
//! Each converter embeds its Avro schema; `from_schema_dir` constructors read
//! the same file names from a directory instead.

mod jetton;
mod messages;
mod payload;

use std::{path::Path, sync::Arc};

use cdc2lake_avro::{SchemaLoadError, SchemaSource};
use cdc2lake_core::RecordConverter;
pub use jetton::{AMOUNT, CUSTOM_PAYLOAD, FORWARD_PAYLOAD, FORWARD_TON_AMOUNT, JettonTransferConverter};
pub use messages::{BODY_BOC, INIT_STATE_BOC, MessageConverter, MessageWithDataConverter};

/// Transaction time (Unix seconds) used for partitioning.
pub const TX_NOW: &str = "tx_now";
/// Derived text comment field.
pub const COMMENT: &str = "comment";

fn schema_source(file: &str, embedded: &str, dir: Option<&Path>) -> SchemaSource {
    match dir {
        Some(dir) => SchemaSource::path(dir.join(file)),
        None => SchemaSource::inline(file, embedded),
    }
}

/// Every converter of this crate, loading schemas from `schema_dir` when
/// given and from the embedded copies otherwise.
pub fn all_converters(
    schema_dir: Option<&Path>,
) -> Result<Vec<Arc<dyn RecordConverter>>, SchemaLoadError> {
    let converters: Vec<Arc<dyn RecordConverter>> = match schema_dir {
        Some(dir) => vec![
            Arc::new(MessageConverter::from_schema_dir(dir)?),
            Arc::new(MessageWithDataConverter::from_schema_dir(dir)?),
            Arc::new(JettonTransferConverter::from_schema_dir(dir)?),
        ],
        None => vec![
            Arc::new(MessageConverter::new()?),
            Arc::new(MessageWithDataConverter::new()?),
            Arc::new(JettonTransferConverter::new()?),
        ],
    };
    Ok(converters)
}
