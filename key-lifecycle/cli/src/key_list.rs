use crate::{JsonOutputArgs, KeyStoreArgs, Result};
use key_lifecycle_core::KeyStatus;
use key_lifecycle_store::KeyRecordFilter;

/// List the stored keys in the order they were created, optionally only those having a given status.
/// The output is a JSON array of key records.
#[derive(clap::Args)]
pub struct KeyList {
    #[command(flatten)]
    pub key_store_args: KeyStoreArgs,
    /// Only list keys having this status.
    #[arg(short, long, value_enum)]
    pub status: Option<KeyStatus>,
    /// Include the private key of each key record in the output.
    #[arg(long)]
    pub include_private_keys: bool,
    #[command(flatten)]
    pub json_output_args: JsonOutputArgs,
}

impl KeyList {
    pub async fn handle(self) -> Result<()> {
        let key_store = self.key_store_args.open_key_store().await?;
        let key_record_v = key_store
            .get_all_with_filter(&KeyRecordFilter {
                status_o: self.status,
            })
            .await?;
        let value_v = key_record_v
            .iter()
            .map(|key_record| crate::key_record_as_json(key_record, self.include_private_keys))
            .collect::<Result<Vec<_>>>()?;
        self.json_output_args.print_json(&serde_json::Value::Array(value_v))
    }
}
