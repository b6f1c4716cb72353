use crate::{JsonOutputArgs, KeyStoreArgs, Result};
use key_lifecycle_core::KeyStatus;

/// Set the lifecycle status of the key with the given id.  Any status may be set from any other.
/// Only keys with status Active may be used for signing.  The output is the updated key record.
#[derive(clap::Args)]
pub struct KeySetStatus {
    #[command(flatten)]
    pub key_store_args: KeyStoreArgs,
    /// Id of the key whose status to set.
    #[arg(short, long, value_name = "ID")]
    pub key_id: i64,
    /// The new status.
    #[arg(short, long, value_enum)]
    pub status: KeyStatus,
    #[command(flatten)]
    pub json_output_args: JsonOutputArgs,
}

impl KeySetStatus {
    pub async fn handle(self) -> Result<()> {
        let key_store = self.key_store_args.open_key_store().await?;
        key_store.set_status(self.key_id, self.status).await?;
        let key_record = key_store
            .get_by_id(self.key_id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("No key with id {}", self.key_id))?;
        self.json_output_args
            .print_json(&crate::key_record_as_json(&key_record, false)?)
    }
}
