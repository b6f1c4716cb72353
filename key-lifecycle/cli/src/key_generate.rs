use crate::{JsonOutputArgs, KeyStoreArgs, Result};

/// Generate a new Ed25519 key pair and store it with status Active.  The output is the new key record
/// as JSON, without its private key.
#[derive(clap::Args)]
pub struct KeyGenerate {
    #[command(flatten)]
    pub key_store_args: KeyStoreArgs,
    #[command(flatten)]
    pub json_output_args: JsonOutputArgs,
}

impl KeyGenerate {
    pub async fn handle(self) -> Result<()> {
        let key_store = self.key_store_args.open_key_store().await?;
        let key_id = key_store.generate_and_store().await?;
        let key_record = key_store.get_by_id(key_id).await?.ok_or_else(|| {
            anyhow::anyhow!("key record with id {} vanished right after being stored", key_id)
        })?;
        self.json_output_args
            .print_json(&crate::key_record_as_json(&key_record, false)?)
    }
}
