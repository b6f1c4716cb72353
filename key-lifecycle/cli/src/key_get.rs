use crate::{JsonOutputArgs, KeyStoreArgs, Result};

/// Print a single key record as JSON: the one with the given id, or if no id is given, the most
/// recently created one.  It is an error if there is no such key.
#[derive(clap::Args)]
pub struct KeyGet {
    #[command(flatten)]
    pub key_store_args: KeyStoreArgs,
    /// Id of the key to print.  If omitted, the most recently created key is printed.
    #[arg(short, long, value_name = "ID")]
    pub key_id: Option<i64>,
    /// Include the private key in the output.
    #[arg(long)]
    pub include_private_key: bool,
    #[command(flatten)]
    pub json_output_args: JsonOutputArgs,
}

impl KeyGet {
    pub async fn handle(self) -> Result<()> {
        let key_store = self.key_store_args.open_key_store().await?;
        let key_record = if let Some(key_id) = self.key_id {
            key_store
                .get_by_id(key_id)
                .await?
                .ok_or_else(|| anyhow::anyhow!("No key with id {}", key_id))?
        } else {
            key_store
                .get_latest()
                .await?
                .ok_or_else(|| anyhow::anyhow!("There are no keys"))?
        };
        self.json_output_args.print_json(&crate::key_record_as_json(
            &key_record,
            self.include_private_key,
        )?)
    }
}
