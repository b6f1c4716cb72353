use crate::{JsonOutputArgs, KeyStoreArgs, Result};

/// Irreversibly delete the key with the given id.  The output is the id of the deleted key.
#[derive(clap::Args)]
pub struct KeyDelete {
    #[command(flatten)]
    pub key_store_args: KeyStoreArgs,
    /// Id of the key to delete.
    #[arg(short, long, value_name = "ID")]
    pub key_id: i64,
    #[command(flatten)]
    pub json_output_args: JsonOutputArgs,
}

impl KeyDelete {
    pub async fn handle(self) -> Result<()> {
        let key_store = self.key_store_args.open_key_store().await?;
        key_store.delete_key(self.key_id).await?;
        self.json_output_args.print_json(&serde_json::Value::from(self.key_id))
    }
}
