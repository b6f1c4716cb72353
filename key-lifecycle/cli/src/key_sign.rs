use crate::{JsonOutputArgs, KeyStoreArgs, Result};

/// Sign a message with a stored key, which must have status Active.  A message beginning with "0x" is
/// interpreted as hex-encoded bytes; any other message is signed as its UTF-8 bytes.  The output is a
/// JSON object having the signing key's id and public key, and the hex-encoded signature.
#[derive(clap::Args)]
pub struct KeySign {
    #[command(flatten)]
    pub key_store_args: KeyStoreArgs,
    /// The message to sign.
    #[arg(short, long)]
    pub message: String,
    /// Id of the key to sign with.  If omitted, the most recently created key is used.
    #[arg(short, long, value_name = "ID")]
    pub key_id: Option<i64>,
    #[command(flatten)]
    pub json_output_args: JsonOutputArgs,
}

impl KeySign {
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
                .ok_or_else(|| anyhow::anyhow!("There are no keys to sign with"))?
        };
        let signature_hex =
            key_lifecycle_store::sign_with_key_record_async(&self.message, &key_record).await?;
        self.json_output_args.print_json(&serde_json::json!({
            "keyId": key_record.key_id_o,
            "publicKey": key_record.public_key,
            "signature": signature_hex,
        }))
    }
}
