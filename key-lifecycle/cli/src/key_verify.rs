use crate::{JsonOutputArgs, Result};

/// Verify a hex-encoded signature of a message against a hex-encoded public key.  The message is
/// interpreted the same way as by the sign command.  The output is `true` or `false`, and the exit
/// status is nonzero if the signature is not valid.
#[derive(clap::Args)]
pub struct KeyVerify {
    /// The hex-encoded signature.
    #[arg(short, long)]
    pub signature: String,
    /// The message that was signed.
    #[arg(short, long)]
    pub message: String,
    /// The hex-encoded public key of the signer.
    #[arg(short, long)]
    pub public_key: String,
    #[command(flatten)]
    pub json_output_args: JsonOutputArgs,
}

impl KeyVerify {
    pub fn handle(self) -> Result<()> {
        let is_valid = key_lifecycle_store::verify_signature_hex(
            &self.signature,
            &self.message,
            &self.public_key,
        )?;
        self.json_output_args.print_json(&serde_json::Value::Bool(is_valid))?;
        if !is_valid {
            anyhow::bail!("Signature is not valid");
        }
        Ok(())
    }
}
