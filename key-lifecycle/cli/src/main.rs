mod cmd;
mod json_output_args;
mod key_delete;
mod key_generate;
mod key_get;
mod key_list;
mod key_set_status;
mod key_sign;
mod key_store_args;
mod key_verify;

pub use crate::{
    json_output_args::JsonOutputArgs, key_delete::KeyDelete, key_generate::KeyGenerate,
    key_get::KeyGet, key_list::KeyList, key_set_status::KeySetStatus, key_sign::KeySign,
    key_store_args::KeyStoreArgs, key_verify::KeyVerify,
};
pub use anyhow::{Error, Result};

/// JSON rendering of a key record for output.  The private key is omitted unless explicitly requested.
pub(crate) fn key_record_as_json(
    key_record: &key_lifecycle_store::KeyRecord,
    include_private_key: bool,
) -> Result<serde_json::Value> {
    let mut value = serde_json::to_value(key_record)?;
    if !include_private_key {
        if let Some(object) = value.as_object_mut() {
            object.remove("privateKey");
        }
    }
    Ok(value)
}

#[tokio::main]
async fn main() -> Result<()> {
    // It's necessary to specify EnvFilter::from_default_env in order to use RUST_LOG env var.
    tracing_subscriber::fmt()
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .compact()
        .init();

    use clap::Parser;
    // Note that if the env var RUST_BACKTRACE is set to 1 (or "full"), then the backtrace will be printed
    // to stderr if this returns error.
    cmd::Root::parse().handle().await
}
