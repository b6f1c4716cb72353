use crate::{KeyDelete, KeyGenerate, KeyGet, KeyList, KeySetStatus, KeySign, KeyVerify, Result};

/// Key lifecycle CLI tool: generate, list, and delete Ed25519 keys, change their lifecycle status, and
/// sign and verify messages with them.  All output is JSON.
#[derive(clap::Parser)]
#[command(name = "key-lifecycle")]
pub enum Root {
    Delete(KeyDelete),
    Generate(KeyGenerate),
    Get(KeyGet),
    List(KeyList),
    SetStatus(KeySetStatus),
    Sign(KeySign),
    Verify(KeyVerify),
}

impl Root {
    pub async fn handle(self) -> Result<()> {
        match self {
            Self::Delete(x) => x.handle().await,
            Self::Generate(x) => x.handle().await,
            Self::Get(x) => x.handle().await,
            Self::List(x) => x.handle().await,
            Self::SetStatus(x) => x.handle().await,
            Self::Sign(x) => x.handle().await,
            Self::Verify(x) => x.handle(),
        }
    }
}
