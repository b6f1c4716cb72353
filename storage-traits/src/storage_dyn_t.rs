use crate::{Result, TransactionDynT};

/// Object-safe Storage trait, able to begin a transaction of the appropriate type.  Storage impls
/// can be swapped (e.g. SQLite vs in-memory) behind an `Arc<dyn ...>` without changing a generic.
/// Beginning a transaction is also where an unreachable backend is reported, as `Error::OpenFailed`.
#[cfg_attr(target_arch = "wasm32", async_trait::async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait::async_trait)]
pub trait StorageDynT {
    async fn begin_transaction(&self) -> Result<Box<dyn TransactionDynT>>;
}
