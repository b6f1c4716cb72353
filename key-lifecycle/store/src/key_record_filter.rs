use crate::KeyRecord;
use key_lifecycle_core::KeyStatus;

#[derive(Clone, Debug, Default)]
pub struct KeyRecordFilter {
    /// If this is Some(status), then only key records having that status will be returned.
    /// If this is None, then key records will not be filtered by status.
    pub status_o: Option<KeyStatus>,
}

impl KeyRecordFilter {
    pub fn with_status(status: KeyStatus) -> Self {
        Self {
            status_o: Some(status),
        }
    }
    pub fn matches(&self, key_record: &KeyRecord) -> bool {
        if let Some(status) = self.status_o {
            if key_record.status != status {
                return false;
            }
        }
        true
    }
}
