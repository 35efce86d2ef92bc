// Mutation outcome shapes shared across the REST surface

use serde::Deserialize;

/// Returned by create endpoints.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertOutcome {
    pub inserted_id: String,
}

/// Returned by patch endpoints; `modified_count == 0` means the update was
/// a no-op (record missing or value unchanged).
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOutcome {
    #[serde(default)]
    pub modified_count: u64,
}

impl UpdateOutcome {
    pub fn changed(&self) -> bool {
        self.modified_count > 0
    }
}

/// Returned by delete endpoints.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteOutcome {
    #[serde(default)]
    pub deleted_count: u64,
}

impl DeleteOutcome {
    pub fn deleted(&self) -> bool {
        self.deleted_count > 0
    }
}
