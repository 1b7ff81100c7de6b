use crate::gateway::CreateResult;
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DefaultOnNull};

// Missing and null fields default to empty strings so they are reported as required fields
// rather than as JSON data errors.

#[serde_as]
#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub(super) struct CheckAvailabilityRequest {
    #[serde_as(as = "DefaultOnNull")]
    pub subdomain: String,
}

#[serde_as]
#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub(super) struct CreateRecordsRequest {
    #[serde_as(as = "DefaultOnNull")]
    pub subdomain: String,
    #[serde_as(as = "DefaultOnNull")]
    pub txt_value: String,
    #[serde_as(as = "DefaultOnNull")]
    pub a_value: String,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub(super) struct CreateRecordsResult {
    pub success: bool,
    #[serde(flatten)]
    pub result: CreateResult,
}
