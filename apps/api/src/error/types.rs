use std::collections::BTreeMap;

use serde::Serialize;
use ts_rs::TS;

/// API error payload.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/error-response.ts"
)]
pub struct ErrorResponse {
    message: String,
    /// Messages per form field, present for rejected form submissions.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    errors: Option<BTreeMap<String, Vec<String>>>,
}

impl ErrorResponse {
    pub(super) fn new(message: String, errors: Option<BTreeMap<String, Vec<String>>>) -> Self {
        Self { message, errors }
    }
}
