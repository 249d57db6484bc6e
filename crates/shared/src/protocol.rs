use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{
    domain::{GroupName, Inventory, ResourceRecord},
    error::FetchError,
};

/// Body of `GET /projects/{projectId}/all-resources`.
///
/// The service answers with a JSON object keyed by service group. A `null`
/// body, or a `null` group, is read as "nothing provisioned".
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AllResourcesResponse(pub Option<BTreeMap<String, Option<Vec<ResourceRecord>>>>);

impl AllResourcesResponse {
    pub fn into_inventory(self) -> Inventory {
        self.0
            .unwrap_or_default()
            .into_iter()
            .map(|(group, records)| (GroupName(group), records.unwrap_or_default()))
            .collect()
    }
}

pub fn decode_inventory(body: &[u8]) -> Result<Inventory, FetchError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Inventory::new());
    }
    let response: AllResourcesResponse =
        serde_json::from_slice(body).map_err(|err| FetchError::Decode(err.to_string()))?;
    Ok(response.into_inventory())
}
