//! Endpoint and Configuration types.

use std::collections::BTreeMap;

use axum::body::Bytes;
use serde::{Deserialize, Serialize};

use crate::endpoints::draft::EndpointError;

/// One rule mapping an HTTP method and path to a canned response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Endpoint {
    /// Opaque identifier, only used to find the entry again for deletion.
    pub id: String,

    /// HTTP verb, compared case-sensitively with the request method.
    pub method: String,

    /// Literal path, exact-match routing key.
    pub path: String,

    /// Response status (default: 200).
    #[serde(default = "default_status_code")]
    pub status_code: u16,

    /// Headers applied to the response after the default content type.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub headers: BTreeMap<String, String>,

    /// Artificial latency before responding, in milliseconds.
    #[serde(default)]
    pub delay_ms: u64,

    /// Raw JSON document, served byte for byte.
    #[serde(rename = "response", with = "raw_json")]
    pub body: Bytes,
}

fn default_status_code() -> u16 {
    200
}

/// The ordered set of endpoints currently intended to be served.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Configuration {
    #[serde(default)]
    endpoints: Vec<Endpoint>,
}

impl Configuration {
    /// Create an empty configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an already validated list of endpoints, keeping its order.
    pub fn from_endpoints(endpoints: Vec<Endpoint>) -> Self {
        Self { endpoints }
    }

    /// Append an endpoint. Ids must stay unique.
    pub fn add(&mut self, endpoint: Endpoint) -> Result<(), EndpointError> {
        if self.get(&endpoint.id).is_some() {
            return Err(EndpointError::DuplicateId(endpoint.id));
        }
        self.endpoints.push(endpoint);
        Ok(())
    }

    /// Remove the endpoint with the given id, returning it.
    pub fn remove(&mut self, id: &str) -> Option<Endpoint> {
        let index = self.endpoints.iter().position(|e| e.id == id)?;
        Some(self.endpoints.remove(index))
    }

    pub fn get(&self, id: &str) -> Option<&Endpoint> {
        self.endpoints.iter().find(|e| e.id == id)
    }

    pub fn endpoints(&self) -> &[Endpoint] {
        &self.endpoints
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Endpoint> {
        self.endpoints.iter()
    }

    pub fn len(&self) -> usize {
        self.endpoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.endpoints.is_empty()
    }
}

impl<'a> IntoIterator for &'a Configuration {
    type Item = &'a Endpoint;
    type IntoIter = std::slice::Iter<'a, Endpoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.endpoints.iter()
    }
}

/// Embeds the body as a JSON document rather than a string, and reads it
/// back without re-formatting.
mod raw_json {
    use axum::body::Bytes;
    use serde::ser::Error as _;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use serde_json::value::RawValue;

    pub fn serialize<S: Serializer>(body: &Bytes, serializer: S) -> Result<S::Ok, S::Error> {
        let raw: &RawValue = serde_json::from_slice(body).map_err(S::Error::custom)?;
        raw.serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Bytes, D::Error> {
        let raw = Box::<RawValue>::deserialize(deserializer)?;
        Ok(Bytes::from(raw.get().to_owned()))
    }
}
