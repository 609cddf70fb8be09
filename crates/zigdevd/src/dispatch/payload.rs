//! Payload normalization.
//!
//! Payload entries arrive with `attrId` and `dataType` as integers, numeric
//! strings or catalog names. Normalization turns both into canonical
//! integers, resolving names against the request's cluster, and leaves
//! every other field alone. Entry order is preserved and nothing is dropped.

use serde::Deserialize;
use serde_json::{Map, Value};

use zigdev_zcl::{AttributeId, Catalog, ClusterId, DataTypeId};

use crate::coordinator::PayloadEntry;

use super::errors::DispatchError;
use super::fields::{IdField, IdValue, narrow};

/// `zclData` as sent by the caller.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawPayload {
    /// Ordered sequence of entries.
    Sequence(Vec<RawPayloadEntry>),
    /// A single entry.
    Single(RawPayloadEntry),
}

impl RawPayload {
    /// Coerces the payload into a sequence.
    pub fn into_entries(self) -> Vec<RawPayloadEntry> {
        match self {
            Self::Sequence(entries) => entries,
            Self::Single(entry) => vec![entry],
        }
    }
}

/// Payload entry before normalization.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawPayloadEntry {
    #[serde(rename = "attrId", default)]
    attribute_id: Option<IdField>,
    #[serde(rename = "dataType", default)]
    data_type: Option<IdField>,
    #[serde(flatten)]
    fields: Map<String, Value>,
}

/// Resolves payload identifiers in the context of one cluster.
pub(crate) struct PayloadNormalizer<'a> {
    catalog: &'a dyn Catalog,
    cluster_id: Option<ClusterId>,
}

impl<'a> PayloadNormalizer<'a> {
    pub(crate) fn new(catalog: &'a dyn Catalog, cluster_id: Option<ClusterId>) -> Self {
        Self {
            catalog,
            cluster_id,
        }
    }

    /// Normalizes every entry, failing on the first unresolvable name.
    pub(crate) fn normalize(
        &self,
        entries: Vec<RawPayloadEntry>,
    ) -> Result<Vec<PayloadEntry>, DispatchError> {
        entries
            .into_iter()
            .map(|entry| self.normalize_entry(entry))
            .collect()
    }

    fn normalize_entry(&self, entry: RawPayloadEntry) -> Result<PayloadEntry, DispatchError> {
        let attribute_id = entry
            .attribute_id
            .as_ref()
            .map(|field| self.attribute_id(field))
            .transpose()?;
        let data_type = entry
            .data_type
            .as_ref()
            .map(|field| self.data_type(field))
            .transpose()?;
        Ok(PayloadEntry {
            attribute_id,
            data_type,
            fields: entry.fields,
        })
    }

    fn attribute_id(&self, field: &IdField) -> Result<AttributeId, DispatchError> {
        match field.classify("attrId")? {
            IdValue::Numeric(value) => narrow("attrId", value),
            IdValue::Name(name) => {
                let cluster_id =
                    self.cluster_id
                        .ok_or_else(|| DispatchError::UnresolvedAttribute {
                            cluster_id: None,
                            name: name.to_owned(),
                        })?;
                Ok(self.catalog.attribute_by_name(cluster_id, name)?)
            }
        }
    }

    fn data_type(&self, field: &IdField) -> Result<DataTypeId, DispatchError> {
        match field.classify("dataType")? {
            IdValue::Numeric(value) => narrow("dataType", value),
            IdValue::Name(name) => {
                let cluster_id =
                    self.cluster_id
                        .ok_or_else(|| DispatchError::UnresolvedDataType {
                            cluster_id: None,
                            name: name.to_owned(),
                        })?;
                Ok(self.catalog.data_type_by_name(cluster_id, name)?)
            }
        }
    }
}
