//! Catalog enumerations served to `getLibData` callers.
//!
//! Lookups are returned verbatim. Two per-cluster keys deliberately differ:
//! `attrIdList` reports an unknown cluster as an error, while
//! `cmdListFunctional` answers `list: null` for unknown clusters and for
//! clusters without a command map. A declared but empty map answers `{}`.

use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use zigdev_zcl::{Catalog, ClusterDef, ClusterId};

use super::errors::DispatchError;
use super::fields::{IdField, narrow};
use super::request::LibDataQuery;
use super::router::DISPATCH_TARGET;

/// Keys understood by the metadata service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetadataKey {
    /// `cidList` or `clusterList`.
    Clusters,
    /// `attrIdList`.
    Attributes,
    /// `cmdListFoundation`.
    FoundationCommands,
    /// `cmdListFunctional`.
    FunctionalCommands,
    /// `respCodes`.
    StatusCodes,
    /// `typeList`.
    DataTypes,
}

impl MetadataKey {
    /// Parses a wire key.
    pub fn parse(key: &str) -> Option<Self> {
        match key {
            "cidList" | "clusterList" => Some(Self::Clusters),
            "attrIdList" => Some(Self::Attributes),
            "cmdListFoundation" => Some(Self::FoundationCommands),
            "cmdListFunctional" => Some(Self::FunctionalCommands),
            "respCodes" => Some(Self::StatusCodes),
            "typeList" => Some(Self::DataTypes),
            _ => None,
        }
    }
}

/// Answer to a metadata query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetadataResult {
    /// Key as sent by the caller.
    pub key: String,
    /// Enumeration, or `null` when the key tolerates a missing source.
    pub list: Value,
}

/// Read-only view over the catalog.
pub(crate) struct MetadataService {
    catalog: Arc<dyn Catalog>,
}

impl MetadataService {
    pub(crate) fn new(catalog: Arc<dyn Catalog>) -> Self {
        Self { catalog }
    }

    /// Answers `query`, or returns `None` for unknown keys.
    pub(crate) fn query(
        &self,
        query: &LibDataQuery,
    ) -> Result<Option<MetadataResult>, DispatchError> {
        let Some(key) = MetadataKey::parse(&query.key) else {
            debug!(
                target: DISPATCH_TARGET,
                key = %query.key,
                "ignoring unknown metadata key"
            );
            return Ok(None);
        };

        let catalog = self.catalog.as_ref();
        let list = match key {
            MetadataKey::Clusters => serde_json::to_value(catalog.clusters())?,
            MetadataKey::Attributes => {
                let cluster_id = required_cluster_id(query.cid.as_ref())?;
                let cluster = catalog
                    .cluster(cluster_id)
                    .ok_or(DispatchError::ClusterNotFound { cluster_id })?;
                serde_json::to_value(cluster.attributes())?
            }
            MetadataKey::FoundationCommands => {
                serde_json::to_value(catalog.foundation_commands())?
            }
            MetadataKey::FunctionalCommands => {
                let commands = query
                    .cid
                    .as_ref()
                    .and_then(IdField::as_integer)
                    .and_then(|id| ClusterId::try_from(id).ok())
                    .and_then(|id| catalog.cluster(id))
                    .and_then(ClusterDef::command_map);
                match commands {
                    Some(commands) => serde_json::to_value(commands)?,
                    None => Value::Null,
                }
            }
            MetadataKey::StatusCodes => serde_json::to_value(catalog.status_codes())?,
            MetadataKey::DataTypes => serde_json::to_value(catalog.data_types())?,
        };

        Ok(Some(MetadataResult {
            key: query.key.clone(),
            list,
        }))
    }
}

fn required_cluster_id(cid: Option<&IdField>) -> Result<ClusterId, DispatchError> {
    let field = cid.ok_or(DispatchError::MissingField { field: "cid" })?;
    let value = field
        .as_integer()
        .ok_or_else(|| DispatchError::invalid_field("cid", field))?;
    narrow("cid", value)
}
