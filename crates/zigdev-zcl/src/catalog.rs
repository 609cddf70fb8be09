//! Read-only lookup interface over ZCL metadata.

use crate::error::CatalogError;
use crate::model::{
    AttributeId, ClusterDef, ClusterId, CommandDef, CommandId, DataTypeId, Enumeration,
    StatusCode,
};

/// Read-only ZCL metadata service.
///
/// Implementations must be safe to share between request threads; the
/// dispatcher performs at most one lookup per field per request and never
/// caches results.
pub trait Catalog: Send + Sync {
    /// Every known cluster, name to identifier.
    fn clusters(&self) -> &Enumeration<ClusterId>;

    /// Cluster definition for the identifier, if known.
    fn cluster(&self, cluster_id: ClusterId) -> Option<&ClusterDef>;

    /// Foundation (global) commands, name to identifier.
    fn foundation_commands(&self) -> &Enumeration<CommandId>;

    /// Foundation command descriptor for the identifier, if known.
    fn global_command(&self, command_id: CommandId) -> Option<&CommandDef>;

    /// Status codes, name to value.
    fn status_codes(&self) -> &Enumeration<StatusCode>;

    /// Data-type tags, name to value.
    fn data_types(&self) -> &Enumeration<DataTypeId>;

    /// Resolves an attribute name within a cluster.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::ClusterNotFound`] for unknown clusters and
    /// [`CatalogError::UnknownAttribute`] when the cluster lacks the name.
    fn attribute_by_name(
        &self,
        cluster_id: ClusterId,
        name: &str,
    ) -> Result<AttributeId, CatalogError> {
        let cluster = self
            .cluster(cluster_id)
            .ok_or(CatalogError::ClusterNotFound { cluster_id })?;
        cluster
            .attribute(name)
            .map(|attribute| attribute.id())
            .ok_or_else(|| CatalogError::UnknownAttribute {
                cluster_id,
                name: name.to_owned(),
            })
    }

    /// Resolves a data-type name in the context of a cluster.
    ///
    /// Data-type names (`bool`, `uint8`, ...) win. Otherwise an attribute
    /// name of the cluster resolves to that attribute's declared type.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::UnknownDataType`] when neither lookup matches.
    fn data_type_by_name(
        &self,
        cluster_id: ClusterId,
        name: &str,
    ) -> Result<DataTypeId, CatalogError> {
        if let Some(tag) = self.data_types().get(name) {
            return Ok(*tag);
        }
        self.cluster(cluster_id)
            .and_then(|cluster| cluster.attribute(name))
            .map(|attribute| attribute.data_type())
            .ok_or_else(|| CatalogError::UnknownDataType {
                cluster_id,
                name: name.to_owned(),
            })
    }
}
