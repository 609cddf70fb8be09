//! Catalog lookup failures.

use thiserror::Error;

use crate::model::ClusterId;

/// Errors raised when a catalog lookup cannot be satisfied.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CatalogError {
    /// No cluster is registered under the identifier.
    #[error("cluster {cluster_id} not found")]
    ClusterNotFound {
        /// Identifier that was looked up.
        cluster_id: ClusterId,
    },

    /// The cluster declares no attribute with the given name.
    #[error("unknown attribute '{name}' in cluster {cluster_id}")]
    UnknownAttribute {
        /// Cluster searched.
        cluster_id: ClusterId,
        /// Attribute name that did not resolve.
        name: String,
    },

    /// Neither a data type nor a cluster attribute matches the name.
    #[error("unknown data type '{name}' in cluster {cluster_id}")]
    UnknownDataType {
        /// Cluster used as lookup context.
        cluster_id: ClusterId,
        /// Data-type name that did not resolve.
        name: String,
    },
}
