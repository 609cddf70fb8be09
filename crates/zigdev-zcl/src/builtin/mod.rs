//! Catalog compiled into the binary.

mod tables;

use std::collections::BTreeMap;

use crate::catalog::Catalog;
use crate::data_type;
use crate::model::{
    ClusterDef, ClusterId, CommandDef, CommandId, DataTypeId, Enumeration, StatusCode,
};

use self::tables::{CLUSTERS, ClusterTable, FOUNDATION_COMMANDS, STATUS_CODES};

/// [`Catalog`] backed by static tables.
///
/// The tables are expanded once at construction; lookups afterwards are
/// plain map reads.
#[derive(Debug, Clone)]
pub struct BuiltinCatalog {
    clusters: BTreeMap<ClusterId, ClusterDef>,
    cluster_names: Enumeration<ClusterId>,
    foundation: BTreeMap<CommandId, CommandDef>,
    foundation_names: Enumeration<CommandId>,
    status_codes: Enumeration<StatusCode>,
    data_types: Enumeration<DataTypeId>,
}

impl BuiltinCatalog {
    /// Builds the catalog from the static tables.
    #[must_use]
    pub fn new() -> Self {
        let clusters: BTreeMap<ClusterId, ClusterDef> = CLUSTERS
            .iter()
            .map(|table| (table.id, expand_cluster(table)))
            .collect();
        let cluster_names = clusters
            .values()
            .map(|cluster| (cluster.name().to_owned(), cluster.id()))
            .collect();
        let foundation = FOUNDATION_COMMANDS
            .iter()
            .map(|&(name, id)| (id, CommandDef::new(id, name)))
            .collect();

        Self {
            clusters,
            cluster_names,
            foundation,
            foundation_names: enumeration(FOUNDATION_COMMANDS),
            status_codes: enumeration(STATUS_CODES),
            data_types: enumeration(data_type::ALL),
        }
    }
}

impl Default for BuiltinCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl Catalog for BuiltinCatalog {
    fn clusters(&self) -> &Enumeration<ClusterId> {
        &self.cluster_names
    }

    fn cluster(&self, cluster_id: ClusterId) -> Option<&ClusterDef> {
        self.clusters.get(&cluster_id)
    }

    fn foundation_commands(&self) -> &Enumeration<CommandId> {
        &self.foundation_names
    }

    fn global_command(&self, command_id: CommandId) -> Option<&CommandDef> {
        self.foundation.get(&command_id)
    }

    fn status_codes(&self) -> &Enumeration<StatusCode> {
        &self.status_codes
    }

    fn data_types(&self) -> &Enumeration<DataTypeId> {
        &self.data_types
    }
}

fn expand_cluster(table: &ClusterTable) -> ClusterDef {
    let with_attributes = table.attributes.iter().fold(
        ClusterDef::new(table.id, table.name),
        |cluster, &(name, id, data_type)| cluster.with_attribute(name, id, data_type),
    );
    let Some(commands) = table.commands else {
        return with_attributes;
    };
    commands
        .iter()
        .fold(with_attributes.with_command_map(), |cluster, &(name, id)| {
            cluster.with_command(name, id)
        })
}

fn enumeration<T: Copy>(entries: &[(&str, T)]) -> Enumeration<T> {
    entries
        .iter()
        .map(|&(name, value)| (name.to_owned(), value))
        .collect()
}
