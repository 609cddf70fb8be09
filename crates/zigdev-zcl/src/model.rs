//! Cluster, attribute and command definitions.

use std::collections::BTreeMap;

use serde::Serialize;

/// Cluster identifier.
pub type ClusterId = u16;
/// Attribute identifier within a cluster.
pub type AttributeId = u16;
/// Command identifier, functional or foundation.
pub type CommandId = u8;
/// Data-type tag.
pub type DataTypeId = u8;
/// ZCL status code.
pub type StatusCode = u8;

/// Name-to-value map as exposed to callers listing catalog contents.
pub type Enumeration<T> = BTreeMap<String, T>;

/// Attribute declared by a cluster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AttributeDef {
    id: AttributeId,
    #[serde(rename = "type")]
    data_type: DataTypeId,
}

impl AttributeDef {
    /// Creates an attribute definition.
    #[must_use]
    pub const fn new(id: AttributeId, data_type: DataTypeId) -> Self {
        Self { id, data_type }
    }

    /// Attribute identifier.
    #[must_use]
    pub const fn id(&self) -> AttributeId {
        self.id
    }

    /// Declared data type.
    #[must_use]
    pub const fn data_type(&self) -> DataTypeId {
        self.data_type
    }
}

/// Command descriptor handed to the coordinator when publishing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandDef {
    id: CommandId,
    name: String,
}

impl CommandDef {
    /// Creates a command descriptor.
    #[must_use]
    pub fn new(id: CommandId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }

    /// Command identifier.
    #[must_use]
    pub const fn id(&self) -> CommandId {
        self.id
    }

    /// Command name.
    #[must_use]
    pub const fn name(&self) -> &str {
        self.name.as_str()
    }
}

/// Cluster definition with its attributes and optional command set.
///
/// A cluster without a command map (`commands() == None`) is valid: many
/// measurement clusters only expose attributes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClusterDef {
    id: ClusterId,
    name: String,
    attributes: Enumeration<AttributeDef>,
    commands: Option<Vec<CommandDef>>,
}

impl ClusterDef {
    /// Creates a cluster without attributes or commands.
    #[must_use]
    pub fn new(id: ClusterId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            attributes: Enumeration::new(),
            commands: None,
        }
    }

    /// Adds an attribute.
    #[must_use]
    pub fn with_attribute(
        mut self,
        name: impl Into<String>,
        id: AttributeId,
        data_type: DataTypeId,
    ) -> Self {
        self.attributes
            .insert(name.into(), AttributeDef::new(id, data_type));
        self
    }

    /// Declares a command map, which stays empty until commands are added.
    ///
    /// An empty map is distinct from no map: metadata queries answer `{}`
    /// rather than `null`.
    #[must_use]
    pub fn with_command_map(mut self) -> Self {
        self.commands.get_or_insert_with(Vec::new);
        self
    }

    /// Adds a functional command, creating the command map if needed.
    #[must_use]
    pub fn with_command(mut self, name: impl Into<String>, id: CommandId) -> Self {
        self.commands
            .get_or_insert_with(Vec::new)
            .push(CommandDef::new(id, name));
        self
    }

    /// Cluster identifier.
    #[must_use]
    pub const fn id(&self) -> ClusterId {
        self.id
    }

    /// Cluster name.
    #[must_use]
    pub const fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Attributes keyed by name.
    #[must_use]
    pub const fn attributes(&self) -> &Enumeration<AttributeDef> {
        &self.attributes
    }

    /// Looks up an attribute by name.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&AttributeDef> {
        self.attributes.get(name)
    }

    /// Functional commands, or `None` when the cluster has no command map.
    #[must_use]
    pub fn commands(&self) -> Option<&[CommandDef]> {
        self.commands.as_deref()
    }

    /// Looks up a functional command by identifier.
    #[must_use]
    pub fn command(&self, id: CommandId) -> Option<&CommandDef> {
        self.commands()?.iter().find(|command| command.id() == id)
    }

    /// Functional commands as a name-to-id map, `None` without a command map.
    #[must_use]
    pub fn command_map(&self) -> Option<Enumeration<CommandId>> {
        self.commands().map(|commands| {
            commands
                .iter()
                .map(|command| (command.name().to_owned(), command.id()))
                .collect()
        })
    }
}
