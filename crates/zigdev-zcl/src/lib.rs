//! Zigbee Cluster Library metadata for the zigdev dispatcher.
//!
//! The dispatcher never embeds ZCL knowledge of its own. Every identifier it
//! needs (cluster ids, attribute ids, command descriptors, data-type tags and
//! status codes) is looked up through the read-only [`Catalog`] trait, which
//! keeps the catalog the single source of truth and lets tests substitute a
//! fake.
//!
//! [`BuiltinCatalog`] ships with the general, lighting, closure, HVAC and
//! measurement clusters most devices expose, together with the complete
//! foundation command, status code and data type enumerations.
//!
//! # Example
//!
//! ```
//! use zigdev_zcl::{BuiltinCatalog, Catalog};
//!
//! let catalog = BuiltinCatalog::new();
//! let on_off = catalog.cluster(6).expect("genOnOff is built in");
//! assert_eq!(on_off.name(), "genOnOff");
//! assert_eq!(catalog.attribute_by_name(6, "onOff"), Ok(0));
//! assert_eq!(catalog.data_type_by_name(6, "bool"), Ok(0x10));
//! ```

mod builtin;
mod catalog;
pub mod data_type;
mod error;
mod model;

pub use self::builtin::BuiltinCatalog;
pub use self::catalog::Catalog;
pub use self::error::CatalogError;
pub use self::model::{
    AttributeDef, AttributeId, ClusterDef, ClusterId, CommandDef, CommandId, DataTypeId,
    Enumeration, StatusCode,
};
