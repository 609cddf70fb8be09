//! JSONL request dispatch.
//!
//! Clients send one envelope per connection:
//!
//! ```json
//! {"command":"sendToZigbee","message":{"id":"zigbee.0.00124b0001","ep":1,"cid":6,"cmdType":"functional","cmd":2,"zclData":{}},"from":"admin.0","callback":17}
//! ```
//!
//! `getLibData` is answered from the catalog, `sendToZigbee` is resolved and
//! published through the coordinator, and `reset` is passed straight to the
//! coordinator. The response echoes `command`, `from` and `callback` and
//! carries the result under `message`. Anything else is ignored.

mod command;
mod completion;
mod errors;
mod fields;
mod handler;
mod metadata;
mod payload;
mod request;
mod response;
mod router;
mod target;

pub use self::command::CommandResult;
pub use self::errors::DispatchError;
pub use self::handler::DispatchConnectionHandler;
pub use self::metadata::{MetadataKey, MetadataResult};
pub use self::router::{DispatchContext, RequestKind};
