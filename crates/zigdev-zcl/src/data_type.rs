//! ZCL data-type tags.

use crate::model::DataTypeId;

/// No data.
pub const NO_DATA: DataTypeId = 0x00;
/// 8-bit opaque data.
pub const DATA8: DataTypeId = 0x08;
/// 16-bit opaque data.
pub const DATA16: DataTypeId = 0x09;
/// 24-bit opaque data.
pub const DATA24: DataTypeId = 0x0a;
/// 32-bit opaque data.
pub const DATA32: DataTypeId = 0x0b;
/// Boolean.
pub const BOOL: DataTypeId = 0x10;
/// 8-bit bitmap.
pub const BITMAP8: DataTypeId = 0x18;
/// 16-bit bitmap.
pub const BITMAP16: DataTypeId = 0x19;
/// 32-bit bitmap.
pub const BITMAP32: DataTypeId = 0x1b;
/// Unsigned 8-bit integer.
pub const UINT8: DataTypeId = 0x20;
/// Unsigned 16-bit integer.
pub const UINT16: DataTypeId = 0x21;
/// Unsigned 24-bit integer.
pub const UINT24: DataTypeId = 0x22;
/// Unsigned 32-bit integer.
pub const UINT32: DataTypeId = 0x23;
/// Unsigned 48-bit integer.
pub const UINT48: DataTypeId = 0x25;
/// Signed 8-bit integer.
pub const INT8: DataTypeId = 0x28;
/// Signed 16-bit integer.
pub const INT16: DataTypeId = 0x29;
/// Signed 24-bit integer.
pub const INT24: DataTypeId = 0x2a;
/// Signed 32-bit integer.
pub const INT32: DataTypeId = 0x2b;
/// 8-bit enumeration.
pub const ENUM8: DataTypeId = 0x30;
/// 16-bit enumeration.
pub const ENUM16: DataTypeId = 0x31;
/// Half-precision float.
pub const SEMI_PREC: DataTypeId = 0x38;
/// Single-precision float.
pub const SINGLE_PREC: DataTypeId = 0x39;
/// Double-precision float.
pub const DOUBLE_PREC: DataTypeId = 0x3a;
/// Length-prefixed octet string.
pub const OCTET_STR: DataTypeId = 0x41;
/// Length-prefixed character string.
pub const CHAR_STR: DataTypeId = 0x42;
/// Octet string with a 16-bit length.
pub const LONG_OCTET_STR: DataTypeId = 0x43;
/// Character string with a 16-bit length.
pub const LONG_CHAR_STR: DataTypeId = 0x44;
/// Ordered sequence.
pub const ARRAY: DataTypeId = 0x48;
/// Structure.
pub const STRUCT: DataTypeId = 0x4c;
/// Set collection.
pub const SET: DataTypeId = 0x50;
/// Bag collection.
pub const BAG: DataTypeId = 0x51;
/// Time of day.
pub const TOD: DataTypeId = 0xe0;
/// Date.
pub const DATE: DataTypeId = 0xe1;
/// UTC time.
pub const UTC: DataTypeId = 0xe2;
/// Cluster identifier.
pub const CLUSTER_ID: DataTypeId = 0xe8;
/// Attribute identifier.
pub const ATTR_ID: DataTypeId = 0xe9;
/// BACnet object identifier.
pub const BAC_OID: DataTypeId = 0xea;
/// IEEE address.
pub const IEEE_ADDR: DataTypeId = 0xf0;
/// 128-bit security key.
pub const SEC_KEY: DataTypeId = 0xf1;
/// Unknown type.
pub const UNKNOWN: DataTypeId = 0xff;

/// Every tag with its catalog name.
pub(crate) const ALL: &[(&str, DataTypeId)] = &[
    ("noData", NO_DATA),
    ("data8", DATA8),
    ("data16", DATA16),
    ("data24", DATA24),
    ("data32", DATA32),
    ("bool", BOOL),
    ("bitmap8", BITMAP8),
    ("bitmap16", BITMAP16),
    ("bitmap32", BITMAP32),
    ("uint8", UINT8),
    ("uint16", UINT16),
    ("uint24", UINT24),
    ("uint32", UINT32),
    ("uint48", UINT48),
    ("int8", INT8),
    ("int16", INT16),
    ("int24", INT24),
    ("int32", INT32),
    ("enum8", ENUM8),
    ("enum16", ENUM16),
    ("semiPrec", SEMI_PREC),
    ("singlePrec", SINGLE_PREC),
    ("doublePrec", DOUBLE_PREC),
    ("octetStr", OCTET_STR),
    ("charStr", CHAR_STR),
    ("longOctetStr", LONG_OCTET_STR),
    ("longCharStr", LONG_CHAR_STR),
    ("array", ARRAY),
    ("struct", STRUCT),
    ("set", SET),
    ("bag", BAG),
    ("tod", TOD),
    ("date", DATE),
    ("utc", UTC),
    ("clusterId", CLUSTER_ID),
    ("attrId", ATTR_ID),
    ("bacOid", BAC_OID),
    ("ieeeAddr", IEEE_ADDR),
    ("secKey", SEC_KEY),
    ("unknown", UNKNOWN),
];
