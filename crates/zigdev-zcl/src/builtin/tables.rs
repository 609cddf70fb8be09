//! Static ZCL tables backing [`super::BuiltinCatalog`].

use crate::data_type::{
    BITMAP8, BITMAP16, BOOL, CHAR_STR, ENUM8, ENUM16, IEEE_ADDR, INT8, INT16, UINT8, UINT16,
    UINT32, UTC,
};
use crate::model::{AttributeId, ClusterId, CommandId, DataTypeId, StatusCode};

pub(super) struct ClusterTable {
    pub(super) id: ClusterId,
    pub(super) name: &'static str,
    pub(super) attributes: &'static [(&'static str, AttributeId, DataTypeId)],
    pub(super) commands: Option<&'static [(&'static str, CommandId)]>,
}

pub(super) const CLUSTERS: &[ClusterTable] = &[
    ClusterTable {
        id: 0x0000,
        name: "genBasic",
        attributes: &[
            ("zclVersion", 0x0000, UINT8),
            ("appVersion", 0x0001, UINT8),
            ("stackVersion", 0x0002, UINT8),
            ("hwVersion", 0x0003, UINT8),
            ("manufacturerName", 0x0004, CHAR_STR),
            ("modelId", 0x0005, CHAR_STR),
            ("dateCode", 0x0006, CHAR_STR),
            ("powerSource", 0x0007, ENUM8),
            ("locationDesc", 0x0010, CHAR_STR),
            ("physicalEnv", 0x0011, ENUM8),
            ("deviceEnabled", 0x0012, BOOL),
            ("swBuildId", 0x4000, CHAR_STR),
        ],
        commands: Some(&[("resetFactDefault", 0x00)]),
    },
    ClusterTable {
        id: 0x0001,
        name: "genPowerCfg",
        attributes: &[
            ("mainsVoltage", 0x0000, UINT16),
            ("mainsFrequency", 0x0001, UINT8),
            ("batteryVoltage", 0x0020, UINT8),
            ("batteryPercentageRemaining", 0x0021, UINT8),
            ("batteryAlarmMask", 0x0035, BITMAP8),
        ],
        commands: None,
    },
    ClusterTable {
        id: 0x0003,
        name: "genIdentify",
        attributes: &[("identifyTime", 0x0000, UINT16)],
        commands: Some(&[
            ("identify", 0x00),
            ("identifyQuery", 0x01),
            ("triggerEffect", 0x40),
        ]),
    },
    ClusterTable {
        id: 0x0004,
        name: "genGroups",
        attributes: &[("nameSupport", 0x0000, BITMAP8)],
        commands: Some(&[
            ("add", 0x00),
            ("view", 0x01),
            ("getMembership", 0x02),
            ("remove", 0x03),
            ("removeAll", 0x04),
            ("addIfIdentifying", 0x05),
        ]),
    },
    ClusterTable {
        id: 0x0005,
        name: "genScenes",
        attributes: &[
            ("count", 0x0000, UINT8),
            ("currentScene", 0x0001, UINT8),
            ("currentGroup", 0x0002, UINT16),
            ("sceneValid", 0x0003, BOOL),
            ("nameSupport", 0x0004, BITMAP8),
        ],
        commands: Some(&[
            ("add", 0x00),
            ("view", 0x01),
            ("remove", 0x02),
            ("removeAll", 0x03),
            ("store", 0x04),
            ("recall", 0x05),
            ("getSceneMembership", 0x06),
        ]),
    },
    ClusterTable {
        id: 0x0006,
        name: "genOnOff",
        attributes: &[
            ("onOff", 0x0000, BOOL),
            ("globalSceneCtrl", 0x4000, BOOL),
            ("onTime", 0x4001, UINT16),
            ("offWaitTime", 0x4002, UINT16),
            ("startUpOnOff", 0x4003, ENUM8),
        ],
        commands: Some(&[
            ("off", 0x00),
            ("on", 0x01),
            ("toggle", 0x02),
            ("offWithEffect", 0x40),
            ("onWithRecallGlobalScene", 0x41),
            ("onWithTimedOff", 0x42),
        ]),
    },
    ClusterTable {
        id: 0x0008,
        name: "genLevelCtrl",
        attributes: &[
            ("currentLevel", 0x0000, UINT8),
            ("remainingTime", 0x0001, UINT16),
            ("onOffTransitionTime", 0x0010, UINT16),
            ("onLevel", 0x0011, UINT8),
            ("startUpCurrentLevel", 0x4000, UINT8),
        ],
        commands: Some(&[
            ("moveToLevel", 0x00),
            ("move", 0x01),
            ("step", 0x02),
            ("stop", 0x03),
            ("moveToLevelWithOnOff", 0x04),
            ("moveWithOnOff", 0x05),
            ("stepWithOnOff", 0x06),
            ("stopWithOnOff", 0x07),
        ]),
    },
    ClusterTable {
        id: 0x000a,
        name: "genTime",
        attributes: &[
            ("time", 0x0000, UTC),
            ("timeStatus", 0x0001, BITMAP8),
            ("timeZone", 0x0002, UINT32),
        ],
        commands: None,
    },
    ClusterTable {
        id: 0x0102,
        name: "closuresWindowCovering",
        attributes: &[
            ("windowCoveringType", 0x0000, ENUM8),
            ("currentPositionLiftPercentage", 0x0008, UINT8),
            ("currentPositionTiltPercentage", 0x0009, UINT8),
            ("windowCoveringMode", 0x0017, BITMAP8),
        ],
        commands: Some(&[
            ("upOpen", 0x00),
            ("downClose", 0x01),
            ("stop", 0x02),
            ("goToLiftPercentage", 0x05),
            ("goToTiltPercentage", 0x08),
        ]),
    },
    ClusterTable {
        id: 0x0201,
        name: "hvacThermostat",
        attributes: &[
            ("localTemp", 0x0000, INT16),
            ("occupiedCoolingSetpoint", 0x0011, INT16),
            ("occupiedHeatingSetpoint", 0x0012, INT16),
            ("systemMode", 0x001c, ENUM8),
        ],
        commands: Some(&[
            ("setpointRaiseLower", 0x00),
            ("setWeeklySchedule", 0x01),
            ("getWeeklySchedule", 0x02),
            ("clearWeeklySchedule", 0x03),
        ]),
    },
    ClusterTable {
        id: 0x0300,
        name: "lightingColorCtrl",
        attributes: &[
            ("currentHue", 0x0000, UINT8),
            ("currentSaturation", 0x0001, UINT8),
            ("remainingTime", 0x0002, UINT16),
            ("currentX", 0x0003, UINT16),
            ("currentY", 0x0004, UINT16),
            ("colorTemperature", 0x0007, UINT16),
            ("colorMode", 0x0008, ENUM8),
            ("enhancedColorMode", 0x4001, ENUM8),
            ("colorCapabilities", 0x400a, BITMAP16),
        ],
        commands: Some(&[
            ("moveToHue", 0x00),
            ("moveHue", 0x01),
            ("stepHue", 0x02),
            ("moveToSaturation", 0x03),
            ("moveToHueAndSaturation", 0x06),
            ("moveToColor", 0x07),
            ("moveColor", 0x08),
            ("moveToColorTemp", 0x0a),
            ("stopMoveStep", 0x47),
        ]),
    },
    ClusterTable {
        id: 0x0400,
        name: "msIlluminanceMeasurement",
        attributes: &[
            ("measuredValue", 0x0000, UINT16),
            ("minMeasuredValue", 0x0001, UINT16),
            ("maxMeasuredValue", 0x0002, UINT16),
            ("lightSensorType", 0x0004, ENUM8),
        ],
        commands: None,
    },
    ClusterTable {
        id: 0x0402,
        name: "msTemperatureMeasurement",
        attributes: &[
            ("measuredValue", 0x0000, INT16),
            ("minMeasuredValue", 0x0001, INT16),
            ("maxMeasuredValue", 0x0002, INT16),
            ("tolerance", 0x0003, UINT16),
        ],
        commands: None,
    },
    ClusterTable {
        id: 0x0405,
        name: "msRelativeHumidity",
        attributes: &[
            ("measuredValue", 0x0000, UINT16),
            ("minMeasuredValue", 0x0001, UINT16),
            ("maxMeasuredValue", 0x0002, UINT16),
        ],
        commands: None,
    },
    ClusterTable {
        id: 0x0406,
        name: "msOccupancySensing",
        attributes: &[
            ("occupancy", 0x0000, BITMAP8),
            ("occupancySensorType", 0x0001, ENUM8),
            ("pirOToUDelay", 0x0010, UINT16),
        ],
        commands: None,
    },
    ClusterTable {
        id: 0x0500,
        name: "ssIasZone",
        attributes: &[
            ("zoneState", 0x0000, ENUM8),
            ("zoneType", 0x0001, ENUM16),
            ("zoneStatus", 0x0002, BITMAP16),
            ("iasCieAddr", 0x0010, IEEE_ADDR),
            ("zoneId", 0x0011, UINT8),
        ],
        commands: Some(&[("enrollRsp", 0x00), ("initNormalOpMode", 0x01)]),
    },
    ClusterTable {
        id: 0x0b04,
        name: "haElectricalMeasurement",
        attributes: &[
            ("rmsVoltage", 0x0505, UINT16),
            ("rmsCurrent", 0x0508, UINT16),
            ("activePower", 0x050b, INT16),
            ("powerFactor", 0x0510, INT8),
        ],
        commands: Some(&[("getProfileInfo", 0x00), ("getMeasurementProfile", 0x01)]),
    },
];

pub(super) const FOUNDATION_COMMANDS: &[(&str, CommandId)] = &[
    ("read", 0x00),
    ("readRsp", 0x01),
    ("write", 0x02),
    ("writeUndiv", 0x03),
    ("writeRsp", 0x04),
    ("writeNoRsp", 0x05),
    ("configReport", 0x06),
    ("configReportRsp", 0x07),
    ("readReportConfig", 0x08),
    ("readReportConfigRsp", 0x09),
    ("report", 0x0a),
    ("defaultRsp", 0x0b),
    ("discover", 0x0c),
    ("discoverRsp", 0x0d),
    ("readStruct", 0x0e),
    ("writeStruct", 0x0f),
    ("writeStructRsp", 0x10),
    ("discoverCommands", 0x11),
    ("discoverCommandsRsp", 0x12),
    ("discoverCommandsGen", 0x13),
    ("discoverCommandsGenRsp", 0x14),
    ("discoverExt", 0x15),
    ("discoverExtRsp", 0x16),
];

pub(super) const STATUS_CODES: &[(&str, StatusCode)] = &[
    ("SUCCESS", 0x00),
    ("FAILURE", 0x01),
    ("NOT_AUTHORIZED", 0x7e),
    ("RESERVED_FIELD_NOT_ZERO", 0x7f),
    ("MALFORMED_COMMAND", 0x80),
    ("UNSUP_CLUSTER_COMMAND", 0x81),
    ("UNSUP_GENERAL_COMMAND", 0x82),
    ("UNSUP_MANUF_CLUSTER_COMMAND", 0x83),
    ("UNSUP_MANUF_GENERAL_COMMAND", 0x84),
    ("INVALID_FIELD", 0x85),
    ("UNSUPPORTED_ATTRIBUTE", 0x86),
    ("INVALID_VALUE", 0x87),
    ("READ_ONLY", 0x88),
    ("INSUFFICIENT_SPACE", 0x89),
    ("DUPLICATE_EXISTS", 0x8a),
    ("NOT_FOUND", 0x8b),
    ("UNREPORTABLE_ATTRIBUTE", 0x8c),
    ("INVALID_DATA_TYPE", 0x8d),
    ("INVALID_SELECTOR", 0x8e),
    ("WRITE_ONLY", 0x8f),
    ("INCONSISTENT_STARTUP_STATE", 0x90),
    ("DEFINED_OUT_OF_BAND", 0x91),
    ("INCONSISTENT", 0x92),
    ("ACTION_DENIED", 0x93),
    ("TIMEOUT", 0x94),
    ("ABORT", 0x95),
    ("INVALID_IMAGE", 0x96),
    ("WAIT_FOR_DATA", 0x97),
    ("NO_IMAGE_AVAILABLE", 0x98),
    ("REQUIRE_MORE_IMAGE", 0x99),
    ("NOTIFICATION_PENDING", 0x9a),
    ("HARDWARE_FAILURE", 0xc0),
    ("SOFTWARE_FAILURE", 0xc1),
    ("CALIBRATION_ERROR", 0xc2),
    ("UNSUPPORTED_CLUSTER", 0xc3),
];
