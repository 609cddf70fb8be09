//! Address normalization and target lookup.

use crate::coordinator::{Coordinator, Target};

use super::errors::DispatchError;
use super::fields::parse_integer;

/// Strips the adapter namespace from `id` and ensures a `0x` prefix.
pub(crate) fn normalize_address(namespace: &str, id: &str) -> String {
    let bare = if namespace.is_empty() {
        id
    } else {
        id.strip_prefix(namespace)
            .and_then(|rest| rest.strip_prefix('.'))
            .unwrap_or(id)
    };
    if bare.starts_with("0x") {
        bare.to_owned()
    } else {
        format!("0x{bare}")
    }
}

/// Reads a normalized address as a group identifier.
pub(crate) fn group_id(address: &str) -> Option<u16> {
    parse_integer(address).and_then(|value| u16::try_from(value).ok())
}

/// Resolves the address to a device, falling back to a group.
pub(crate) fn resolve_target(
    coordinator: &dyn Coordinator,
    address: &str,
) -> Result<Target, DispatchError> {
    if let Some(device) = coordinator.device(address) {
        return Ok(Target::Device(device));
    }
    group_id(address)
        .and_then(|id| coordinator.group(id))
        .map(Target::Group)
        .ok_or_else(|| DispatchError::target_not_found(address))
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::coordinator::{Device, Group};
    use crate::tests::support::MockCoordinator;

    #[rstest]
    #[case::namespaced("zigbee.0", "zigbee.0.00124b0001", "0x00124b0001")]
    #[case::namespaced_hex("zigbee.0", "zigbee.0.0x00124b0001", "0x00124b0001")]
    #[case::bare("zigbee.0", "00124b0001", "0x00124b0001")]
    #[case::already_prefixed("ns", "0x0003", "0x0003")]
    #[case::other_namespace("zigbee.0", "zigbee.1.0003", "0xzigbee.1.0003")]
    #[case::no_namespace("", "0003", "0x0003")]
    fn normalizes_addresses(#[case] namespace: &str, #[case] id: &str, #[case] expected: &str) {
        assert_eq!(normalize_address(namespace, id), expected);
    }

    #[rstest]
    #[case::group("0x0003", Some(3))]
    #[case::too_wide("0x00124b0001", None)]
    #[case::not_hex("0xlamp", None)]
    fn reads_group_identifiers(#[case] address: &str, #[case] expected: Option<u16>) {
        assert_eq!(group_id(address), expected);
    }

    #[rstest]
    fn devices_win_over_groups() {
        let mut coordinator = MockCoordinator::new();
        coordinator
            .expect_device()
            .returning(|address| Some(Device::new(address)));
        coordinator.expect_group().never();

        let target = resolve_target(&coordinator, "0x0003").expect("device");
        assert_eq!(target, Target::Device(Device::new("0x0003")));
    }

    #[rstest]
    fn falls_back_to_groups() {
        let mut coordinator = MockCoordinator::new();
        coordinator.expect_device().returning(|_| None);
        coordinator
            .expect_group()
            .withf(|id| *id == 3)
            .returning(|id| Some(Group::new(id)));

        let target = resolve_target(&coordinator, "0x0003").expect("group");
        assert_eq!(target, Target::Group(Group::new(3)));
    }

    #[rstest]
    fn reports_missing_targets() {
        let mut coordinator = MockCoordinator::new();
        coordinator.expect_device().returning(|_| None);
        coordinator.expect_group().returning(|_| None);

        let error = resolve_target(&coordinator, "0x0003").expect_err("no target");
        assert_eq!(error.to_string(), "Device or group 0x0003 not found!");
    }
}
