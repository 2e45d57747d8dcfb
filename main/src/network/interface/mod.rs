mod ifconfig;
mod iproute2;

pub use self::ifconfig::IfconfigInterfaceQuery;
pub use self::iproute2::IpRoute2InterfaceQuery;

use crate::mac::MacAddress;
use crate::process::ProcessError;
use futures_util::future::BoxFuture;
use mockall::automock;
use serde::Serialize;
use std::net::Ipv4Addr;
use thiserror::Error;

/// Interface assumed to be wireless when no interface is named `wl*`.
const FALLBACK_WIRELESS_INTERFACE: &str = "en0";

/// Address of the running host on its wireless network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocalIdentity {
    pub ip: Ipv4Addr,
    pub mac: MacAddress,
}

#[derive(Error, Debug)]
pub enum IdentityError {
    #[error("No wifi connection")]
    NoWifiConnection,

    #[error("Failed to query network interfaces")]
    InterfaceQueryFailed(#[from] ProcessError),

    #[error("Failed to parse the JSON output of a child process")]
    ParseJson(#[from] serde_json::Error),
}

#[automock]
pub trait InterfaceQuery {
    /// Reads the identity of the host on `interface`, or on the detected wireless
    /// interface when `None`.
    fn query(
        &self,
        interface: Option<String>,
    ) -> BoxFuture<'static, Result<LocalIdentity, IdentityError>>;
}

/// State of one network interface as reported by the OS.
#[derive(Debug, PartialEq, Eq)]
struct InterfaceStatus {
    name: String,
    active: bool,
    ip: Option<Ipv4Addr>,
    mac: Option<MacAddress>,
}

fn select_identity(
    statuses: Vec<InterfaceStatus>,
    interface: Option<&str>,
) -> Result<LocalIdentity, IdentityError> {
    statuses
        .iter()
        .for_each(|s| log::debug!("Scanned network interface: {:?}", s));

    let selected = match interface {
        Some(name) => statuses.into_iter().find(|s| s.name == name),
        None => {
            let (wireless, others): (Vec<_>, Vec<_>) =
                statuses.into_iter().partition(|s| s.name.starts_with("wl"));
            wireless.into_iter().next().or_else(|| {
                others
                    .into_iter()
                    .find(|s| s.name == FALLBACK_WIRELESS_INTERFACE)
            })
        }
    };

    let status = selected.ok_or(IdentityError::NoWifiConnection)?;
    if !status.active {
        log::info!("Network interface {} is inactive", status.name);
        return Err(IdentityError::NoWifiConnection);
    }
    match (status.ip, status.mac) {
        (Some(ip), Some(mac)) => {
            log::info!("Local identity on {}: {} {}", status.name, ip, mac);
            Ok(LocalIdentity { ip, mac })
        }
        _ => {
            log::info!(
                "Network interface {} has no IPv4 or hardware address",
                status.name
            );
            Err(IdentityError::NoWifiConnection)
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn status(name: &str, active: bool) -> InterfaceStatus {
        InterfaceStatus {
            name: name.into(),
            active,
            ip: Some(Ipv4Addr::new(192, 168, 1, 23)),
            mac: Some(MacAddress::new([0xAA, 0xBB, 0xCC, 0x11, 0x22, 0x33])),
        }
    }

    #[test]
    fn prefer_wireless_interface() {
        let mut wlan = status("wlp2s0", true);
        wlan.ip = Some(Ipv4Addr::new(10, 0, 0, 5));
        let statuses = vec![status("lo", true), status("en0", true), wlan];

        // When
        let identity = select_identity(statuses, None).unwrap();

        // Then
        assert_eq!(identity.ip, Ipv4Addr::new(10, 0, 0, 5));
    }

    #[test]
    fn fall_back_to_en0() {
        let statuses = vec![status("lo0", true), status("en0", true)];
        let identity = select_identity(statuses, None).unwrap();
        assert_eq!(identity.ip, Ipv4Addr::new(192, 168, 1, 23));
    }

    #[test]
    fn configured_interface() {
        let mut eth = status("eth0", true);
        eth.ip = Some(Ipv4Addr::new(10, 1, 1, 1));
        let statuses = vec![status("wlan0", true), eth];

        let identity = select_identity(statuses, Some("eth0")).unwrap();

        assert_eq!(identity.ip, Ipv4Addr::new(10, 1, 1, 1));
    }

    #[test]
    fn no_wireless_interface() {
        let statuses = vec![status("lo", true), status("eth0", true)];
        let e = select_identity(statuses, None).unwrap_err();
        assert!(matches!(e, IdentityError::NoWifiConnection));
    }

    #[test]
    fn inactive_wireless_interface() {
        let statuses = vec![status("wlan0", false)];
        let e = select_identity(statuses, None).unwrap_err();
        assert!(matches!(e, IdentityError::NoWifiConnection));
    }

    #[test]
    fn wireless_interface_without_address() {
        let mut wlan = status("wlan0", true);
        wlan.ip = None;
        let e = select_identity(vec![wlan], None).unwrap_err();
        assert!(matches!(e, IdentityError::NoWifiConnection));
    }
}
