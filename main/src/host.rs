use crate::mac::MacAddress;
use serde::Serialize;
use std::net::Ipv4Addr;

/// A device whose hardware address was resolved during discovery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Host {
    pub ip: Ipv4Addr,
    pub mac: MacAddress,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vendor_type: Option<String>,
    pub is_self: bool,
}

/// Outcome of a discovery run.
///
/// Every address of the swept range is either the IP of exactly one host or listed in
/// `missing`. Ordering follows completion of the underlying commands.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DiscoveryResult {
    pub hosts: Vec<Host>,
    pub missing: Vec<Ipv4Addr>,
}
