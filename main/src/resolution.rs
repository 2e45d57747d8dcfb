use crate::host::Host;
use crate::network::neighbor::NeighborError;
use crate::network::neighbor::NeighborTable;
use crate::vendor::VendorLookup;
use futures_util::StreamExt;
use futures_util::TryFutureExt;
use futures_util::TryStreamExt;
use serde::Serialize;
use std::net::Ipv4Addr;

/// Hardware addresses resolved for a range of addresses.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Resolution {
    pub hosts: Vec<Host>,
    pub missing: Vec<Ipv4Addr>,
}

/// Looks up every address of `range` in the neighbor table, at most `concurrency` at a time.
///
/// Resolved addresses become [`Host`]s classified by `vendor_lookup`; the one equal to
/// `local_ip` is flagged as the running host.
pub async fn resolve(
    neighbor_table: &(dyn NeighborTable + Send + Sync),
    vendor_lookup: &(dyn VendorLookup + Send + Sync),
    range: &[Ipv4Addr],
    local_ip: Option<Ipv4Addr>,
    concurrency: usize,
) -> Result<Resolution, NeighborError> {
    log::debug!("Resolving {} addresses", range.len());
    let resolution = futures_util::stream::iter(range.iter().copied())
        .map(|ip| neighbor_table.lookup(ip).map_ok(move |mac| (ip, mac)))
        .buffer_unordered(concurrency.max(1))
        .try_fold(Resolution::default(), |mut resolution, (ip, mac)| {
            match mac {
                Some(mac) => {
                    let host = Host {
                        ip,
                        mac,
                        vendor_type: vendor_lookup.vendor(&mac),
                        is_self: Some(ip) == local_ip,
                    };
                    log::debug!("Resolved {:?}", host);
                    resolution.hosts.push(host);
                }
                None => resolution.missing.push(ip),
            }
            futures_util::future::ok(resolution)
        })
        .await?;
    log::info!(
        "{} of {} addresses resolved to a hardware address",
        resolution.hosts.len(),
        range.len()
    );
    Ok(resolution)
}
