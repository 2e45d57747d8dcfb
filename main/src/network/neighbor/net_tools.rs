use super::NeighborError;
use super::NeighborTable;
use crate::mac::MacAddress;
use futures_util::future::BoxFuture;
use futures_util::FutureExt;
use std::net::Ipv4Addr;

const ENTRY_LINE: usize = 1;
const MAC_FIELD: usize = 2;

/// `arp` of the Linux net-tools package, which prints a table with a header line.
pub struct NetToolsNeighborTable;

impl NetToolsNeighborTable {
    async fn lookup(ip: Ipv4Addr) -> Result<Option<MacAddress>, NeighborError> {
        let ip_text = ip.to_string();
        let output = crate::process::output("arp", &["-n", ip_text.as_str()]).await?;
        if !output.success {
            log::debug!("`arp` failed for {}", ip);
            return Ok(None);
        }
        Ok(Self::parse_output(&output.stdout_text()))
    }

    fn parse_output(output: &str) -> Option<MacAddress> {
        if super::has_no_entry(output) {
            return None;
        }
        let line = output.lines().nth(ENTRY_LINE)?;
        super::mac_at(line, MAC_FIELD)
    }
}

impl NeighborTable for NetToolsNeighborTable {
    fn lookup(&self, ip: Ipv4Addr) -> BoxFuture<'static, Result<Option<MacAddress>, NeighborError>> {
        Self::lookup(ip).boxed()
    }
}
