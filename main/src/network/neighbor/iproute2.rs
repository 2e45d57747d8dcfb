use super::NeighborError;
use super::NeighborTable;
use crate::mac::MacAddress;
use csv::ReaderBuilder;
use futures_util::future::BoxFuture;
use futures_util::FutureExt;
use std::net::Ipv4Addr;

const LLADDR_FIELD: usize = 3;
const MAC_FIELD: usize = 4;

pub struct IpRoute2NeighborTable;

impl IpRoute2NeighborTable {
    async fn lookup(ip: Ipv4Addr) -> Result<Option<MacAddress>, NeighborError> {
        let ip_text = ip.to_string();
        let output =
            crate::process::output("ip", &["-4", "neighbor", "show", ip_text.as_str()]).await?;
        if !output.success {
            log::debug!("`ip neighbor` failed for {}", ip);
            return Ok(None);
        }
        Self::parse_output(ip, &output.stdout).map_err(Into::into)
    }

    fn parse_output(ip: Ipv4Addr, output: &[u8]) -> Result<Option<MacAddress>, csv::Error> {
        let ip_text = ip.to_string();
        for record in ReaderBuilder::new()
            .has_headers(false)
            .delimiter(b' ')
            .flexible(true)
            .from_reader(output)
            .records()
        {
            let record = record?;
            log::debug!("Scanned IP neighbor: {:?}", record);

            if record.get(0) != Some(ip_text.as_str()) {
                continue;
            }
            let state = record.iter().filter(|f| !f.is_empty()).last();
            if matches!(state, Some("FAILED") | Some("INCOMPLETE")) {
                return Ok(None);
            }
            if record.get(LLADDR_FIELD) == Some("lladdr") {
                return Ok(record.get(MAC_FIELD).and_then(|m| m.parse().ok()));
            }
        }
        Ok(None)
    }
}

impl NeighborTable for IpRoute2NeighborTable {
    fn lookup(&self, ip: Ipv4Addr) -> BoxFuture<'static, Result<Option<MacAddress>, NeighborError>> {
        Self::lookup(ip).boxed()
    }
}
