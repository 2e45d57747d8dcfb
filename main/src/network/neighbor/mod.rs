mod bsd;
mod iproute2;
mod net_tools;

pub use self::bsd::BsdNeighborTable;
pub use self::iproute2::IpRoute2NeighborTable;
pub use self::net_tools::NetToolsNeighborTable;

use crate::mac::MacAddress;
use crate::process::ProcessError;
use futures_util::future::BoxFuture;
use mockall::automock;
use std::net::Ipv4Addr;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum NeighborError {
    #[error("Failed in running an external command")]
    ChildProcess(#[from] ProcessError),

    #[error("Failed to parse the CSV output of a child process")]
    ParseCsv(#[from] csv::Error),
}

/// The link-layer resolution table (ARP cache) of the OS.
#[automock]
pub trait NeighborTable {
    /// Looks up the hardware address of `ip`, or `None` when the table has no usable entry.
    fn lookup(&self, ip: Ipv4Addr) -> BoxFuture<'static, Result<Option<MacAddress>, NeighborError>>;
}

/// Reads the token at `field` of whitespace-separated `line` as a hardware address.
///
/// Placeholders such as `(incomplete)` are not addresses and yield `None`.
fn mac_at(line: &str, field: usize) -> Option<MacAddress> {
    let token = line.split_whitespace().nth(field)?;
    match token.parse() {
        Ok(mac) => Some(mac),
        Err(e) => {
            log::debug!("Ignoring neighbor entry `{}`: {}", line.trim(), e);
            None
        }
    }
}

fn has_no_entry(output: &str) -> bool {
    output.contains("no entry") || output.contains("(incomplete)")
}
