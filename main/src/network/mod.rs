pub mod interface;
pub mod neighbor;
pub mod ping;

use self::interface::IfconfigInterfaceQuery;
use self::interface::InterfaceQuery;
use self::interface::IpRoute2InterfaceQuery;
use self::neighbor::BsdNeighborTable;
use self::neighbor::IpRoute2NeighborTable;
use self::neighbor::NeighborTable;
use self::neighbor::NetToolsNeighborTable;
use self::ping::Pinger;
use self::ping::SystemPinger;
use crate::os::OperatingSystem;
use crate::os::OperatingSystemDetectError;
use crate::vendor::OuiVendorLookup;
use crate::vendor::VendorLookup;

/// The external collaborators an [`Engine`](crate::Engine) drives.
pub struct Toolkit {
    pub interface_query: Box<dyn InterfaceQuery + Send + Sync>,
    pub pinger: Box<dyn Pinger + Send + Sync>,
    pub neighbor_table: Box<dyn NeighborTable + Send + Sync>,
    pub vendor_lookup: Box<dyn VendorLookup + Send + Sync>,
}

impl Toolkit {
    /// Picks the command-line tools available on the running operating system.
    pub async fn detect() -> Result<Self, OperatingSystemDetectError> {
        let operating_system = crate::os::detect_operating_system().await?;
        let toolkit = match operating_system {
            OperatingSystem::Linux if crate::process::probe("ip", &["-Version"]).await => {
                log::info!("Using `iproute2` for interface and neighbor queries");
                Self::new(
                    operating_system,
                    Box::new(IpRoute2InterfaceQuery),
                    Box::new(IpRoute2NeighborTable),
                )
            }
            OperatingSystem::Linux => {
                log::info!("Using `net-tools` for interface and neighbor queries");
                Self::new(
                    operating_system,
                    Box::new(IfconfigInterfaceQuery),
                    Box::new(NetToolsNeighborTable),
                )
            }
            OperatingSystem::MacOs => {
                log::info!("Using BSD `ifconfig` and `arp` for interface and neighbor queries");
                Self::new(
                    operating_system,
                    Box::new(IfconfigInterfaceQuery),
                    Box::new(BsdNeighborTable),
                )
            }
        };
        Ok(toolkit)
    }

    fn new(
        operating_system: OperatingSystem,
        interface_query: Box<dyn InterfaceQuery + Send + Sync>,
        neighbor_table: Box<dyn NeighborTable + Send + Sync>,
    ) -> Self {
        Self {
            interface_query,
            pinger: Box::new(SystemPinger::new(operating_system)),
            neighbor_table,
            vendor_lookup: Box::new(OuiVendorLookup),
        }
    }
}
