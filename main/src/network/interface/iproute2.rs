use super::IdentityError;
use super::InterfaceQuery;
use super::InterfaceStatus;
use super::LocalIdentity;
use futures_util::future::BoxFuture;
use futures_util::FutureExt;
use serde::Deserialize;

pub struct IpRoute2InterfaceQuery;

impl IpRoute2InterfaceQuery {
    async fn query(interface: Option<String>) -> Result<LocalIdentity, IdentityError> {
        let output = crate::process::run("ip", &["-json", "address", "show"]).await?;
        let statuses = Self::parse_output(&output)?;
        super::select_identity(statuses, interface.as_deref())
    }

    fn parse_output(output: &[u8]) -> Result<Vec<InterfaceStatus>, serde_json::Error> {
        let links: Vec<Link> = serde_json::from_slice(output)?;
        links
            .iter()
            .for_each(|l| log::debug!("Scanned IP link: {:?}", l));

        let statuses = links
            .into_iter()
            .map(|l| InterfaceStatus {
                active: l.operstate == "UP",
                ip: l
                    .addr_info
                    .iter()
                    .filter(|a| a.family == "inet")
                    .find_map(|a| a.local.parse().ok()),
                mac: l.address.and_then(|a| a.parse().ok()),
                name: l.ifname,
            })
            .collect();
        Ok(statuses)
    }
}

impl InterfaceQuery for IpRoute2InterfaceQuery {
    fn query(
        &self,
        interface: Option<String>,
    ) -> BoxFuture<'static, Result<LocalIdentity, IdentityError>> {
        Self::query(interface).boxed()
    }
}

#[derive(Deserialize, Debug)]
struct Link {
    ifname: String,
    #[serde(default)]
    operstate: String,
    address: Option<String>,
    #[serde(default)]
    addr_info: Vec<AddrInfo>,
}

#[derive(Deserialize, Debug)]
struct AddrInfo {
    family: String,
    local: String,
}
