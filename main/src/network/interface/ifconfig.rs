use super::IdentityError;
use super::InterfaceQuery;
use super::InterfaceStatus;
use super::LocalIdentity;
use futures_util::future::BoxFuture;
use futures_util::FutureExt;

/// Reads `ifconfig` in both the BSD (macOS) and the Linux net-tools formats.
pub struct IfconfigInterfaceQuery;

impl IfconfigInterfaceQuery {
    async fn query(interface: Option<String>) -> Result<LocalIdentity, IdentityError> {
        let output = crate::process::run("ifconfig", &[]).await?;
        let statuses = Self::parse_output(&String::from_utf8_lossy(&output));
        super::select_identity(statuses, interface.as_deref())
    }

    fn parse_output(output: &str) -> Vec<InterfaceStatus> {
        let mut statuses = Vec::default();
        let mut block: Vec<&str> = Vec::default();
        for line in output.lines() {
            let starts_block = !line.is_empty() && !line.starts_with(char::is_whitespace);
            if starts_block && !block.is_empty() {
                statuses.extend(Self::parse_block(&block));
                block.clear();
            }
            block.push(line);
        }
        statuses.extend(Self::parse_block(&block));
        statuses
    }

    fn parse_block(lines: &[&str]) -> Option<InterfaceStatus> {
        let header = lines.first()?;
        let name = header
            .split_whitespace()
            .next()?
            .trim_end_matches(':')
            .to_string();
        let tokens: Vec<_> = lines.iter().flat_map(|l| l.split_whitespace()).collect();

        let value_after = |key: &str| {
            tokens
                .windows(2)
                .find(|pair| pair[0] == key)
                .map(|pair| pair[1])
        };
        let ip = value_after("inet")
            .map(|v| v.trim_start_matches("addr:"))
            .and_then(|v| v.parse().ok());
        let mac = value_after("ether")
            .or_else(|| value_after("HWaddr"))
            .and_then(|v| v.parse().ok());
        let active = match value_after("status:") {
            Some(status) => status == "active",
            None => {
                let flags = header
                    .split_once('<')
                    .and_then(|(_, rest)| rest.split_once('>'))
                    .map(|(flags, _)| flags.split(',').collect::<Vec<_>>())
                    .unwrap_or_default();
                let legacy_up = lines.iter().any(|l| l.contains("UP ") && l.contains("RUNNING"));
                (flags.contains(&"UP") && flags.contains(&"RUNNING")) || legacy_up
            }
        };

        Some(InterfaceStatus {
            name,
            active,
            ip,
            mac,
        })
    }
}

impl InterfaceQuery for IfconfigInterfaceQuery {
    fn query(
        &self,
        interface: Option<String>,
    ) -> BoxFuture<'static, Result<LocalIdentity, IdentityError>> {
        Self::query(interface).boxed()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::mac::MacAddress;
    use std::net::Ipv4Addr;

    #[test]
    fn parse_bsd_output() {
        let output = "
lo0: flags=8049<UP,LOOPBACK,RUNNING,MULTICAST> mtu 16384
\toptions=1203<RXCSUM,TXCSUM,TXSTATUS,SW_TIMESTAMP>
\tinet 127.0.0.1 netmask 0xff000000
en0: flags=8863<UP,BROADCAST,SMART,RUNNING,SIMPLEX,MULTICAST> mtu 1500
\toptions=400<CHANNEL_IO>
\tether a4:83:e7:1:2:3
\tinet6 fe80::1c8e:2f5a:9a1b:1e4f%en0 prefixlen 64 secured scopeid 0x6
\tinet 192.168.1.23 netmask 0xffffff00 broadcast 192.168.1.255
\tnd6 options=201<PERFORMNUD,DAD>
\tmedia: autoselect
\tstatus: active
en1: flags=8863<UP,BROADCAST,SMART,RUNNING,SIMPLEX,MULTICAST> mtu 1500
\tether 82:1f:12:aa:bb:cc
\tmedia: autoselect <full-duplex>
\tstatus: inactive
"
        .trim_start();
        let expected_statuses = vec![
            InterfaceStatus {
                name: "lo0".into(),
                active: true,
                ip: Some(Ipv4Addr::LOCALHOST),
                mac: None,
            },
            InterfaceStatus {
                name: "en0".into(),
                active: true,
                ip: Some(Ipv4Addr::new(192, 168, 1, 23)),
                mac: Some(MacAddress::new([0xA4, 0x83, 0xE7, 0x01, 0x02, 0x03])),
            },
            InterfaceStatus {
                name: "en1".into(),
                active: false,
                ip: None,
                mac: Some(MacAddress::new([0x82, 0x1F, 0x12, 0xAA, 0xBB, 0xCC])),
            },
        ];

        // When
        let actual_statuses = IfconfigInterfaceQuery::parse_output(output);

        // Then
        assert_eq!(actual_statuses, expected_statuses);
    }

    #[test]
    fn parse_net_tools_output() {
        let output = "
eth0: flags=4099<UP,BROADCAST,MULTICAST>  mtu 1500
        ether 11:22:33:44:55:66  txqueuelen 1000  (Ethernet)

wlan0: flags=4163<UP,BROADCAST,RUNNING,MULTICAST>  mtu 1500
        inet 10.0.0.5  netmask 255.255.255.0  broadcast 10.0.0.255
        inet6 fe80::1  prefixlen 64  scopeid 0x20<link>
        ether aa:bb:cc:11:22:33  txqueuelen 1000  (Ethernet)
"
        .trim_start();

        // When
        let statuses = IfconfigInterfaceQuery::parse_output(output);

        // Then
        assert_eq!(statuses.len(), 2);
        assert!(!statuses[0].active);
        assert_eq!(
            super::super::select_identity(statuses, None).unwrap(),
            LocalIdentity {
                ip: Ipv4Addr::new(10, 0, 0, 5),
                mac: MacAddress::new([0xAA, 0xBB, 0xCC, 0x11, 0x22, 0x33]),
            }
        );
    }

    #[test]
    fn parse_legacy_net_tools_output() {
        let output = "
wlan0     Link encap:Ethernet  HWaddr aa:bb:cc:11:22:33
          inet addr:192.168.0.9  Bcast:192.168.0.255  Mask:255.255.255.0
          UP BROADCAST RUNNING MULTICAST  MTU:1500  Metric:1
"
        .trim_start();
        let expected_statuses = vec![InterfaceStatus {
            name: "wlan0".into(),
            active: true,
            ip: Some(Ipv4Addr::new(192, 168, 0, 9)),
            mac: Some(MacAddress::new([0xAA, 0xBB, 0xCC, 0x11, 0x22, 0x33])),
        }];

        assert_eq!(
            IfconfigInterfaceQuery::parse_output(output),
            expected_statuses
        );
    }

    #[test]
    fn parse_empty_output() {
        assert!(IfconfigInterfaceQuery::parse_output("").is_empty());
    }
}
