use std::net::Ipv4Addr;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum AddressError {
    #[error("Invalid IPv4 address: {0}")]
    InvalidAddress(String),
}

/// Parses a dotted-quad IPv4 address.
pub fn parse_address(address: &str) -> Result<Ipv4Addr, AddressError> {
    address
        .trim()
        .parse()
        .map_err(|_| AddressError::InvalidAddress(address.into()))
}

/// Builds the candidate addresses of the /24 containing `reference`, in ascending order.
///
/// With `include_network_broadcast` the range is `.1` to `.255`, otherwise `.2` to `.254`.
pub fn full_range(reference: Ipv4Addr, include_network_broadcast: bool) -> Vec<Ipv4Addr> {
    let [a, b, c, _] = reference.octets();
    let hosts = if include_network_broadcast {
        1..=255
    } else {
        2..=254
    };
    hosts.map(|d| Ipv4Addr::new(a, b, c, d)).collect()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn range_without_endpoints() {
        let range = full_range("192.168.1.50".parse().unwrap(), false);

        assert_eq!(range.len(), 253);
        assert_eq!(range.first(), Some(&Ipv4Addr::new(192, 168, 1, 2)));
        assert_eq!(range.last(), Some(&Ipv4Addr::new(192, 168, 1, 254)));
    }

    #[test]
    fn range_with_endpoints() {
        let range = full_range("10.0.7.255".parse().unwrap(), true);

        assert_eq!(range.len(), 255);
        assert_eq!(range.first(), Some(&Ipv4Addr::new(10, 0, 7, 1)));
        assert_eq!(range.last(), Some(&Ipv4Addr::new(10, 0, 7, 255)));
    }

    #[test]
    fn range_shares_first_three_octets() {
        let reference = Ipv4Addr::new(172, 16, 4, 1);
        for include in [true, false] {
            assert!(full_range(reference, include)
                .iter()
                .all(|ip| ip.octets()[..3] == [172, 16, 4]));
        }
    }

    #[test]
    fn parse_valid_address() {
        assert_eq!(
            parse_address(" 192.168.1.7 "),
            Ok(Ipv4Addr::new(192, 168, 1, 7))
        );
    }

    #[test]
    fn parse_invalid_address() {
        for input in ["192.168.1", "192.168.1.256", "a.b.c.d", ""] {
            assert_eq!(
                parse_address(input),
                Err(AddressError::InvalidAddress(input.into()))
            );
        }
    }
}
