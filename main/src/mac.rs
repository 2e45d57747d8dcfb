use serde::Serialize;
use serde::Serializer;
use std::fmt::Display;
use std::fmt::Formatter;
use std::str::FromStr;
use thiserror::Error;

/// Link-layer hardware address.
///
/// Displayed in upper-case colon form (`AA:BB:CC:11:22:33`), which is also the form
/// partial searches are matched against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MacAddress([u8; 6]);

impl MacAddress {
    pub const fn new(octets: [u8; 6]) -> Self {
        Self(octets)
    }

    pub fn octets(&self) -> [u8; 6] {
        self.0
    }

    /// Whether `token` occurs anywhere inside this address, ignoring case.
    ///
    /// `-` separators in the token are read as `:` so Windows-style prefixes match too.
    pub fn contains(&self, token: &str) -> bool {
        let token = token.trim().to_ascii_uppercase().replace('-', ":");
        !token.is_empty() && self.to_string().contains(&token)
    }
}

impl Display for MacAddress {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let [a, b, c, d, e, g] = self.0;
        write!(
            f,
            "{:02X}:{:02X}:{:02X}:{:02X}:{:02X}:{:02X}",
            a, b, c, d, e, g
        )
    }
}

impl FromStr for MacAddress {
    type Err = MacAddressParseError;

    /// Accepts `:` or `-` separated octets, including the zero-stripped form BSD
    /// `arp` prints (`a:b:c:1:2:3`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<_> = s.trim().split(|c: char| c == ':' || c == '-').collect();
        if parts.len() != 6 {
            return Err(MacAddressParseError(s.into()));
        }

        let mut octets = [0u8; 6];
        for (octet, part) in octets.iter_mut().zip(parts) {
            if part.is_empty() || part.len() > 2 {
                return Err(MacAddressParseError(s.into()));
            }
            *octet = u8::from_str_radix(part, 16).map_err(|_| MacAddressParseError(s.into()))?;
        }
        Ok(Self(octets))
    }
}

impl Serialize for MacAddress {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
#[error("Invalid MAC address: {0}")]
pub struct MacAddressParseError(String);
