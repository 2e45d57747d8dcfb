use crate::engine::DiscoveryError;
use crate::engine::Engine;
use crate::host::Host;
use crate::range::AddressError;
use serde::Serialize;
use std::net::Ipv4Addr;
use thiserror::Error;

/// One or more search tokens: a single address or a non-empty list of them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTerms(Vec<String>);

impl SearchTerms {
    fn validate(self) -> Result<Vec<String>, SearchError> {
        if self.0.is_empty() {
            return Err(SearchError::InvalidInput("search terms must not be empty"));
        }
        if self.0.iter().any(|t| t.trim().is_empty()) {
            return Err(SearchError::InvalidInput("search terms must not be blank"));
        }
        Ok(self.0)
    }
}

impl From<&str> for SearchTerms {
    fn from(value: &str) -> Self {
        Self(vec![value.into()])
    }
}

impl From<String> for SearchTerms {
    fn from(value: String) -> Self {
        Self(vec![value])
    }
}

impl From<Vec<String>> for SearchTerms {
    fn from(value: Vec<String>) -> Self {
        Self(value)
    }
}

impl From<Vec<&str>> for SearchTerms {
    fn from(value: Vec<&str>) -> Self {
        Self(value.into_iter().map(Into::into).collect())
    }
}

impl From<&[&str]> for SearchTerms {
    fn from(value: &[&str]) -> Self {
        Self(value.iter().map(|&t| t.into()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for SearchTerms {
    fn from(value: [&str; N]) -> Self {
        Self(value.into_iter().map(Into::into).collect())
    }
}

/// Hosts matching a search, and the requested tokens no host matched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SearchMatch {
    pub matched: Vec<Host>,
    pub unmatched: Vec<String>,
}

#[derive(Error, Debug)]
pub enum SearchError {
    #[error("Invalid search input: {0}")]
    InvalidInput(&'static str),

    #[error("Invalid search input")]
    InvalidAddress(#[from] AddressError),

    #[error("Discovery failed")]
    Discovery(#[from] DiscoveryError),
}

/// Filters the result of a fresh discovery run.
pub struct Search<'a> {
    engine: &'a Engine,
}

impl<'a> Search<'a> {
    pub(crate) fn new(engine: &'a Engine) -> Self {
        Self { engine }
    }

    /// Finds the hosts having one of the requested IP addresses.
    ///
    /// Discovery covers the network of `reference`, or of the first requested address.
    pub async fn by_ip_address(
        &self,
        ips: impl Into<SearchTerms>,
        reference: Option<Ipv4Addr>,
    ) -> Result<SearchMatch, SearchError> {
        let terms = ips.into().validate()?;
        let ips = terms
            .iter()
            .map(|t| crate::range::parse_address(t))
            .collect::<Result<Vec<_>, _>>()?;
        let reference = reference.or_else(|| ips.first().copied());

        let hosts = self.engine.discover(reference).await?.hosts;
        let unmatched = terms
            .into_iter()
            .zip(&ips)
            .filter(|(_, ip)| !hosts.iter().any(|h| h.ip == **ip))
            .map(|(term, _)| term)
            .collect();
        let matched = hosts.into_iter().filter(|h| ips.contains(&h.ip)).collect();
        Ok(SearchMatch { matched, unmatched })
    }

    /// Finds the hosts whose hardware address contains one of the requested tokens.
    ///
    /// Tokens may be partial, such as a vendor prefix `AA:BB:CC`, and match regardless
    /// of case.
    pub async fn by_mac_address(
        &self,
        macs: impl Into<SearchTerms>,
        reference: Option<Ipv4Addr>,
    ) -> Result<SearchMatch, SearchError> {
        let terms = macs.into().validate()?;

        let hosts = self.engine.discover(reference).await?.hosts;
        let unmatched = terms
            .iter()
            .filter(|t| !hosts.iter().any(|h| h.mac.contains(t)))
            .cloned()
            .collect();
        let matched = hosts
            .into_iter()
            .filter(|h| terms.iter().any(|t| h.mac.contains(t)))
            .collect();
        Ok(SearchMatch { matched, unmatched })
    }

    /// Finds the hosts classified exactly as `vendor_type`.
    pub async fn by_mac_type(
        &self,
        vendor_type: &str,
        reference: Option<Ipv4Addr>,
    ) -> Result<Vec<Host>, SearchError> {
        let hosts = self.engine.discover(reference).await?.hosts;
        Ok(hosts
            .into_iter()
            .filter(|h| h.vendor_type.as_deref() == Some(vendor_type))
            .collect())
    }
}
