use crate::config::Configuration;
use crate::config::ConfigurationError;
use crate::host::DiscoveryResult;
use crate::network::interface::IdentityError;
use crate::network::interface::LocalIdentity;
use crate::network::neighbor::NeighborError;
use crate::network::Toolkit;
use crate::process::ProcessError;
use crate::resolution::Resolution;
use crate::search::Search;
use crate::sweep::Sweep;
use std::collections::HashSet;
use std::net::Ipv4Addr;
use std::sync::PoisonError;
use std::sync::RwLock;
use thiserror::Error;
use tokio::sync::Mutex;

/// Discovers devices on the /24 network of a reference address.
///
/// The local identity is resolved lazily, at most once, and cached until
/// [`Engine::refresh_identity`] or [`Engine::forget_identity`] is called.
pub struct Engine {
    configuration: Configuration,
    toolkit: Toolkit,
    identity: RwLock<Option<LocalIdentity>>,
    identity_resolution: Mutex<()>,
}

impl Engine {
    pub fn new(configuration: Configuration, toolkit: Toolkit) -> Result<Self, ConfigurationError> {
        configuration.validate()?;
        Ok(Self {
            configuration,
            toolkit,
            identity: Default::default(),
            identity_resolution: Default::default(),
        })
    }

    /// Replaces the configuration. Switching the interface drops the cached identity.
    pub fn reconfigure(&mut self, configuration: Configuration) -> Result<(), ConfigurationError> {
        configuration.validate()?;
        if configuration.interface != self.configuration.interface {
            self.forget_identity();
        }
        self.configuration = configuration;
        Ok(())
    }

    pub fn configuration(&self) -> &Configuration {
        &self.configuration
    }

    pub fn timeout_seconds(&self) -> u8 {
        self.configuration.timeout_seconds
    }

    pub fn include_network_broadcast(&self) -> bool {
        self.configuration.include_network_broadcast
    }

    /// IP address of the running host, if already resolved.
    pub fn local_ip(&self) -> Option<Ipv4Addr> {
        self.cached_identity().map(|i| i.ip)
    }

    /// Returns the cached local identity, resolving it on first use.
    pub async fn local_identity(&self) -> Result<LocalIdentity, IdentityError> {
        self.resolve_identity(false).await
    }

    /// Queries the local identity again and replaces the cached one.
    pub async fn refresh_identity(&self) -> Result<LocalIdentity, IdentityError> {
        self.resolve_identity(true).await
    }

    pub fn forget_identity(&self) {
        *self.identity.write().unwrap_or_else(PoisonError::into_inner) = None;
    }

    /// Candidate addresses of the /24 of `reference`, or of the cached local IP when `None`.
    pub fn full_range(&self, reference: Option<Ipv4Addr>) -> Result<Vec<Ipv4Addr>, DiscoveryError> {
        let reference = reference
            .or_else(|| self.local_ip())
            .ok_or(DiscoveryError::UnknownReference)?;
        Ok(crate::range::full_range(
            reference,
            self.configuration.include_network_broadcast,
        ))
    }

    /// Pings every address of `range`.
    ///
    /// An empty range stands for the whole network of the local host, which is resolved
    /// first if needed.
    pub async fn ping(&self, range: &[Ipv4Addr]) -> Result<Sweep, DiscoveryError> {
        let range = if range.is_empty() {
            let identity = self.local_identity().await?;
            self.full_range(Some(identity.ip))?
        } else {
            deduplicate(range)
        };
        let sweep = crate::sweep::sweep(
            self.toolkit.pinger.as_ref(),
            &range,
            self.configuration.timeout(),
            self.concurrency(range.len()),
        )
        .await?;
        Ok(sweep)
    }

    /// Resolves the hardware address of every address of `range`.
    pub async fn arp(&self, range: &[Ipv4Addr]) -> Result<Resolution, DiscoveryError> {
        if range.is_empty() {
            return Err(DiscoveryError::EmptyRange);
        }
        let range = deduplicate(range);
        let resolution = crate::resolution::resolve(
            self.toolkit.neighbor_table.as_ref(),
            self.toolkit.vendor_lookup.as_ref(),
            &range,
            self.local_ip(),
            self.concurrency(range.len()),
        )
        .await?;
        Ok(resolution)
    }

    /// Sweeps the /24 of `reference`, or of the local host when `None`, and resolves
    /// every responsive address.
    pub async fn discover(
        &self,
        reference: Option<Ipv4Addr>,
    ) -> Result<DiscoveryResult, DiscoveryError> {
        let range = self.discovery_range(reference).await?;
        let sweep = self.ping(&range).await?;
        let resolution = if sweep.responsive.is_empty() {
            Resolution::default()
        } else {
            self.arp(&sweep.responsive).await?
        };

        let mut missing = sweep.unresponsive;
        missing.extend(resolution.missing);
        log::info!(
            "Discovered {} hosts, {} addresses missing",
            resolution.hosts.len(),
            missing.len()
        );
        Ok(DiscoveryResult {
            hosts: resolution.hosts,
            missing,
        })
    }

    pub fn search(&self) -> Search<'_> {
        Search::new(self)
    }

    async fn discovery_range(
        &self,
        reference: Option<Ipv4Addr>,
    ) -> Result<Vec<Ipv4Addr>, DiscoveryError> {
        let reference = match reference.or_else(|| self.local_ip()) {
            Some(reference) => reference,
            None => self.local_identity().await?.ip,
        };
        self.full_range(Some(reference))
    }

    async fn resolve_identity(&self, refresh: bool) -> Result<LocalIdentity, IdentityError> {
        let _resolution = self.identity_resolution.lock().await;
        if !refresh {
            if let Some(identity) = self.cached_identity() {
                return Ok(identity);
            }
        }

        log::debug!("Querying the local identity");
        let identity = self
            .toolkit
            .interface_query
            .query(self.configuration.interface.clone())
            .await?;
        *self.identity.write().unwrap_or_else(PoisonError::into_inner) = Some(identity.clone());
        Ok(identity)
    }

    fn cached_identity(&self) -> Option<LocalIdentity> {
        self.identity
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn concurrency(&self, range_size: usize) -> usize {
        self.configuration
            .concurrency_limit
            .map_or(range_size, |limit| limit.get().min(range_size))
    }
}

fn deduplicate(range: &[Ipv4Addr]) -> Vec<Ipv4Addr> {
    let mut seen = HashSet::new();
    range.iter().copied().filter(|ip| seen.insert(*ip)).collect()
}

#[derive(Error, Debug)]
pub enum DiscoveryError {
    #[error("Failed to resolve the local identity")]
    Identity(#[from] IdentityError),

    #[error("Failed to ping")]
    Ping(#[from] ProcessError),

    #[error("Failed to query the neighbor table")]
    Neighbor(#[from] NeighborError),

    #[error("Range must not be empty")]
    EmptyRange,

    #[error("No reference address given and the local IP address is unknown")]
    UnknownReference,
}
