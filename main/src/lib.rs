//! Discovers devices on the local IPv4 /24 network by sweeping it with `ping` and resolving
//! the responsive addresses through the OS neighbor table.

mod config;
mod engine;
mod host;
mod mac;
mod os;
mod process;
mod range;
mod resolution;
mod search;
mod sweep;

pub mod network;
pub mod vendor;

pub use config::Configuration;
pub use config::ConfigurationError;
pub use engine::DiscoveryError;
pub use engine::Engine;
pub use host::DiscoveryResult;
pub use host::Host;
pub use mac::MacAddress;
pub use mac::MacAddressParseError;
pub use os::OperatingSystem;
pub use os::OperatingSystemDetectError;
pub use process::ProcessError;
pub use range::full_range;
pub use range::parse_address;
pub use range::AddressError;
pub use resolution::Resolution;
pub use search::Search;
pub use search::SearchError;
pub use search::SearchMatch;
pub use search::SearchTerms;
pub use sweep::Sweep;

#[cfg(test)]
mod test {
    pub fn init() {
        let _ = env_logger::builder().is_test(true).try_init();
    }
}
