mod command;

use anyhow::Context;
use arpsweep::Configuration;
use clap::Args;
use clap::Parser;
use clap::Subcommand;
use std::net::Ipv4Addr;
use std::num::NonZeroUsize;
use std::path::PathBuf;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let configuration = cli.options.configuration().await?;
    crate::command::run(cli.command, configuration).await
}

/// Finds devices on the local network with `ping` and `arp`.
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    #[command(flatten)]
    options: Options,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args)]
struct Options {
    /// JSON configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Seconds to wait for each ping, between 1 and 60
    #[arg(long, global = true)]
    timeout: Option<u8>,

    /// Sweep .1 to .255 instead of .2 to .254
    #[arg(long, global = true)]
    include_network_broadcast: bool,

    /// Maximum number of commands running at once
    #[arg(long, global = true)]
    concurrency_limit: Option<NonZeroUsize>,

    /// Wireless interface describing this host
    #[arg(long, global = true)]
    interface: Option<String>,
}

impl Options {
    async fn configuration(&self) -> anyhow::Result<Configuration> {
        let mut configuration = match &self.config {
            Some(path) => Configuration::load(path)
                .await
                .with_context(|| format!("Failed to load configuration `{}`", path.display()))?,
            None => Configuration::default(),
        };
        if let Some(timeout) = self.timeout {
            configuration.timeout_seconds = timeout;
        }
        if self.include_network_broadcast {
            configuration.include_network_broadcast = true;
        }
        if let Some(limit) = self.concurrency_limit {
            configuration.concurrency_limit = Some(limit);
        }
        if let Some(interface) = &self.interface {
            configuration.interface = Some(interface.clone());
        }
        Ok(configuration)
    }
}

#[derive(Subcommand)]
enum Command {
    /// Prints the IP and MAC address of this host
    Whoami,

    /// Prints the addresses swept for a reference address
    Range { reference: Option<Ipv4Addr> },

    /// Finds every device on the network
    Discover {
        #[arg(long)]
        reference: Option<Ipv4Addr>,
    },

    /// Pings addresses, or the whole local network when none is given
    Ping { ips: Vec<Ipv4Addr> },

    /// Resolves the hardware addresses of addresses
    Arp {
        #[arg(required = true)]
        ips: Vec<Ipv4Addr>,
    },

    /// Finds specific devices on the network
    #[command(subcommand)]
    Search(SearchCommand),
}

#[derive(Subcommand)]
enum SearchCommand {
    /// By IP address
    Ip {
        #[arg(required = true)]
        ips: Vec<String>,

        #[arg(long)]
        reference: Option<Ipv4Addr>,
    },

    /// By full or partial MAC address
    Mac {
        #[arg(required = true)]
        macs: Vec<String>,

        #[arg(long)]
        reference: Option<Ipv4Addr>,
    },

    /// By vendor name
    Vendor {
        vendor_type: String,

        #[arg(long)]
        reference: Option<Ipv4Addr>,
    },
}
