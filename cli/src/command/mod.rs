use crate::Command;
use crate::SearchCommand;
use anyhow::Context;
use arpsweep::network::Toolkit;
use arpsweep::Configuration;
use arpsweep::Engine;
use serde::Serialize;

pub async fn run(command: Command, configuration: Configuration) -> anyhow::Result<()> {
    let toolkit = Toolkit::detect()
        .await
        .context("Unsupported operating system")?;
    let engine = Engine::new(configuration, toolkit)?;
    log::debug!("Running with {:?}", engine.configuration());

    match command {
        Command::Whoami => print(&engine.local_identity().await?),
        Command::Range { reference } => {
            if reference.is_none() {
                engine.local_identity().await?;
            }
            print(&engine.full_range(reference)?)
        }
        Command::Discover { reference } => print(&engine.discover(reference).await?),
        Command::Ping { ips } => print(&engine.ping(&ips).await?),
        Command::Arp { ips } => print(&engine.arp(&ips).await?),
        Command::Search(query) => search(&engine, query).await,
    }
}

async fn search(engine: &Engine, query: SearchCommand) -> anyhow::Result<()> {
    let search = engine.search();
    match query {
        SearchCommand::Ip { ips, reference } => {
            print(&search.by_ip_address(ips, reference).await?)
        }
        SearchCommand::Mac { macs, reference } => {
            print(&search.by_mac_address(macs, reference).await?)
        }
        SearchCommand::Vendor {
            vendor_type,
            reference,
        } => print(&search.by_mac_type(&vendor_type, reference).await?),
    }
}

fn print(value: &impl Serialize) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
