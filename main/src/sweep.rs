use crate::network::ping::Pinger;
use crate::process::ProcessError;
use futures_util::StreamExt;
use futures_util::TryFutureExt;
use futures_util::TryStreamExt;
use serde::Serialize;
use std::net::Ipv4Addr;
use std::time::Duration;

/// Reachability of a range of addresses.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Sweep {
    pub responsive: Vec<Ipv4Addr>,
    pub unresponsive: Vec<Ipv4Addr>,
}

/// Pings every address of `range`, at most `concurrency` at a time.
///
/// Results are recorded in completion order. The first failure to run `ping` aborts the
/// sweep and kills the probes still in flight.
pub async fn sweep(
    pinger: &(dyn Pinger + Send + Sync),
    range: &[Ipv4Addr],
    timeout: Duration,
    concurrency: usize,
) -> Result<Sweep, ProcessError> {
    log::debug!(
        "Pinging {} addresses with timeout {:?}",
        range.len(),
        timeout
    );
    let sweep = futures_util::stream::iter(range.iter().copied())
        .map(|ip| pinger.ping(ip, timeout).map_ok(move |responsive| (ip, responsive)))
        .buffer_unordered(concurrency.max(1))
        .try_fold(Sweep::default(), |mut sweep, (ip, responsive)| {
            if responsive {
                sweep.responsive.push(ip);
            } else {
                sweep.unresponsive.push(ip);
            }
            futures_util::future::ok(sweep)
        })
        .await?;
    log::info!(
        "{} of {} addresses responded to ping",
        sweep.responsive.len(),
        range.len()
    );
    Ok(sweep)
}
