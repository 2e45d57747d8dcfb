use crate::os::OperatingSystem;
use crate::process::CommandOutput;
use crate::process::ProcessError;
use futures_util::future::BoxFuture;
use futures_util::FutureExt;
use mockall::automock;
use std::net::Ipv4Addr;
use std::time::Duration;

/// Extra time granted to `ping` beyond its own deadline before it is killed.
const GRACE_PERIOD: Duration = Duration::from_secs(1);

#[automock]
pub trait Pinger {
    /// Whether `ip` answers an echo request within `timeout`.
    ///
    /// Only failing to run `ping` at all is an error.
    fn ping(&self, ip: Ipv4Addr, timeout: Duration) -> BoxFuture<'static, Result<bool, ProcessError>>;
}

pub struct SystemPinger {
    operating_system: OperatingSystem,
}

impl SystemPinger {
    pub fn new(operating_system: OperatingSystem) -> Self {
        Self { operating_system }
    }

    fn args(operating_system: OperatingSystem, ip: Ipv4Addr, timeout: Duration) -> Vec<String> {
        let deadline_flag = match operating_system {
            OperatingSystem::Linux => "-w",
            OperatingSystem::MacOs => "-t",
        };
        vec![
            "-c".into(),
            "1".into(),
            deadline_flag.into(),
            timeout.as_secs().max(1).to_string(),
            ip.to_string(),
        ]
    }

    async fn ping(
        operating_system: OperatingSystem,
        ip: Ipv4Addr,
        timeout: Duration,
    ) -> Result<bool, ProcessError> {
        let args = Self::args(operating_system, ip, timeout);
        let args: Vec<_> = args.iter().map(String::as_str).collect();
        let output =
            match tokio::time::timeout(timeout + GRACE_PERIOD, crate::process::output("ping", &args))
                .await
            {
                Ok(output) => output?,
                Err(_) => {
                    log::debug!("`ping` of {} overran its deadline", ip);
                    return Ok(false);
                }
            };
        let responsive = Self::is_responsive(&output);
        log::debug!("Pinged {}: responsive = {}", ip, responsive);
        Ok(responsive)
    }

    fn is_responsive(output: &CommandOutput) -> bool {
        let text = output.stdout_text();
        output.success
            && !text.contains("100% packet loss")
            && !text.contains("100.0% packet loss")
    }
}

impl Pinger for SystemPinger {
    fn ping(&self, ip: Ipv4Addr, timeout: Duration) -> BoxFuture<'static, Result<bool, ProcessError>> {
        Self::ping(self.operating_system, ip, timeout).boxed()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn output(success: bool, stdout: &str) -> CommandOutput {
        CommandOutput {
            success,
            stdout: stdout.as_bytes().to_vec(),
        }
    }

    #[test]
    fn linux_args() {
        let args = SystemPinger::args(
            OperatingSystem::Linux,
            Ipv4Addr::new(192, 168, 1, 1),
            Duration::from_secs(10),
        );
        assert_eq!(args, ["-c", "1", "-w", "10", "192.168.1.1"]);
    }

    #[test]
    fn macos_args() {
        let args = SystemPinger::args(
            OperatingSystem::MacOs,
            Ipv4Addr::new(10, 0, 0, 2),
            Duration::from_secs(3),
        );
        assert_eq!(args, ["-c", "1", "-t", "3", "10.0.0.2"]);
    }

    #[test]
    fn responsive_output() {
        let stdout = "
PING 192.168.1.1 (192.168.1.1) 56(84) bytes of data.
64 bytes from 192.168.1.1: icmp_seq=1 ttl=64 time=2.31 ms

--- 192.168.1.1 ping statistics ---
1 packets transmitted, 1 received, 0% packet loss, time 0ms
";
        assert!(SystemPinger::is_responsive(&output(true, stdout)));
    }

    #[test]
    fn unresponsive_output() {
        let linux = "1 packets transmitted, 0 received, 100% packet loss, time 0ms";
        let macos = "1 packets transmitted, 0 packets received, 100.0% packet loss";

        assert!(!SystemPinger::is_responsive(&output(true, linux)));
        assert!(!SystemPinger::is_responsive(&output(true, macos)));
        assert!(!SystemPinger::is_responsive(&output(false, "")));
    }
}
