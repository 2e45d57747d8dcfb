use std::path::PathBuf;
use thiserror::Error;

#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub enum OperatingSystem {
    Linux,
    MacOs,
}

#[derive(Error, Debug)]
pub enum OperatingSystemDetectError {
    #[error("Error in file system")]
    FileSystem(#[from] std::io::Error),

    #[error("Unknown operating system")]
    UnknownOperatingSystem,
}

pub async fn detect_operating_system() -> Result<OperatingSystem, OperatingSystemDetectError> {
    if is_file(&["/", "System", "Library", "CoreServices", "SystemVersion.plist"]).await? {
        return Ok(OperatingSystem::MacOs);
    }
    if is_file(&["/", "proc", "sys", "kernel", "osrelease"]).await? {
        return Ok(OperatingSystem::Linux);
    }

    Err(OperatingSystemDetectError::UnknownOperatingSystem)
}

async fn is_file(path: &[&'static str]) -> std::io::Result<bool> {
    let path_buf: PathBuf = path.iter().collect();
    Ok(tokio::fs::try_exists(&path_buf).await? && tokio::fs::metadata(&path_buf).await?.is_file())
}

#[cfg(test)]
mod test {
    use super::*;

    #[cfg(target_os = "linux")]
    #[tokio::test]
    async fn can_detect() {
        let os = detect_operating_system().await.expect("OS must be known");
        assert_eq!(os, OperatingSystem::Linux);
    }

    #[tokio::test]
    async fn missing_path_is_not_a_file() {
        let exists = is_file(&["/", "__arpsweep_missing__", "file"]).await.unwrap();
        assert!(!exists);
    }
}
