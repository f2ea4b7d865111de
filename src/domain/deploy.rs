//! Deploy request and remote command construction

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Glob of the files purged from the primary host
pub const MEDIA_GLOB: &str = "*.mp3";

/// How the SSH client treats server host keys.
///
/// `AcceptAny` skips host verification entirely and is the default.
/// `KnownHosts` checks the user's `~/.ssh/known_hosts` and refuses unknown
/// or changed keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HostKeyPolicy {
    #[default]
    AcceptAny,
    KnownHosts,
}

impl HostKeyPolicy {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::AcceptAny => "accept-any",
            Self::KnownHosts => "known-hosts",
        }
    }
}

impl fmt::Display for HostKeyPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HostKeyPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "accept-any" => Ok(Self::AcceptAny),
            "known-hosts" => Ok(Self::KnownHosts),
            other => Err(format!(
                "unknown host key policy \"{}\", expected accept-any or known-hosts",
                other
            )),
        }
    }
}

/// Input for the deploy use case
#[derive(Debug, Clone)]
pub struct DeployRequest {
    pub file: PathBuf,
    pub host: String,
    pub user: String,
    pub location: String,
    pub days_keep: u32,
    pub archive_host: String,
    pub archive_location: String,
    pub private_key: PathBuf,
    pub host_key_policy: HostKeyPolicy,
}

/// Quote a value for a POSIX shell
pub fn shell_quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', r"'\''"))
}

/// Command creating a remote directory with its parents
pub fn mkdir_command(location: &str) -> String {
    format!("mkdir -p {}", shell_quote(location))
}

/// Command deleting media files older than `days_keep` days
pub fn purge_command(location: &str, days_keep: u32) -> String {
    format!(
        "find {} -type f -name '{}' -mtime +{} -exec rm -f {{}} \\;",
        shell_quote(location),
        MEDIA_GLOB,
        days_keep
    )
}

/// Remote path a local file is uploaded to: same file name inside `remote_dir`
pub fn remote_path(remote_dir: &str, local_file: &Path) -> String {
    let name = local_file
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    let dir = remote_dir.trim_end_matches('/');
    if dir.is_empty() {
        format!("/{}", name)
    } else {
        format!("{}/{}", dir, name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn host_key_policy_defaults_to_accept_any() {
        assert_eq!(HostKeyPolicy::default(), HostKeyPolicy::AcceptAny);
    }

    #[test]
    fn host_key_policy_parses() {
        assert_eq!("accept-any".parse(), Ok(HostKeyPolicy::AcceptAny));
        assert_eq!("Known-Hosts".parse(), Ok(HostKeyPolicy::KnownHosts));
        assert!("strict".parse::<HostKeyPolicy>().is_err());
    }

    #[test]
    fn mkdir_quotes_location() {
        assert_eq!(mkdir_command("/srv/media"), "mkdir -p '/srv/media'");
    }

    #[test]
    fn purge_uses_retention_days() {
        assert_eq!(
            purge_command("/srv/media", 700),
            r"find '/srv/media' -type f -name '*.mp3' -mtime +700 -exec rm -f {} \;"
        );
    }

    #[test]
    fn shell_quote_escapes_single_quotes() {
        assert_eq!(shell_quote("it's"), r"'it'\''s'");
    }

    #[test]
    fn remote_path_keeps_file_name() {
        let local = Path::new("/home/user/ump_podcast571.mp3");
        assert_eq!(
            remote_path("/data/archive/uwp/media/", local),
            "/data/archive/uwp/media/ump_podcast571.mp3"
        );
        assert_eq!(remote_path("/srv/media", local), "/srv/media/ump_podcast571.mp3");
    }
}
