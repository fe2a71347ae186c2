//! trust::inspector
//!
//! Find the process bound to a TCP port and read its user ids.
//!
//! # Linux
//!
//! 1. `/proc/net/tcp` then `/proc/net/tcp6`: first socket whose local port matches
//! 2. `/proc/<pid>/fd/*`: the process holding `socket:[<inode>]`
//! 3. `/proc/<pid>/status`: the `Uid:` line (real, effective, saved)
//!
//! When the owning process cannot be resolved (another user's process is
//! not readable) the socket's own uid column stands in for all three ids.
//! Sockets without an inode (TIME_WAIT) have no owner and are skipped.
//!
//! Other platforms observe nothing.

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::TrustError;

/// Real, effective and saved uid of a process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessIdentity {
    pub real: u32,
    pub effective: u32,
    pub saved: u32,
}

impl ProcessIdentity {
    /// All three ids equal to `uid`.
    pub fn uniform(uid: u32) -> Self {
        Self {
            real: uid,
            effective: uid,
            saved: uid,
        }
    }

    /// The uid when all three agree, `None` while a privilege change is in flight.
    pub fn stable(&self) -> Option<u32> {
        (self.real == self.effective && self.effective == self.saved).then_some(self.real)
    }
}

/// The process found listening on a port.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PortOwner {
    /// `None` when the identity came from the socket table alone
    pub pid: Option<u32>,
    pub identity: ProcessIdentity,
}

/// Source of port ownership information.
pub trait ProcessInspector {
    /// Owner of the first live TCP socket bound locally to `port`.
    fn owner_of_port(&self, port: u16) -> Result<Option<PortOwner>, TrustError>;
}

/// The inspector for the current platform.
pub fn system_inspector() -> Box<dyn ProcessInspector> {
    #[cfg(target_os = "linux")]
    {
        Box::new(ProcfsInspector::new())
    }
    #[cfg(not(target_os = "linux"))]
    {
        Box::new(NullInspector)
    }
}

/// Reads socket and process tables from a procfs mount.
#[derive(Debug, Clone)]
pub struct ProcfsInspector {
    root: PathBuf,
}

impl Default for ProcfsInspector {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcfsInspector {
    pub fn new() -> Self {
        Self::with_root("/proc")
    }

    /// Use a procfs tree rooted somewhere other than `/proc`.
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn read_sockets(&self, table: &str) -> Result<Vec<SocketEntry>, TrustError> {
        let path = self.root.join(table);
        match fs::read_to_string(&path) {
            Ok(content) => Ok(parse_socket_table(&content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(TrustError::Inspect(format!(
                "cannot read {}: {}",
                path.display(),
                e
            ))),
        }
    }

    fn pid_holding_inode(&self, inode: u64) -> Option<u32> {
        let needle = format!("socket:[{}]", inode);
        let entries = fs::read_dir(&self.root).ok()?;

        entries
            .flatten()
            .filter_map(|entry| entry.file_name().to_str()?.parse::<u32>().ok())
            .find(|pid| self.holds(*pid, &needle))
    }

    fn holds(&self, pid: u32, needle: &str) -> bool {
        let Ok(fds) = fs::read_dir(self.root.join(pid.to_string()).join("fd")) else {
            return false;
        };
        fds.flatten().any(|fd| {
            fs::read_link(fd.path())
                .map(|target| target.as_os_str() == needle)
                .unwrap_or(false)
        })
    }

    fn identity_of(&self, pid: u32) -> Option<ProcessIdentity> {
        let status = fs::read_to_string(self.root.join(pid.to_string()).join("status")).ok()?;
        parse_status_uids(&status)
    }
}

impl ProcessInspector for ProcfsInspector {
    fn owner_of_port(&self, port: u16) -> Result<Option<PortOwner>, TrustError> {
        for table in ["net/tcp", "net/tcp6"] {
            let sockets = self.read_sockets(table)?;
            let Some(socket) = sockets
                .into_iter()
                .find(|s| s.local_port == port && s.inode != 0)
            else {
                continue;
            };

            let owner = self
                .pid_holding_inode(socket.inode)
                .and_then(|pid| {
                    self.identity_of(pid).map(|identity| PortOwner {
                        pid: Some(pid),
                        identity,
                    })
                })
                .unwrap_or(PortOwner {
                    pid: None,
                    identity: ProcessIdentity::uniform(socket.uid),
                });
            return Ok(Some(owner));
        }
        Ok(None)
    }
}

/// Observes no sockets.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullInspector;

impl ProcessInspector for NullInspector {
    fn owner_of_port(&self, _port: u16) -> Result<Option<PortOwner>, TrustError> {
        Ok(None)
    }
}

/// Fixed port owners for deterministic testing.
#[derive(Debug, Clone, Default)]
pub struct StaticInspector {
    owners: HashMap<u16, PortOwner>,
    failure: Option<String>,
}

impl StaticInspector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Report `identity` as the owner of `port`.
    pub fn with_owner(mut self, port: u16, identity: ProcessIdentity) -> Self {
        self.owners.insert(
            port,
            PortOwner {
                pid: None,
                identity,
            },
        );
        self
    }

    /// Fail every lookup with `message`.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            owners: HashMap::new(),
            failure: Some(message.into()),
        }
    }
}

impl ProcessInspector for StaticInspector {
    fn owner_of_port(&self, port: u16) -> Result<Option<PortOwner>, TrustError> {
        if let Some(message) = &self.failure {
            return Err(TrustError::Inspect(message.clone()));
        }
        Ok(self.owners.get(&port).copied())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct SocketEntry {
    local_port: u16,
    uid: u32,
    inode: u64,
}

// sl local_address rem_address st tx:rx tr:when retrnsmt uid timeout inode
fn parse_socket_table(content: &str) -> Vec<SocketEntry> {
    content.lines().skip(1).filter_map(parse_socket_line).collect()
}

fn parse_socket_line(line: &str) -> Option<SocketEntry> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    let (_, port_hex) = fields.get(1)?.rsplit_once(':')?;
    Some(SocketEntry {
        local_port: u16::from_str_radix(port_hex, 16).ok()?,
        uid: fields.get(7)?.parse().ok()?,
        inode: fields.get(9)?.parse().ok()?,
    })
}

fn parse_status_uids(status: &str) -> Option<ProcessIdentity> {
    let line = status.lines().find_map(|l| l.strip_prefix("Uid:"))?;
    let mut ids = line.split_whitespace().map(|v| v.parse::<u32>().ok());
    Some(ProcessIdentity {
        real: ids.next()??,
        effective: ids.next()??,
        saved: ids.next()??,
    })
}
