//! trust::store
//!
//! Append-only record of which uid owns the daemon on each RPC port.
//!
//! # Format
//!
//! `<datadir>/sbtc.uids` holds one `port:uid` record per line. Records are
//! only ever appended; the file is never rewritten. If a port appears more
//! than once (two sessions racing on first contact) the earliest line wins.
//!
//! # Example
//!
//! ```
//! use sbtc::trust::TrustStore;
//!
//! let dir = tempfile::tempdir().unwrap();
//! let (mut store, _) = TrustStore::load(dir.path().join("sbtc.uids")).unwrap();
//!
//! assert!(store.record(8332, 1000).unwrap());
//! assert!(!store.record(8332, 1000).unwrap());
//! assert_eq!(store.trusted(8332), Some(1000));
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use super::TrustError;

/// A line in the store that could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MalformedRecord {
    /// 1-based line number
    pub line: usize,
    pub content: String,
}

impl fmt::Display for MalformedRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ignoring malformed trust record on line {}: '{}'",
            self.line, self.content
        )
    }
}

/// Trusted port → uid records backed by an append-only file.
#[derive(Debug, Clone)]
pub struct TrustStore {
    path: PathBuf,
    records: BTreeMap<u16, u32>,
    /// The file's last line has no terminator yet.
    unterminated: bool,
}

impl TrustStore {
    /// Load the store at `path`. A missing file is an empty store.
    ///
    /// # Errors
    ///
    /// Returns `TrustError::Read` if the file exists but cannot be read.
    pub fn load(path: impl Into<PathBuf>) -> Result<(Self, Vec<MalformedRecord>), TrustError> {
        let path = path.into();
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => String::new(),
            Err(source) => return Err(TrustError::Read { path, source }),
        };

        let unterminated = !content.is_empty() && !content.ends_with('\n');
        let mut records = BTreeMap::new();
        let mut malformed = Vec::new();

        for (index, line) in content.lines().enumerate() {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            match parse_record(trimmed) {
                Some((port, uid)) => {
                    records.entry(port).or_insert(uid);
                }
                None => malformed.push(MalformedRecord {
                    line: index + 1,
                    content: trimmed.to_string(),
                }),
            }
        }

        Ok((
            Self {
                path,
                records,
                unterminated,
            },
            malformed,
        ))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The uid trusted for `port`, if one was recorded.
    pub fn trusted(&self, port: u16) -> Option<u32> {
        self.records.get(&port).copied()
    }

    /// Trust `uid` for `port` and append the record.
    ///
    /// Returns `false` without touching the file when `port` already has a
    /// record, whatever its uid.
    ///
    /// # Errors
    ///
    /// Returns `TrustError::Write` if the record cannot be appended. The
    /// in-memory table is only updated after a successful append.
    pub fn record(&mut self, port: u16, uid: u32) -> Result<bool, TrustError> {
        if self.records.contains_key(&port) {
            return Ok(false);
        }

        let write_err = |source| TrustError::Write {
            path: self.path.clone(),
            source,
        };

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(write_err)?;
        let separator = if self.unterminated { "\n" } else { "" };
        file.write_all(format!("{}{}:{}\n", separator, port, uid).as_bytes())
            .map_err(write_err)?;

        self.unterminated = false;
        self.records.insert(port, uid);
        Ok(true)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All records in port order.
    pub fn records(&self) -> impl Iterator<Item = (u16, u32)> + '_ {
        self.records.iter().map(|(p, u)| (*p, *u))
    }
}

fn parse_record(line: &str) -> Option<(u16, u32)> {
    let (port, uid) = line.split_once(':')?;
    Some((port.trim().parse().ok()?, uid.trim().parse().ok()?))
}
