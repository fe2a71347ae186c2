//! console::testing
//!
//! Fixtures for driving a [`Session`] without a terminal or a daemon.
//!
//! # Example
//!
//! ```ignore
//! let mock = MockTransport::new();
//! mock.respond("getblockcount", json!(42));
//! let (mut session, output) = session_for(dir.path(), &mock, NullInspector, ScriptedProbe::never())?;
//! ```

use std::cell::RefCell;
use std::io::{self, Write};
use std::path::Path;
use std::rc::Rc;
use std::time::Duration;

use super::error::CommandError;
use super::input::InputProbe;
use super::session::{Session, SessionIo, SessionSettings};
use crate::core::config::DEFAULT_RPC_HOST;
use crate::core::paths::DataDir;
use crate::rpc::mock::MockTransport;
use crate::rpc::{RpcEndpoint, RpcTransport};
use crate::trust::ProcessInspector;
use crate::ui::output::Verbosity;

/// An in-memory writer whose clones share one buffer.
#[derive(Debug, Clone, Default)]
pub struct SharedOutput {
    buffer: Rc<RefCell<Vec<u8>>>,
}

impl SharedOutput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far.
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.buffer.borrow()).into_owned()
    }

    /// Written lines, without terminators.
    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(str::to_string).collect()
    }

    pub fn clear(&self) {
        self.buffer.borrow_mut().clear();
    }
}

impl Write for SharedOutput {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Open a quiet session on `datadir` that talks to `mock`.
///
/// The watch interval is zero so progress loops run without sleeping.
pub fn session_for(
    datadir: &Path,
    mock: &MockTransport,
    inspector: impl ProcessInspector + 'static,
    probe: impl InputProbe + 'static,
) -> Result<(Session, SharedOutput), CommandError> {
    let output = SharedOutput::new();
    let transport = mock.clone();

    let settings = SessionSettings {
        datadir: DataDir::new(datadir),
        rpc_host: DEFAULT_RPC_HOST.to_string(),
        ignore_daemon_uid: false,
        watch_interval: Duration::ZERO,
        verbosity: Verbosity::Quiet,
    };
    let io = SessionIo {
        out: Box::new(output.clone()),
        connect: Box::new(move |_: RpcEndpoint| -> Box<dyn RpcTransport> {
            Box::new(transport.clone())
        }),
        inspector: Box::new(inspector),
        probe: Box::new(probe),
    };

    Ok((Session::open(settings, io)?, output))
}
