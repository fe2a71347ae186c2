//! console::session
//!
//! State shared by every console command.
//!
//! # Design
//!
//! A session owns the daemon endpoint, the transport, the trust gate and the
//! output writer. Commands reach the daemon only through [`Session::call`],
//! which runs the trust gate before anything goes on the wire. The async
//! transport is driven on a current-thread runtime owned by the session.

use std::fmt;
use std::io::{self, Write};
use std::time::Duration;

use serde_json::Value;

use super::error::CommandError;
use super::input::{InputProbe, SharedReader, StdinProbe};
use crate::core::config::DaemonConfig;
use crate::core::paths::DataDir;
use crate::rpc::{HttpTransport, RpcEndpoint, RpcRequest, RpcTransport};
use crate::trust::{
    system_inspector, GateDecision, ProcessIdentity, ProcessInspector, TrustGate, TrustStore,
};
use crate::ui::display;
use crate::ui::output::{self, Verbosity};

/// Builds a transport for an endpoint (again after `loadconfig`).
pub type TransportFactory = Box<dyn Fn(RpcEndpoint) -> Box<dyn RpcTransport>>;

/// Settings resolved from defaults, the settings file and CLI flags.
#[derive(Debug, Clone)]
pub struct SessionSettings {
    pub datadir: DataDir,
    pub rpc_host: String,
    pub ignore_daemon_uid: bool,
    pub watch_interval: Duration,
    pub verbosity: Verbosity,
}

/// The outside world a session talks to.
pub struct SessionIo {
    pub out: Box<dyn Write>,
    pub connect: TransportFactory,
    pub inspector: Box<dyn ProcessInspector>,
    pub probe: Box<dyn InputProbe>,
}

impl SessionIo {
    /// Stdout, HTTP, procfs and `stdin`, which the plain line source shares.
    pub fn system(stdin: SharedReader<io::Stdin>) -> Self {
        Self {
            out: Box::new(io::stdout()),
            connect: Box::new(|endpoint: RpcEndpoint| -> Box<dyn RpcTransport> {
                Box::new(HttpTransport::new(endpoint))
            }),
            inspector: system_inspector(),
            probe: Box::new(StdinProbe::new(stdin)),
        }
    }
}

/// A console session.
pub struct Session {
    out: Box<dyn Write>,
    verbosity: Verbosity,
    runtime: tokio::runtime::Runtime,
    connect: TransportFactory,
    transport: Box<dyn RpcTransport>,
    endpoint: RpcEndpoint,
    gate: TrustGate,
    datadir: DataDir,
    rpc_host: String,
    watch_interval: Duration,
    probe: Box<dyn InputProbe>,
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("endpoint", &self.endpoint)
            .field("datadir", &self.datadir)
            .field("gate", &self.gate)
            .finish_non_exhaustive()
    }
}

impl Session {
    /// Load daemon settings and trust records from the datadir and connect.
    ///
    /// # Errors
    ///
    /// Fails if `bitcoin.conf` or the trust store exists but cannot be read,
    /// or the async runtime cannot start.
    pub fn open(settings: SessionSettings, io: SessionIo) -> Result<Self, CommandError> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;

        let verbosity = settings.verbosity;
        let (endpoint, store) =
            load_datadir(&settings.datadir, &settings.rpc_host, verbosity)?;
        let transport = (io.connect)(endpoint.clone());
        let gate = TrustGate::new(store, io.inspector, settings.ignore_daemon_uid);

        if gate.is_bypassed() {
            output::warn("daemon uid check disabled", verbosity);
        }

        Ok(Self {
            out: io.out,
            verbosity,
            runtime,
            connect: io.connect,
            transport,
            endpoint,
            gate,
            datadir: settings.datadir,
            rpc_host: settings.rpc_host,
            watch_interval: settings.watch_interval,
            probe: io.probe,
        })
    }

    /// Reload daemon settings and trust records, optionally from another datadir.
    pub fn reload(&mut self, datadir: Option<DataDir>) -> Result<(), CommandError> {
        let datadir = datadir.unwrap_or_else(|| self.datadir.clone());
        let (endpoint, store) = load_datadir(&datadir, &self.rpc_host, self.verbosity)?;

        self.transport = (self.connect)(endpoint.clone());
        self.endpoint = endpoint;
        self.gate.replace_store(store);
        self.datadir = datadir;
        Ok(())
    }

    /// Call `method` on the daemon, after the trust gate allows it.
    pub fn call(&mut self, method: &str, params: Vec<Value>) -> Result<Value, CommandError> {
        let port = self.endpoint.port;
        let decision = self.gate.check(port)?;
        output::debug(format!("trust gate on port {}: {:?}", port, decision), self.verbosity);

        match decision {
            GateDecision::Adopted { uid } => {
                self.say(format!("Trusting unknown port:uid, {}:{}...", port, uid))?;
            }
            GateDecision::Mismatch { trusted, observed } => {
                return Err(CommandError::Blocked {
                    port,
                    trusted: Some(trusted),
                    observed: ProcessIdentity::uniform(observed),
                });
            }
            GateDecision::Ambiguous { identity } => {
                return Err(CommandError::Blocked {
                    port,
                    trusted: self.gate.store().trusted(port),
                    observed: identity,
                });
            }
            GateDecision::Bypassed | GateDecision::Unobserved | GateDecision::Trusted { .. } => {}
        }

        output::debug(format!("rpc {} -> {}", method, self.endpoint.url()), self.verbosity);
        let request = RpcRequest::new(method, params);
        Ok(self.runtime.block_on(self.transport.call(&request))?)
    }

    /// Write one line of operator output.
    pub fn say(&mut self, line: impl fmt::Display) -> io::Result<()> {
        writeln!(self.out, "{}", line)
    }

    /// Write without a newline and flush (progress bars).
    pub fn write_raw(&mut self, text: &str) -> io::Result<()> {
        write!(self.out, "{}", text)?;
        self.out.flush()
    }

    /// Render an RPC result.
    pub fn show(&mut self, result: &Value, exclude: &[&str]) -> io::Result<()> {
        for line in display::render_lines(result, exclude) {
            writeln!(self.out, "{}", line)?;
        }
        self.out.flush()
    }

    pub fn input_pending(&mut self) -> io::Result<bool> {
        self.probe.input_pending()
    }

    pub fn watch_interval(&self) -> Duration {
        self.watch_interval
    }

    pub fn endpoint(&self) -> &RpcEndpoint {
        &self.endpoint
    }

    pub fn datadir(&self) -> &DataDir {
        &self.datadir
    }

    pub fn gate(&self) -> &TrustGate {
        &self.gate
    }

    pub fn verbosity(&self) -> Verbosity {
        self.verbosity
    }
}

fn load_datadir(
    datadir: &DataDir,
    host: &str,
    verbosity: Verbosity,
) -> Result<(RpcEndpoint, TrustStore), CommandError> {
    let (daemon, warnings) = DaemonConfig::load(&datadir.daemon_config_path())?;
    for warning in warnings {
        output::warn(
            format!("{}: {}", warning.path.display(), warning.message),
            verbosity,
        );
    }

    let (store, malformed) = TrustStore::load(datadir.trust_store_path())?;
    for record in malformed {
        output::warn(
            format!("{}: {}", store.path().display(), record),
            verbosity,
        );
    }

    output::debug(
        format!(
            "datadir {} (port {}, {} trusted port(s))",
            datadir.root().display(),
            daemon.port(),
            store.len()
        ),
        verbosity,
    );

    let endpoint = RpcEndpoint {
        host: host.to_string(),
        port: daemon.port(),
        user: daemon.rpc_user,
        password: daemon.rpc_password,
    };
    Ok((endpoint, store))
}
