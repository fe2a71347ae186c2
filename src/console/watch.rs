//! console::watch
//!
//! Poll the daemon's verification progress until it reaches 100% or the
//! operator presses Enter.
//!
//! This is the one command that overlaps waiting with input: between polls
//! the session's [`InputProbe`](super::input::InputProbe) is asked, without
//! blocking, whether a line has arrived. Any line (or end of input) cancels
//! the watch and returns to the prompt.

use std::thread;

use anyhow::anyhow;
use serde_json::Value;

use super::error::CommandError;
use super::session::Session;
use crate::rpc::methods::GETBLOCKCHAININFO;

/// Width of the bar in characters; each one is two percent.
pub const BAR_WIDTH: usize = 50;

/// One redraw of the progress bar, starting with a carriage return.
pub fn progress_line(progress: f64) -> String {
    let filled = ((progress / 2.0).max(0.0) as usize).min(BAR_WIDTH);
    format!(
        "\r[{:<width$}] {:>5.2}%",
        "x".repeat(filled),
        progress,
        width = BAR_WIDTH
    )
}

/// Verification progress as a percentage rounded to two places.
fn percent(info: &Value) -> Result<f64, CommandError> {
    let fraction = info
        .get("verificationprogress")
        .and_then(Value::as_f64)
        .ok_or_else(|| anyhow!("{} returned no verificationprogress", GETBLOCKCHAININFO))?;
    Ok((fraction * 100.0 * 100.0).round() / 100.0)
}

/// Run the watch loop on `session`.
pub fn watch_progress(session: &mut Session) -> Result<(), CommandError> {
    let mut progress = 0.0;
    while progress < 100.0 && !session.input_pending()? {
        let info = session.call(GETBLOCKCHAININFO, Vec::new())?;
        progress = percent(&info)?;
        session.write_raw(&progress_line(progress))?;

        if progress < 100.0 {
            thread::sleep(session.watch_interval());
        }
    }
    session.say("")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::input::ScriptedProbe;
    use crate::console::testing::session_for;
    use crate::rpc::mock::MockTransport;
    use crate::rpc::RpcError;
    use crate::trust::NullInspector;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn bar_rendering() {
        assert_eq!(
            progress_line(0.0),
            format!("\r[{}]  0.00%", " ".repeat(50))
        );
        assert_eq!(
            progress_line(42.5),
            format!("\r[{}{}] 42.50%", "x".repeat(21), " ".repeat(29))
        );
        assert_eq!(progress_line(100.0), format!("\r[{}] 100.00%", "x".repeat(50)));
    }

    #[test]
    fn runs_until_complete() {
        let dir = TempDir::new().unwrap();
        let mock = MockTransport::new();
        mock.respond(GETBLOCKCHAININFO, json!({"verificationprogress": 0.5}));
        mock.respond(GETBLOCKCHAININFO, json!({"verificationprogress": 0.99999}));
        let (mut session, output) =
            session_for(dir.path(), &mock, NullInspector, ScriptedProbe::never()).unwrap();

        watch_progress(&mut session).unwrap();

        assert_eq!(mock.calls_to(GETBLOCKCHAININFO).len(), 2);
        assert_eq!(
            output.contents(),
            format!("{}{}\n", progress_line(50.0), progress_line(100.0))
        );
    }

    #[test]
    fn input_cancels() {
        let dir = TempDir::new().unwrap();
        let mock = MockTransport::new();
        mock.respond(GETBLOCKCHAININFO, json!({"verificationprogress": 0.1}));
        let (mut session, output) =
            session_for(dir.path(), &mock, NullInspector, ScriptedProbe::after(3)).unwrap();

        watch_progress(&mut session).unwrap();

        assert_eq!(mock.calls_to(GETBLOCKCHAININFO).len(), 3);
        assert!(output.contents().ends_with(" 10.00%\n"));
    }

    #[test]
    fn pending_input_before_first_poll() {
        let dir = TempDir::new().unwrap();
        let mock = MockTransport::new();
        let (mut session, output) =
            session_for(dir.path(), &mock, NullInspector, ScriptedProbe::after(0)).unwrap();

        watch_progress(&mut session).unwrap();
        assert!(mock.calls().is_empty());
        assert_eq!(output.contents(), "\n");
    }

    #[test]
    fn rpc_failure_stops_the_watch() {
        let dir = TempDir::new().unwrap();
        let mock = MockTransport::new();
        mock.fail(
            GETBLOCKCHAININFO,
            RpcError::Status {
                status: 500,
                message: "Loading block index...".into(),
            },
        );
        let (mut session, _output) =
            session_for(dir.path(), &mock, NullInspector, ScriptedProbe::never()).unwrap();

        let err = watch_progress(&mut session).unwrap_err();
        assert!(matches!(err, CommandError::Rpc(RpcError::Status { status: 500, .. })));
    }
}
