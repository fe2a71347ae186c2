//! console::commands::core
//!
//! Session housekeeping commands.

use anyhow::anyhow;

use crate::console::error::CommandError;
use crate::console::help;
use crate::console::session::Session;
use crate::core::paths::DataDir;
use crate::core::registry::{Arity, CommandSpec};
use crate::ui::output;

pub const COPYRIGHT: &str = "Copyright (c) 2016, gijensen";

/// Core commands. `extended_help` is the listing `exthelp` prints.
pub fn commands(extended_help: Vec<String>) -> Vec<CommandSpec<Session, CommandError>> {
    vec![
        CommandSpec::new("loadconfig", Arity::fixed(&[0, 1]), |session: &mut Session, inv| {
            let datadir = inv.get(0).map(DataDir::new);
            session.reload(datadir)?;
            output::debug(
                format!("reloaded settings from {}", session.datadir().root().display()),
                session.verbosity(),
            );
            Ok(())
        })
        .with_usage("[datadir]"),
        CommandSpec::new("exthelp", Arity::none(), move |session: &mut Session, _| {
            for line in &extended_help {
                session.say(line)?;
            }
            Ok(())
        }),
        CommandSpec::new("rpchelp", Arity::none(), |session: &mut Session, _| {
            let text = session.call("help", Vec::new())?;
            let text = text
                .as_str()
                .ok_or_else(|| anyhow!("help returned {} instead of text", text))?;
            for line in help::annotate_rpc_help(text) {
                session.say(line)?;
            }
            Ok(())
        }),
        CommandSpec::new("copyright", Arity::none(), |session: &mut Session, _| {
            session.say(COPYRIGHT)?;
            Ok(())
        }),
    ]
}
