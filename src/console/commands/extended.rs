//! console::commands::extended
//!
//! Console features built on top of the RPC methods.

use crate::console::error::CommandError;
use crate::console::session::Session;
use crate::console::watch;
use crate::core::convert::to_json_or_string;
use crate::core::registry::{Arity, CommandSpec};

const RPCRAW_USAGE: &str = "<method> [params...]";

pub fn commands() -> Vec<CommandSpec<Session, CommandError>> {
    vec![
        CommandSpec::new("watchprogress", Arity::none(), |session: &mut Session, _| {
            watch::watch_progress(session)
        }),
        CommandSpec::new("rpcraw", Arity::Variadic, |session: &mut Session, inv| {
            let Some((method, params)) = inv.args().split_first() else {
                return Err(CommandError::Usage(format!("rpcraw {}", RPCRAW_USAGE)));
            };
            let params = params.iter().map(|p| to_json_or_string(p)).collect();
            let result = session.call(method, params)?;
            session.show(&result, &[])?;
            Ok(())
        })
        .with_usage(RPCRAW_USAGE),
    ]
}
