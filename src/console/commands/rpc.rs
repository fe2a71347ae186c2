//! console::commands::rpc
//!
//! One console command per daemon method.
//!
//! Handlers convert their tokens with the method's declared parameter kinds,
//! call the daemon through the session (and so through the trust gate) and
//! print the result.

use crate::console::error::CommandError;
use crate::console::session::Session;
use crate::core::convert::to_bool;
use crate::core::registry::CommandSpec;
use crate::rpc::methods::{RpcMethod, GETBLOCKCHAININFO, METHODS, NON_VERBOSE_EXCLUDES};

pub fn commands() -> Vec<CommandSpec<Session, CommandError>> {
    METHODS.iter().map(command).collect()
}

fn command(method: &'static RpcMethod) -> CommandSpec<Session, CommandError> {
    let spec = if method.name == GETBLOCKCHAININFO {
        CommandSpec::new(method.name, method.arity(), |session: &mut Session, inv| {
            let verbose = inv.get(0).map(to_bool).transpose()?.unwrap_or(false);
            let exclude = if verbose { &[][..] } else { NON_VERBOSE_EXCLUDES };

            let result = session.call(GETBLOCKCHAININFO, Vec::new())?;
            session.show(&result, exclude)?;
            Ok(())
        })
    } else {
        CommandSpec::new(method.name, method.arity(), move |session: &mut Session, inv| {
            let params = method.build_params(inv.args())?;
            let result = session.call(method.name, params)?;
            session.show(&result, &[])?;
            Ok(())
        })
    };

    match method.usage {
        Some(usage) => spec.with_usage(usage),
        None => spec,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::input::ScriptedProbe;
    use crate::console::testing::{session_for, SharedOutput};
    use crate::core::convert::ConversionError;
    use crate::core::dispatch::DispatchError;
    use crate::core::registry::{CommandGroup, Registry, RegistryBuilder};
    use crate::rpc::mock::MockTransport;
    use crate::trust::NullInspector;
    use serde_json::json;
    use tempfile::TempDir;

    struct Fixture {
        reg: Registry<Session, CommandError>,
        session: Session,
        output: SharedOutput,
        mock: MockTransport,
        _dir: TempDir,
    }

    fn fixture() -> Fixture {
        let dir = TempDir::new().unwrap();
        let mock = MockTransport::new();
        let (session, output) =
            session_for(dir.path(), &mock, NullInspector, ScriptedProbe::never()).unwrap();
        let reg = RegistryBuilder::new()
            .extend(CommandGroup::Rpc, commands())
            .build()
            .unwrap();
        Fixture {
            reg,
            session,
            output,
            mock,
            _dir: dir,
        }
    }

    fn toks(s: &[&str]) -> Vec<String> {
        s.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn every_method_is_registered() {
        let f = fixture();
        assert_eq!(f.reg.len(), METHODS.len());
        for m in METHODS {
            assert_eq!(f.reg.get(m.name).unwrap().arity(), &m.arity());
        }
    }

    #[test]
    fn converts_params_by_kind() {
        let mut f = fixture();
        f.mock.respond("getrawtransaction", json!({"txid": "abc def"}));

        f.reg
            .dispatch(&mut f.session, &toks(&["getrawtransaction", "abc def", "true"]))
            .unwrap();

        let calls = f.mock.calls_to("getrawtransaction");
        assert_eq!(calls[0].params, vec![json!("abc def"), json!(1)]);
        assert_eq!(f.output.lines(), ["txid: \"abc def\""]);
    }

    #[test]
    fn omitted_optionals_are_not_sent() {
        let mut f = fixture();
        f.mock.respond("getblock", json!({"height": 1}));

        f.reg.dispatch(&mut f.session, &toks(&["getblock", "00ff"])).unwrap();
        assert_eq!(f.mock.calls()[0].params, vec![json!("00ff")]);
    }

    #[test]
    fn conversion_failure_skips_the_call() {
        let mut f = fixture();
        let err = f
            .reg
            .dispatch(&mut f.session, &toks(&["getblock", "00ff", "perhaps"]))
            .unwrap_err();

        assert!(matches!(
            err,
            DispatchError::Handler(CommandError::Conversion(ConversionError::Bool(_)))
        ));
        assert!(f.mock.calls().is_empty());
    }

    #[test]
    fn blockchaininfo_hides_softforks_unless_verbose() {
        let mut f = fixture();
        f.mock.respond(
            GETBLOCKCHAININFO,
            json!({"blocks": 5, "softforks": [], "bip9_softforks": {}}),
        );

        f.reg
            .dispatch(&mut f.session, &toks(&["getblockchaininfo"]))
            .unwrap();
        assert_eq!(f.output.lines(), ["blocks: 5"]);

        f.output.clear();
        f.reg
            .dispatch(&mut f.session, &toks(&["getblockchaininfo", "yes"]))
            .unwrap();
        assert_eq!(
            f.output.lines(),
            ["bip9_softforks: {", "}", "blocks: 5", "softforks: [", "]"]
        );
        assert!(f.mock.calls().iter().all(|c| c.params.is_empty()));
    }

    #[test]
    fn daemon_help_prints_raw() {
        let mut f = fixture();
        f.mock.respond("help", json!("getinfo\nReturns an object."));

        f.reg.dispatch(&mut f.session, &toks(&["help", "getinfo"])).unwrap();
        assert_eq!(f.output.lines(), ["getinfo", "Returns an object."]);
        assert_eq!(f.mock.calls()[0].params, vec![json!("getinfo")]);
    }
}
