//! Property-based tests for the tokenizer, dispatcher, trust gate and editor.
//!
//! These tests use proptest to verify invariants hold across
//! randomly generated inputs.

use std::cell::RefCell;
use std::rc::Rc;

use proptest::prelude::*;
use tempfile::TempDir;

use sbtc::core::registry::{Arity, CommandGroup, CommandSpec, Registry, RegistryBuilder};
use sbtc::core::tokenize::{join_quotes, JoinOutcome};
use sbtc::editor::{History, Key, LineEditor};
use sbtc::trust::{GateDecision, ProcessIdentity, StaticInspector, TrustGate, TrustStore};

/// Strategy for plain (unquoted) fragments.
fn word() -> impl Strategy<Value = String> {
    "[a-z0-9]{1,8}"
}

fn quote() -> impl Strategy<Value = char> {
    prop::sample::select(vec!['"', '\''])
}

/// Fragments of a quoted span, with the quotes attached.
fn quoted(quote: char, span: &[String]) -> Vec<String> {
    let mut fragments = span.to_vec();
    fragments[0] = format!("{}{}", quote, fragments[0]);
    let last = fragments.len() - 1;
    fragments[last] = format!("{}{}", fragments[last], quote);
    fragments
}

/// Handler calls seen by the dispatcher: (command, args).
type Seen = Rc<RefCell<Vec<(String, Vec<String>)>>>;

fn recording(name: &'static str, arity: Arity, seen: &Seen) -> CommandSpec<(), String> {
    let seen = Rc::clone(seen);
    CommandSpec::new(name, arity, move |_: &mut (), inv| {
        seen.borrow_mut()
            .push((name.to_string(), inv.args().to_vec()));
        Ok(())
    })
}

fn registry_with(arity: Arity, seen: &Seen) -> Registry<(), String> {
    RegistryBuilder::new()
        .command(CommandGroup::Rpc, recording("target", arity, seen))
        .alias("tgt", "target")
        .build()
        .unwrap()
}

fn editor_key() -> impl Strategy<Value = Key> {
    prop_oneof![
        4 => prop::char::range('a', 'z').prop_map(Key::Char),
        1 => Just(Key::Char(' ')),
        2 => Just(Key::Backspace),
        2 => Just(Key::Left),
        2 => Just(Key::Right),
        1 => Just(Key::Up),
        1 => Just(Key::Down),
        1 => Just(Key::Tab),
    ]
}

proptest! {
    /// A closed quoted span becomes exactly one token joined by single spaces.
    #[test]
    fn closed_span_joins_into_one_token(
        before in prop::collection::vec(word(), 0..4),
        span in prop::collection::vec(word(), 1..6),
        after in prop::collection::vec(word(), 0..4),
        q in quote(),
    ) {
        let mut fragments = before.clone();
        fragments.extend(quoted(q, &span));
        fragments.extend(after.clone());

        let mut expected = before;
        expected.push(span.join(" "));
        expected.extend(after);

        prop_assert_eq!(join_quotes(&fragments), JoinOutcome::Joined(expected));
    }

    /// An unclosed quote returns the input untouched.
    #[test]
    fn unclosed_span_returns_input(
        before in prop::collection::vec(word(), 0..4),
        rest in prop::collection::vec(word(), 0..5),
        opener in word(),
        q in quote(),
    ) {
        let mut fragments = before;
        fragments.push(format!("{}{}", q, opener));
        fragments.extend(rest);

        prop_assert_eq!(
            join_quotes(&fragments),
            JoinOutcome::Unterminated(fragments.clone())
        );
    }

    /// The handler runs once with exactly the given args iff the count is accepted.
    #[test]
    fn dispatch_respects_arity(
        counts in prop::collection::btree_set(0usize..5, 1..4),
        args in prop::collection::vec(word(), 0..6),
    ) {
        let seen: Seen = Rc::default();
        let counts: Vec<usize> = counts.into_iter().collect();
        let reg = registry_with(Arity::fixed(&counts), &seen);

        let mut tokens = vec!["target".to_string()];
        tokens.extend(args.clone());
        let result = reg.dispatch(&mut (), &tokens);

        if counts.contains(&args.len()) {
            prop_assert!(result.is_ok());
            prop_assert_eq!(seen.borrow().clone(), vec![("target".to_string(), args)]);
        } else {
            prop_assert!(result.is_err());
            prop_assert!(seen.borrow().is_empty());
        }
    }

    /// A variadic command always runs, with the whole argument list.
    #[test]
    fn variadic_takes_everything(args in prop::collection::vec(word(), 0..6)) {
        let seen: Seen = Rc::default();
        let reg = registry_with(Arity::Variadic, &seen);

        let mut tokens = vec!["TARGET".to_string()];
        tokens.extend(args.clone());
        let done = reg.dispatch(&mut (), &tokens).unwrap();

        prop_assert!(done.variadic);
        prop_assert_eq!(seen.borrow().clone(), vec![("target".to_string(), args)]);
    }

    /// Dispatching an alias behaves exactly like dispatching its target.
    #[test]
    fn alias_matches_target(
        counts in prop::collection::btree_set(0usize..4, 1..3),
        args in prop::collection::vec(word(), 0..4),
    ) {
        let counts: Vec<usize> = counts.into_iter().collect();

        let via_alias: Seen = Rc::default();
        let reg = registry_with(Arity::fixed(&counts), &via_alias);
        let mut tokens = vec!["tgt".to_string()];
        tokens.extend(args.clone());
        let alias_ok = reg.dispatch(&mut (), &tokens).is_ok();

        let direct: Seen = Rc::default();
        let reg = registry_with(Arity::fixed(&counts), &direct);
        tokens[0] = "target".to_string();
        let direct_ok = reg.dispatch(&mut (), &tokens).is_ok();

        prop_assert_eq!(alias_ok, direct_ok);
        prop_assert_eq!(via_alias.borrow().clone(), direct.borrow().clone());
    }

    /// The first observation is persisted once; later ones never change it.
    #[test]
    fn trust_record_is_written_once(uids in prop::collection::vec(0u32..3, 1..8)) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("sbtc.uids");
        let first = uids[0];

        for (i, uid) in uids.iter().enumerate() {
            let (store, _) = TrustStore::load(&path).unwrap();
            let inspector = StaticInspector::new().with_owner(8332, ProcessIdentity::uniform(*uid));
            let mut gate = TrustGate::new(store, Box::new(inspector), false);

            let decision = gate.check(8332).unwrap();
            let expected = if i == 0 {
                GateDecision::Adopted { uid: first }
            } else if *uid == first {
                GateDecision::Trusted { uid: first }
            } else {
                GateDecision::Mismatch { trusted: first, observed: *uid }
            };
            prop_assert_eq!(decision, expected);
        }

        let stored = std::fs::read_to_string(&path).unwrap();
        prop_assert_eq!(stored, format!("8332:{}\n", first));
    }

    /// The cursor never leaves the buffer, whatever keys arrive.
    #[test]
    fn cursor_stays_in_bounds(keys in prop::collection::vec(editor_key(), 0..60)) {
        let names = vec!["getblock".to_string(), "getblockcount".to_string(), "stop".to_string()];
        let mut history = History::new();
        history.push("getinfo");
        history.push("getblockcount");

        let mut editor = LineEditor::new(Vec::new(), "> ", &names, &history);
        editor.start().unwrap();
        for key in keys {
            editor.feed(key).unwrap();
            let buffer = editor.buffer();
            prop_assert!(buffer.cursor() <= buffer.len());
        }
    }
}
