//! core::dispatch
//!
//! Resolve, validate and invoke a tokenized command.
//!
//! # Algorithm
//!
//! 1. Lower-case the command token and follow the alias table
//! 2. Miss → [`DispatchError::NotFound`] (caller shows generic help)
//! 3. Argument count in the fixed arity set → positional invocation
//! 4. Variadic command → the whole argument list as one value
//! 5. Otherwise → [`DispatchError::ArityMismatch`]; the handler is not called
//!
//! Handler errors are passed through unchanged in [`DispatchError::Handler`]
//! so the session loop can report them in one place.

use thiserror::Error;

use super::registry::{Arity, Invocation, Registry};

/// Why a dispatch did not complete.
#[derive(Debug, Error)]
pub enum DispatchError<E> {
    /// No command or alias with this name.
    #[error("unrecognized command '{0}'")]
    NotFound(String),

    /// Argument count outside the accepted set.
    #[error("Expected {accepted} args, received {received}.")]
    ArityMismatch {
        command: String,
        accepted: Arity,
        received: usize,
    },

    /// The handler ran and failed.
    #[error("{0}")]
    Handler(E),
}

impl<E> DispatchError<E> {
    /// Whether this is a registry miss.
    pub fn is_not_found(&self) -> bool {
        matches!(self, DispatchError::NotFound(_))
    }
}

/// A completed dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dispatched {
    /// Canonical name of the command that ran.
    pub command: String,
    /// Whether the variadic form was used.
    pub variadic: bool,
}

impl<C, E> Registry<C, E> {
    /// Dispatch `tokens` (command first) against this registry.
    pub fn dispatch(&self, ctx: &mut C, tokens: &[String]) -> Result<Dispatched, DispatchError<E>> {
        let Some((head, args)) = tokens.split_first() else {
            return Err(DispatchError::NotFound(String::new()));
        };

        let name = self.resolve(head);
        let Some(spec) = self.get(&name) else {
            return Err(DispatchError::NotFound(name));
        };

        let arity = spec.arity();
        let invocation = if arity.accepts(args.len()) {
            Invocation::Positional(args)
        } else if arity.is_variadic() {
            Invocation::Variadic(args)
        } else {
            return Err(DispatchError::ArityMismatch {
                command: name,
                accepted: arity.clone(),
                received: args.len(),
            });
        };

        spec.invoke(ctx, invocation).map_err(DispatchError::Handler)?;

        Ok(Dispatched {
            variadic: matches!(invocation, Invocation::Variadic(_)),
            command: name,
        })
    }
}
