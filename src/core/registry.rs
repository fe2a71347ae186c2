//! core::registry
//!
//! Immutable command table: name → accepted arity, handler, optional usage.
//!
//! # Construction
//!
//! The table is assembled once at startup by a [`RegistryBuilder`], which
//! merges the command groups (core, extended, RPC-backed) and the alias
//! table. After [`RegistryBuilder::build`] the registry is never mutated.
//!
//! # Invariants
//!
//! - Command names are unique across all groups
//! - Every alias targets a registered command
//! - Names and aliases are stored lower-case

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use thiserror::Error;

/// Errors raised while assembling a registry.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("command '{0}' registered twice")]
    Duplicate(String),

    #[error("alias '{alias}' points at unknown command '{target}'")]
    UnknownAliasTarget { alias: String, target: String },

    #[error("alias '{0}' shadows a registered command")]
    AliasShadowsCommand(String),
}

/// Argument counts a command accepts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Arity {
    /// A finite set of accepted counts; handler receives the arguments positionally.
    Fixed(BTreeSet<usize>),
    /// Any count; handler receives the whole argument list as one value.
    Variadic,
}

impl Arity {
    /// Build a fixed arity set from a list of counts.
    pub fn fixed(counts: &[usize]) -> Self {
        Arity::Fixed(counts.iter().copied().collect())
    }

    /// Shorthand for commands taking no arguments.
    pub fn none() -> Self {
        Arity::fixed(&[0])
    }

    /// Whether `count` is one of the fixed accepted counts.
    pub fn accepts(&self, count: usize) -> bool {
        match self {
            Arity::Fixed(set) => set.contains(&count),
            Arity::Variadic => false,
        }
    }

    /// Whether this is the variadic marker.
    pub fn is_variadic(&self) -> bool {
        matches!(self, Arity::Variadic)
    }

    /// Whether the only accepted count is zero.
    pub fn is_nullary(&self) -> bool {
        match self {
            Arity::Fixed(set) => set.len() == 1 && set.contains(&0),
            Arity::Variadic => false,
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arity::Fixed(set) => {
                let counts: Vec<String> = set.iter().map(|c| c.to_string()).collect();
                write!(f, "[{}]", counts.join(", "))
            }
            Arity::Variadic => write!(f, "[any]"),
        }
    }
}

/// Which source a command was registered from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CommandGroup {
    /// Console housekeeping (config, help).
    Core,
    /// Console features layered over RPC (watchers, raw calls).
    Extended,
    /// One-to-one wrappers around daemon RPC methods.
    Rpc,
}

/// How a handler was invoked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Invocation<'a> {
    /// Argument count matched a fixed arity; arguments are positional.
    Positional(&'a [String]),
    /// The command is variadic; arguments arrive as a single list.
    Variadic(&'a [String]),
}

impl<'a> Invocation<'a> {
    /// The arguments, regardless of form.
    pub fn args(&self) -> &'a [String] {
        match self {
            Invocation::Positional(args) | Invocation::Variadic(args) => args,
        }
    }

    /// Positional argument at `index`, if present.
    pub fn get(&self, index: usize) -> Option<&'a str> {
        self.args().get(index).map(String::as_str)
    }
}

/// Handler signature shared by every command.
pub type Handler<C, E> = Box<dyn Fn(&mut C, Invocation<'_>) -> Result<(), E>>;

/// One registered command.
pub struct CommandSpec<C, E> {
    name: String,
    arity: Arity,
    handler: Handler<C, E>,
    usage: Option<String>,
    group: CommandGroup,
}

impl<C, E> CommandSpec<C, E> {
    /// Create a command spec. The group is assigned on registration.
    pub fn new(
        name: impl Into<String>,
        arity: Arity,
        handler: impl Fn(&mut C, Invocation<'_>) -> Result<(), E> + 'static,
    ) -> Self {
        Self {
            name: name.into().to_lowercase(),
            arity,
            handler: Box::new(handler),
            usage: None,
            group: CommandGroup::Core,
        }
    }

    /// Attach usage text shown by help listings.
    pub fn with_usage(mut self, usage: impl Into<String>) -> Self {
        self.usage = Some(usage.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn arity(&self) -> &Arity {
        &self.arity
    }

    pub fn usage(&self) -> Option<&str> {
        self.usage.as_deref()
    }

    pub fn group(&self) -> CommandGroup {
        self.group
    }

    pub(crate) fn invoke(&self, ctx: &mut C, invocation: Invocation<'_>) -> Result<(), E> {
        (self.handler)(ctx, invocation)
    }
}

impl<C, E> fmt::Debug for CommandSpec<C, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandSpec")
            .field("name", &self.name)
            .field("arity", &self.arity)
            .field("usage", &self.usage)
            .field("group", &self.group)
            .finish()
    }
}

/// Startup-time builder for a [`Registry`].
pub struct RegistryBuilder<C, E> {
    commands: Vec<CommandSpec<C, E>>,
    aliases: Vec<(String, String)>,
}

impl<C, E> Default for RegistryBuilder<C, E> {
    fn default() -> Self {
        Self {
            commands: Vec::new(),
            aliases: Vec::new(),
        }
    }
}

impl<C, E> RegistryBuilder<C, E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a single command under `group`.
    pub fn command(mut self, group: CommandGroup, mut spec: CommandSpec<C, E>) -> Self {
        spec.group = group;
        self.commands.push(spec);
        self
    }

    /// Register a batch of commands under `group`.
    pub fn extend(
        mut self,
        group: CommandGroup,
        specs: impl IntoIterator<Item = CommandSpec<C, E>>,
    ) -> Self {
        for mut spec in specs {
            spec.group = group;
            self.commands.push(spec);
        }
        self
    }

    /// Register an alias from `alias` to the canonical `target`.
    pub fn alias(mut self, alias: impl Into<String>, target: impl Into<String>) -> Self {
        self.aliases
            .push((alias.into().to_lowercase(), target.into().to_lowercase()));
        self
    }

    /// Merge everything into an immutable registry.
    ///
    /// # Errors
    ///
    /// Fails on duplicate command names, aliases that shadow a command, or
    /// aliases pointing at unknown commands.
    pub fn build(self) -> Result<Registry<C, E>, RegistryError> {
        let mut commands = BTreeMap::new();
        for spec in self.commands {
            if commands.contains_key(&spec.name) {
                return Err(RegistryError::Duplicate(spec.name));
            }
            commands.insert(spec.name.clone(), spec);
        }

        let mut aliases = BTreeMap::new();
        for (alias, target) in self.aliases {
            if commands.contains_key(&alias) {
                return Err(RegistryError::AliasShadowsCommand(alias));
            }
            if !commands.contains_key(&target) {
                return Err(RegistryError::UnknownAliasTarget { alias, target });
            }
            aliases.insert(alias, target);
        }

        Ok(Registry { commands, aliases })
    }
}

/// Immutable command and alias table.
pub struct Registry<C, E> {
    commands: BTreeMap<String, CommandSpec<C, E>>,
    aliases: BTreeMap<String, String>,
}

impl<C, E> Registry<C, E> {
    /// Look up a command by its canonical name.
    pub fn get(&self, name: &str) -> Option<&CommandSpec<C, E>> {
        self.commands.get(name)
    }

    /// Lower-case `name` and follow the alias table once.
    pub fn resolve(&self, name: &str) -> String {
        let lowered = name.to_lowercase();
        match self.aliases.get(&lowered) {
            Some(target) => target.clone(),
            None => lowered,
        }
    }

    /// Registered command names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.commands.keys().map(String::as_str)
    }

    /// Commands registered under `group`, sorted by name.
    pub fn in_group(&self, group: CommandGroup) -> impl Iterator<Item = &CommandSpec<C, E>> {
        self.commands.values().filter(move |spec| spec.group == group)
    }

    /// Alias pairs `(alias, target)` in sorted order.
    pub fn aliases(&self) -> impl Iterator<Item = (&str, &str)> {
        self.aliases.iter().map(|(a, t)| (a.as_str(), t.as_str()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.commands.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl<C, E> fmt::Debug for Registry<C, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("commands", &self.commands.keys().collect::<Vec<_>>())
            .field("aliases", &self.aliases)
            .finish()
    }
}
