//! console::help
//!
//! Help listings shown by the console.

use crate::core::registry::{CommandGroup, CommandSpec, Registry};
use crate::rpc::methods;

/// Header of the `exthelp` listing.
pub const EXTENDED_HEADER: &str = "Extended functions provided by sbtc:";

/// Footer of the `rpchelp` listing.
pub const UNSUPPORTED_LEGEND: &str = "* = Unsupported";

/// The generic command list, shown on an empty line or an unknown command.
///
/// Commands taking exactly zero arguments are listed bare; the rest carry
/// their accepted counts.
pub fn command_list<C, E>(registry: &Registry<C, E>) -> String {
    let mut entries = vec!["exit".to_string()];
    for spec in registry.in_group(CommandGroup::Core) {
        if spec.arity().is_nullary() {
            entries.push(spec.name().to_string());
        } else {
            entries.push(format!("{} ({} args)", spec.name(), spec.arity()));
        }
    }
    format!("Commands: {}", entries.join(", "))
}

/// The `exthelp` listing for a set of extended commands, sorted by name.
pub fn extended_help<C, E>(specs: &[CommandSpec<C, E>]) -> Vec<String> {
    let mut sorted: Vec<&CommandSpec<C, E>> = specs.iter().collect();
    sorted.sort_by(|a, b| a.name().cmp(b.name()));

    let mut lines = vec![EXTENDED_HEADER.to_string()];
    lines.extend(sorted.into_iter().map(|spec| match spec.usage() {
        Some(usage) => format!(" {} {}", spec.name(), usage),
        None if spec.arity().is_nullary() => format!(" {}", spec.name()),
        None => format!(" {} ({} args)", spec.name(), spec.arity()),
    }));
    lines
}

/// Mark the daemon's `help` output with the methods the console lacks.
///
/// Section headers (`== Wallet ==`) and blank lines pass through untouched.
pub fn annotate_rpc_help(text: &str) -> Vec<String> {
    let mut lines: Vec<String> = text
        .lines()
        .map(|line| {
            if line.is_empty() || line.starts_with('=') {
                return line.to_string();
            }
            match line.split_whitespace().next() {
                Some(name) if !methods::is_supported(name) => format!("*{}", line),
                _ => line.to_string(),
            }
        })
        .collect();
    lines.push(UNSUPPORTED_LEGEND.to_string());
    lines
}
