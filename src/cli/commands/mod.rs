//! One module per subcommand.

pub mod add;
pub mod collection;
pub mod completions;
pub mod edit;
pub mod get;
pub mod list;
pub mod remove;

#[cfg(feature = "audit-log")]
pub mod audit_cmd;
