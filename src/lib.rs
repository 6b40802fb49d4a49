/// A single ledger entry and the rules for changing its balance.
/// State is modified using events, which are produced by validating a request
pub mod account;

/// Parsing of operator input: menu choices, amounts and holder names.
pub mod command;

/// Account registry interface, plus "in memory" implementation.
/// Owns the accounts and hands out their ids
///
/// NOTE: a single owner with `&mut self` access is all the synchronization there is.
/// Sharing a registry between actors would need a lock over the map or per account.
pub mod registry;

/// Interactive menu session on top of [`registry`]. Kept in the library so that
/// integration tests can script whole sessions.
pub mod bin_utils;
