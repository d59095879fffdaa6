/// Account aggregate: validated requisites, balance, and the append-only
/// transaction history, mutated only through deposit/withdraw.
pub mod account;

/// Stateless attribute search over a collection of [`account::Account`]s.
pub mod search;

/// Bank registry interface, plus the "in memory" implementation keyed by
/// account number.
pub mod bank;

/// Ideally, this module should exist as its own crate, as a way to
/// bootstrap core logic. However, I want to use it for integration test
/// so I put it here.
pub mod bin_utils;
