//! Flutter-facing bindings for Alento.
//!
//! The binding layer stays thin: every function in [`api`] maps onto one
//! use case in `alento_core` and returns a deterministic envelope.

pub mod api;
