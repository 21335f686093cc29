//! # Responsibility
//! Guided breathing sessions: duration choices, the session state
//! machine, and the visuals derived from accumulated active time.
//!
//! # Invariants
//! - All timing flows through `BreathingSession::advance`; there is no
//!   second clock.
//!
//! # See also
//! - `crate::service` for the diary side of the app.

pub mod session;
