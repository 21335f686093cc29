//! Domain model for the wellness companion core.
//!
//! # Responsibility
//! - Define the data shapes shared by diary, catalog and profile flows.
//! - Keep catalog lookups and store operations pure.
//!
//! # Invariants
//! - Catalogs are immutable after construction; lookups never mutate.
//! - Persisted shapes serialize to the same JSON the mobile shell stores.

pub mod article;
pub mod diary;
pub mod mood;
pub mod profile;
