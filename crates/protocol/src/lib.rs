//! Wire types for the functional-test automation protocol.
//!
//! This crate contains the serde-serializable value types exchanged with an
//! automation engine session: element queries and identifiers, geometry,
//! pointer actions, and cookies.
//!
//! # Design Philosophy
//!
//! Types in this crate are:
//! - **Pure data**: no behavior beyond construction helpers and serde
//! - **Engine-facing**: the vocabulary a session driver consumes
//! - **Value-like**: no identity or lifecycle beyond the call that produced them
//!
//! The normalized command surface built on top of these types lives in
//! `ftc-rs`.

pub mod cookie;
pub mod query;
pub mod types;

pub use cookie::*;
pub use query::*;
pub use types::*;
