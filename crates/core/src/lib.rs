//! Domain logic for the haven property listing service.
//!
//! This crate has no internal dependencies so the filter/sort
//! specification can be shared by the repository layer (SQL
//! translation) and any in-memory consumer without dragging in the
//! database stack.

pub mod error;
pub mod filter;
pub mod listing;
pub mod query;
pub mod types;
pub mod validate;
