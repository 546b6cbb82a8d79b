//! Shared helpers for the token farm contracts.
//!
//! This crate provides:
//! - [`ownership`] — a single administrator with a two-step handover.
//! - [`reentrancy`] — an operation-in-progress flag for state-changing entry
//!   points that call out to other contracts.

#![no_std]

// ── Modules ──────────────────────────────────────────────────────────────────

pub mod ownership;
pub mod reentrancy;

pub use ownership::OwnershipError;
