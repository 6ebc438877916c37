//! niri-specific implementations.
//!
//! This module provides the concrete backend for the
//! [`Compositor`](crate::traits::Compositor) trait, powered by the
//! `niri msg` CLI.
//!
//! Nothing outside this module should reference niri directly.

pub mod msg;
