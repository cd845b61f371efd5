//! Core 2-D organic growth and relaxation simulation library.
//!
//! Main components:
//! - [`graph`] — nodes, segments and the append-only graph arena.
//! - [`config`] — tunable growth and physics parameters.
//! - [`length_buffer`] — per-node accumulation of incident segment lengths.
//! - [`phases`] — growth, sizing and relaxation passes.
//! - [`simulation`] — the per-frame orchestrator and render snapshots.
//! - [`vector`] — small `Vec2` helpers shared by the passes.
//! - [`error`] — configuration and lifecycle errors.
//! - [`types`] — shared type aliases and IDs.

pub mod config;
pub mod error;
pub mod graph;
pub mod length_buffer;
pub mod phases;
pub mod simulation;
pub mod types;
pub mod vector;
