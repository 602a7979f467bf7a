//! # vk-protocol
//!
//! Shared data models for vertex-kit.
//!
//! This crate defines the plain structures exchanged between the pipeline
//! definition scripts, the core library and the CLI:
//! - The ML pipeline settings record ([`VertexConfig`])
//! - Object storage backend settings ([`StorageSettings`])
//!
//! ## Modules
//!
//! - [`config_models`]: Pipeline settings and their declared defaults
//! - [`storage_models`]: Storage backend selection and credentials
//!
//! ## Design Principles
//!
//! - Minimal dependencies: Only serde and ts-rs
//! - TypeScript generation: All types derive `TS` for client compatibility
//! - No validation here: `vk-core` owns turning untyped input into these types

pub mod config_models;
pub mod storage_models;

// Re-export all public types for convenience
pub use config_models::*;
pub use storage_models::*;
