//! # vk-core
//!
//! Configuration validation and object storage helpers for vertex-kit.
//!
//! This crate provides:
//! - Batch validation of untyped settings mappings into [`VertexConfig`]
//! - Settings file loading (YAML, JSON, TOML) and loading from a bucket
//! - Blob read/write helpers over pluggable object storage backends
//!
//! ## Modules
//!
//! - [`config`]: Settings validation and loading
//! - [`storage`]: Blob handles, read/write operations and backends
//!
//! [`VertexConfig`]: vk_protocol::VertexConfig

pub mod config;
pub mod storage;
