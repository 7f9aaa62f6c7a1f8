//! Task-list service library.
//!
//! Filtering, multi-key sorting with nulls last, pagination and completion
//! metrics over an in-memory task store, served over HTTP with axum.
//!
//! - [`domain`]: tasks, filter criteria, ordering, pagination and metrics
//! - [`infrastructure`]: record store, clock and configuration
//! - [`service`]: task lifecycle and query orchestration
//! - [`api`]: HTTP handlers, DTOs and routing

#![forbid(unsafe_code)]

pub mod api;
pub mod domain;
pub mod infrastructure;
pub mod service;
