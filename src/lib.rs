//! Category tree synchronization engine.
//!
//! Mirrors JSON category files found under a source directory onto a
//! destination tree of directories, shortcuts and icons, tracks every entry
//! it owns, and removes destination entries no category file describes any
//! more.
//!
//! The public API is organised into layers:
//!
//! - **[`document`]**: parse category files into a [`document::CategoryNode`] tree
//! - **[`resources`]**: idempotent builders for directories, shortcuts and icons
//! - **[`interpreter`]**: recursive descent from a document to the builders
//! - **[`reconcile`]**: find and delete entries missing from the [`identity`] registry
//! - **[`commands`]**: the `sync` run tying discovery, build and reconciliation together
#![deny(clippy::or_fun_call)]
#![deny(clippy::bool_to_int_with_if)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod discovery;
pub mod document;
pub mod error;
pub mod exec;
pub mod identity;
pub mod interpreter;
pub mod logging;
pub mod platform;
pub mod prompt;
pub mod reconcile;
pub mod resources;
