//! Shell emulator over an in-memory virtual file system.
//!
//! A [`Vfs`](navigator::Vfs) is loaded from an XML document (or the built-in
//! tree) and driven through [`Shell`](commands::Shell), either line by line or
//! by playing back a script.

#![allow(clippy::enum_variant_names)]

pub mod application;
pub mod cli;
pub mod commands;
pub mod config;
pub mod ext;
pub mod filesystem;
pub mod loader;
pub mod navigator;
