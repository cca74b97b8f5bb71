// Library target exists for integration tests and criterion benchmarks.
// The binary entry point is main.rs; this file re-declares the module tree so
// that tests can import types via `wordfall::engine::*` / `wordfall::store::*`.
// Screen plumbing is only exercised through the binary, so suppress dead_code warnings.
#![allow(dead_code)]

pub mod engine;
pub mod generator;
pub mod session;
pub mod store;

// Private: required transitively by the modules above or by app tests
mod app;
mod config;
mod logging;
mod ui;
