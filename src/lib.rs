// Library target for integration tests and criterion benchmarks.
// The binary entry point is main.rs; this file re-declares the module tree so
// that tests can reach the typing core via `wordtap::session::*`.
// Some app plumbing is only exercised through the binary.
#![allow(dead_code)]

pub mod app;
pub mod config;
pub mod error;
pub mod event;
pub mod session;
pub mod ui;
pub mod words;
