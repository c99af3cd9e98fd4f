// ABOUTME: Library root for worklog — re-exports all modules for integration testing.
// ABOUTME: The binary entry point is in main.rs, which uses this crate as a library.

pub mod app;
pub mod config;
pub mod delivery;
pub mod format;
pub mod reminder;
pub mod report;
pub mod schedule;
pub mod store;
pub mod tracker;
