//! split-tests - split a test suite into CI containers of even duration
//!
//! This library provides timing reconciliation and balanced partitioning of
//! test files across parallel CI containers, with timing sources for JUnit
//! XML reports, CircleCI build history and a line-count proxy.

pub mod balance;
pub mod bias;
pub mod cli;
pub mod config;
pub mod discovery;
pub mod error;
pub mod pipeline;
pub mod report;
pub mod sources;
pub mod timing;
