//! Integration test crate for lutgen.
//!
//! This crate exists solely to hold cross-crate integration tests.
//! It depends on every lutgen library crate to verify they work together.

#[cfg(test)]
mod generation;

#[cfg(test)]
mod suggestion;

#[cfg(test)]
mod presets;
