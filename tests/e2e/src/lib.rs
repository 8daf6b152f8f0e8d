//! End-to-end test support for the lexis workspace

pub mod harness;
