//! # droidvec I/O
//!
//! Reads Android vector drawable XML into a [`droidvec_core::Scene`].
//!
//! Extraction is attribute matching over the raw text rather than full XML
//! parsing, and it never fails with a panic: every problem is reported as an
//! [`ExtractError`] whose `Display` output is suitable for showing to a user.

mod attributes;
pub mod vector;

pub use vector::{extract, ExtractError, VectorReader};
