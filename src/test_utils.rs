// SPDX-License-Identifier: MPL-2.0
//! Test utilities for float comparisons.
//!
//! Re-exports the `approx` assertion macros so volume and rate tests compare
//! floats with a tolerance instead of `assert_eq!`.

pub use approx::assert_abs_diff_eq;
