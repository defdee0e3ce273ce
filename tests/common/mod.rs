//! Common utilities for integration tests

#![allow(dead_code)]

pub mod test_helpers;

// Re-export commonly used items
#[allow(unused_imports)]
pub use test_helpers::{
    assert_profiles_close, base_case_grids, max_abs_difference, pulse_profile, relative_error,
};
