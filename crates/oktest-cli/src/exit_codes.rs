//! Exit codes for the `oktest` binary. Part of the public contract.

use oktest_core::GradingError;

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_TEST_FAILURE: i32 = 1; // Failed or locked cases remain
pub const EXIT_CONFIG_ERROR: i32 = 2; // Bad config, test file or declaration
pub const EXIT_INTERNAL_ERROR: i32 = 3; // I/O or broken interactive exchange

/// Map a structural error to its exit code.
pub fn for_error(err: &GradingError) -> i32 {
    if err.is_input_error() {
        EXIT_CONFIG_ERROR
    } else {
        EXIT_INTERNAL_ERROR
    }
}
