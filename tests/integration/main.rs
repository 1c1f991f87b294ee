//! Integration test driver for `tests/integration/` submodules.
//!
//! Each `mod` below maps to a file that exercises a specific subsystem
//! against mock hardware.  All tests run on the host (x86_64) with no
//! real radio required.

use critical_section as _;

mod capture_tests;
mod emit_tests;
mod hub_tests;
mod mock_hw;
