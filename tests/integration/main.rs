//! Host-side integration test entry point.
//!
//! These run on the host (x86_64) and verify the full command-dispatch
//! chain from an incoming command down to trigger-line writes without any
//! real hardware.

#![cfg(not(target_os = "espidf"))]

mod brew_service_tests;
mod mock_hw;
