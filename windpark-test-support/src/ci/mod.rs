//! Settings read from the CI environment.

pub mod property_test_profile;
