mod acceptance_tests;
mod registry_tests;
mod setup_error_tests;
