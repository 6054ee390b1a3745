mod reset_tests;
mod single_drop_tests;
