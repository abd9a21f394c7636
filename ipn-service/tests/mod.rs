mod fixtures;
mod validation_tests;
