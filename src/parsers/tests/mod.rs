mod extract_tests;
mod integration_tests;
