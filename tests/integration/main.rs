//! Integration tests for hn-digest

mod comment_tests;
mod http_driver_tests;
mod pipeline_tests;
