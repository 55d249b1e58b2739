//! Integration tests

mod config_test;
mod input_test;
mod pipeline_test;
