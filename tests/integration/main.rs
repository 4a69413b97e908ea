//! Integration tests for the tuivid binary

mod cli_test;
mod config_test;
mod helpers;
