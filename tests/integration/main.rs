//! Integration tests for the tracker
//!
//! These tests use wiremock to stand up mock shops and exercise the real HTTP
//! fetcher, the run coordinator and the output writers end-to-end.

mod fetcher_tests;
mod pipeline_tests;
