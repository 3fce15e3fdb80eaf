//! Integration tests for ensemble correlation

mod methods_test;
mod targets_test;
