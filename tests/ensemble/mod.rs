//! Integration tests for ensemble quantiles, exports and construction

mod construct_test;
mod export_test;
mod quantiles_test;
