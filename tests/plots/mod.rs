//! Integration tests for plot layouts

mod layout_test;
