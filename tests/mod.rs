//! Test suite for the feedback board client
//!
//! This module organizes all tests

pub mod integration;
