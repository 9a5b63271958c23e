//! Utility functions for time series analysis
//!
//! This module provides common utilities used across different algorithms.

pub mod linalg;
pub mod metrics;

pub use metrics::*;
