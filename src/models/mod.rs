//! Result models shared with the downstream score aggregator.

pub mod scan;
