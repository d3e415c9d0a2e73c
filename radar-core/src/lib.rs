//! Radar Core: domain types, ingest, series processing and classification.
//!
//! This crate holds everything the dashboard computes that does not need a
//! runtime:
//! - Domain types (metric points, pulse quotes, risk rows, spreads, valuations)
//! - Source fetcher trait, HTTP source and ingest sanitation
//! - Windowing, downsampling and gradient split for chart panels
//! - Threshold tables and tier classification
//!
//! Aggregation, the refresh schedule and configuration live in `radar-runner`.

pub mod classify;
pub mod data;
pub mod domain;
pub mod series;
