//! Unit tests for the task module.
//!
//! Tests are organised by concern: domain rules, query evaluation, read-side
//! aggregation, service orchestration, and row conversion.
