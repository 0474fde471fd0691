//! Jenkins failure report library.
//!
//! This library provides the pipeline that pulls test reports for a list of
//! Jenkins jobs, groups failing cases by class and error, and writes one
//! summary sheet per job into a spreadsheet workbook.

pub mod config;
pub mod error;
pub mod models;
pub mod services;
