//! Extracts tabular numeric data from HTML report pages and turns it into
//! renderer-ready line and histogram chart descriptions.
//!
//! The core is [`table::Extractor`], which converts any [`table::TableSource`]
//! into an ordered sequence of labeled numeric records. [`chart`] scans a
//! parsed document for chart sections and bundles the extracted data with the
//! chart geometry the renderer expects; [`fetch`] loads documents from disk
//! or over HTTP.

pub mod chart;
pub mod fetch;
pub mod table;
