//! tweetswarm-io - Record ingestion for tweet datasets
//!
//! Reads a user-supplied file, parses it as an array of tweet records,
//! keeps the first [`DEFAULT_MAX_RECORDS`] elements and hands them back as a
//! plain `Vec<Record>`.
//!
//! # Design
//!
//! All readers implement the `RecordReader` trait. A failed read never yields
//! a partial dataset.

pub mod reader;
pub mod schema;

pub use reader::*;
pub use schema::*;
