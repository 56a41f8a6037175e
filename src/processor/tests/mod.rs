//! Batch processing tests
//!
//! Builds small campaign directories of ICARTT and NASA Ames files and runs
//! them through the batch processor.

pub mod basic_processing;
