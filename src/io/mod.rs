//! Input/output adapters. The regression core never does I/O; these modules
//! marshal CSV columns in and results out.

pub mod export;
pub mod ingest;
