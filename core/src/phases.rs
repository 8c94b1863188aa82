//! The individual reconnaissance phases. Each one fans out through the
//! bounded pool, folds worker results into its own return value at the
//! fan-in, and leaves merging into the shared aggregate to the pipeline.

pub mod asn;
pub mod cert;
pub mod dns;
pub mod rdns;
