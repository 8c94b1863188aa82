//! Per-backend command builders and output parsers.
//!
//! Each module owns one external tool family: the argv it is invoked
//! with, and the parser that turns its raw text output into structured
//! records. The orchestration core never inspects tool output directly;
//! it goes through these parsers (or the shared address extractor).

pub mod asn;
pub mod cert;
pub mod dns;
pub mod portscan;
