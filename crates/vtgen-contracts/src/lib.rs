//! Shared, version-pinned protocol identifiers.
//!
//! These constants are the single source of truth for schema/version strings
//! that appear in machine-readable I/O.

pub const VTGEN_REPORT_SCHEMA_VERSION: &str = "vtgen.report@0.1.0";
