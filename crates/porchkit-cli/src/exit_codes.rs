//! Standard exit codes for CLI operations
//!
//! These exit codes follow Unix conventions and sysexits.h where applicable.

/// Success - operation completed without errors
pub const SUCCESS: i32 = 0;

/// General error - unspecified failure
pub const ERROR: i32 = 1;

/// Changes detected - `diff --exit-code` found differences
pub const CHANGES_DETECTED: i32 = 2;

/// Package error - missing manifest, unknown resource, invalid layout
pub const PACKAGE_ERROR: i32 = 3;

/// Document error - a YAML document could not be decoded
pub const DOCUMENT_ERROR: i32 = 4;

/// IO error - file not found, permission denied, etc.
pub const IO_ERROR: i32 = 5;
