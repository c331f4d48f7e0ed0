//! Centralized constants used across the crate.
//!
//! This module contains magic numbers and configuration values that are used
//! in multiple places or would benefit from being named constants.

use std::num::NonZeroUsize;

/// Default number of commands kept in an editing session's history
pub const DEFAULT_HISTORY_CAPACITY: NonZeroUsize = NonZeroUsize::new(100).unwrap();

/// Upper bound accepted from the config file.
/// Larger values are clamped so a typo can't pin unbounded memory.
pub const MAX_HISTORY_CAPACITY: usize = 10_000;

/// Default tracing filter (info for dependencies, debug for this crate)
pub const DEFAULT_LOG_FILTER: &str = "info,undoforge=debug";

/// Label reported for commands that don't name themselves
pub const UNNAMED_COMMAND_LABEL: &str = "command";
