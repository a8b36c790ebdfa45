// Configuration constants for the solver module
pub const DEFAULT_MAX_LENGTH: usize = 24;
pub const DEADLINE_CHECK_INTERVAL: u64 = 4096;
