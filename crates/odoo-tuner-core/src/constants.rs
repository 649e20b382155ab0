//! Fixed heuristics used by the recommendation engine.

/// Soft memory ceiling as a ratio of total memory: 9/10.
pub const SOFT_MEMORY_NUMERATOR: u128 = 9;
pub const SOFT_MEMORY_DENOMINATOR: u128 = 10;

/// Hard memory ceiling as a ratio of total memory: 3/2.
pub const HARD_MEMORY_NUMERATOR: u128 = 3;
pub const HARD_MEMORY_DENOMINATOR: u128 = 2;

/// Lowest open file limit ever recommended.
pub const MIN_NOFILE_LIMIT: u64 = 65_536;

/// Assumed shell file descriptor limit when the shell reports nothing usable.
pub const DEFAULT_SHELL_NOFILE: u64 = 1024;

/// `RLIM_INFINITY` on Linux; stands for an unlimited resource.
pub const RLIM_INFINITY: u64 = u64::MAX;

/// Cores kept free for the Odoo master/event process.
pub const RESERVED_CORES: u32 = 1;

pub const LIMIT_TIME_CPU_SECS: u64 = 1800;
pub const LIMIT_TIME_REAL_SECS: u64 = 3600;

/// 0 disables request-count based worker recycling.
pub const LIMIT_REQUEST: u64 = 0;

pub const BYTES_PER_GIB: u64 = 1024 * 1024 * 1024;
