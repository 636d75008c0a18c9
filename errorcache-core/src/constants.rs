/// ErrorCache engine version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Minimum length of `root_cause` after trimming.
pub const MIN_ROOT_CAUSE_CHARS: usize = 20;

/// Minimum length of `fix_approach` after trimming.
pub const MIN_FIX_APPROACH_CHARS: usize = 20;

/// Question titles longer than this are truncated.
pub const MAX_TITLE_CHARS: usize = 300;

/// Minimum length of an error text used for search or submission.
pub const MIN_ERROR_TEXT_CHARS: usize = 3;

/// Only this many leading characters of an error text are stored and matched.
pub const MAX_ERROR_TEXT_CHARS: usize = 500;

/// Maximum number of fix commands per answer.
pub const MAX_COMMANDS: usize = 20;

/// Maximum length of a single fix command.
pub const MAX_COMMAND_CHARS: usize = 1_000;

/// Maximum length of an environment label.
pub const MAX_ENVIRONMENT_CHARS: usize = 100;

/// Upper bound on search results regardless of the requested limit.
pub const MAX_SEARCH_LIMIT: usize = 50;

/// Longest accepted rate-limit window (one year).
pub const MAX_WINDOW_SECS: u64 = 31_536_000;
