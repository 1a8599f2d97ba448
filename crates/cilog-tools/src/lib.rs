//! CI log intelligence.
//!
//! Turns raw CI job output into structured findings while bounding how much
//! text any caller is handed at once. Components, leaves first:
//!
//! - [`accessor`]: size classification and bounded reads over one file
//! - [`search`]: streamed regex search with context
//! - [`parsers`]: twelve per-tool extractors behind one trait
//! - [`aggregator`]: severity buckets, run status, root cause
//! - [`discovery`]: job folders from the index or a directory scan
//! - [`pipeline`]: discovery → parse → aggregate, sequential or parallel
//! - [`tools`]: everything above as JSON tools, see [`all_tools`]

pub mod accessor;
pub mod aggregator;
pub mod discovery;
pub mod error;
pub mod parsers;
pub mod pipeline;
pub mod preprocess;
pub mod search;
pub mod source;
pub mod stats;
pub mod tools;
pub mod types;

// Re-export key types for convenience
pub use accessor::{BoundedRead, LogSize, TruncationPolicy};
pub use error::{LogError, LogResult};
pub use parsers::{FormatParser, TOOLS, parse_log};
pub use pipeline::{AnalysisOptions, analyze, analyze_parallel};
pub use search::SearchOptions;
pub use source::ResultsRoot;
pub use stats::LogStats;
pub use tools::all_tools;
pub use types::{LogTool, SizeClass, ToolContext, ToolResult};
