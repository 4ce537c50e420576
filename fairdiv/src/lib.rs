//! CSV ingestion, CLI argument parsing, and result reporting for the
//! `fairdiv` command-line tool. The solve itself lives in `fairdiv-core`.

pub mod cli;
pub mod ingest;
pub mod quota_args;
pub mod report;

pub use cli::Args;
pub use ingest::{normalize_columns, observed_color_order, read_points_csv, IngestError};
pub use quota_args::{build_quota_map, QuotaArgError};
pub use report::{ReportError, SolveReport};
