//! CLI argument definitions for tickboard.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `board` | Render the dashboard list page (filter/search/paginate) |
//! | `detail` | Show one instrument's detail card |
//! | `history` | Show one instrument's fetched price series |
//! | `sectors` | List the distinct sectors for the filter dropdown |
//!
//! # Global Options
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `--format` | `table` | Output format (table, json) |
//! | `--pretty` | `false` | Pretty-print JSON output |
//! | `--backend-url` | none | REST backend base URL (mock data when absent) |
//! | `--timeout-ms` | `5000` | Per-fetch timeout in ms |
//!
//! # Examples
//!
//! ```bash
//! # The full board, first page
//! tickboard board
//!
//! # Technology large caps under $500, page 2
//! tickboard board --sector Technology --market-cap large --price-range 100-500 --page 2
//!
//! # Search plus JSON output
//! tickboard board --search apple --format json --pretty
//!
//! # Against a live backend
//! tickboard board --backend-url http://127.0.0.1:8000/api
//! ```

use clap::{Args, Parser, Subcommand, ValueEnum};

use tickboard_core::{CapBucket, ChangeDirection};

/// Tickboard - stock dashboard in the terminal
///
/// Loads the instrument list and every price history from the bundled
/// dataset or a REST backend, then answers list/detail queries with
/// filtering, search, and pagination.
#[derive(Debug, Parser)]
#[command(
    name = "tickboard",
    author,
    version,
    about = "Stock dashboard list and detail views"
)]
pub struct Cli {
    /// Output format for results.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Pretty-print JSON output with indentation.
    #[arg(long, global = true, default_value_t = false)]
    pub pretty: bool,

    /// Base URL of a REST backend (e.g. http://127.0.0.1:8000/api).
    /// Without it, the bundled mock dataset is used.
    #[arg(long, global = true)]
    pub backend_url: Option<String>,

    /// Per-fetch timeout in milliseconds.
    #[arg(long, global = true, default_value_t = 5_000)]
    pub timeout_ms: u64,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// ASCII table format for terminal display.
    Table,
    /// Single JSON object output.
    Json,
}

/// Market-cap bucket selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CapBucketArg {
    /// Less than $2B.
    Small,
    /// $2B to $10B.
    Mid,
    /// $10B and above.
    Large,
}

impl From<CapBucketArg> for CapBucket {
    fn from(value: CapBucketArg) -> Self {
        match value {
            CapBucketArg::Small => Self::Small,
            CapBucketArg::Mid => Self::Mid,
            CapBucketArg::Large => Self::Large,
        }
    }
}

/// Daily-change direction selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ChangeArg {
    /// Zero or rising.
    Positive,
    /// Falling.
    Negative,
}

impl From<ChangeArg> for ChangeDirection {
    fn from(value: ChangeArg) -> Self {
        match value {
            ChangeArg::Positive => Self::Positive,
            ChangeArg::Negative => Self::Negative,
        }
    }
}

/// Available CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Render the dashboard list page.
    ///
    /// Applies the filter clauses, the search term, and pagination, and
    /// prints the "Showing X to Y of Z" summary.
    Board(BoardArgs),

    /// Show one instrument's detail card.
    ///
    /// Latest price and volume, daily change, market cap, and the high
    /// watermark of the fetched series.
    Detail(DetailArgs),

    /// Show one instrument's fetched price history.
    History(HistoryArgs),

    /// List the distinct sectors, in first-seen order.
    Sectors,
}

/// Arguments for the `board` command.
#[derive(Debug, Args)]
pub struct BoardArgs {
    /// Keep only this sector (exact match).
    #[arg(long)]
    pub sector: Option<String>,

    /// Keep only instruments whose latest price falls in the range.
    ///
    /// Accepts `MIN-MAX` (inclusive) or `MIN+` (open-ended),
    /// e.g. `0-50`, `100-500`, `500+`.
    #[arg(long)]
    pub price_range: Option<String>,

    /// Keep only instruments in this market-cap bucket.
    #[arg(long, value_enum)]
    pub market_cap: Option<CapBucketArg>,

    /// Keep only instruments whose daily change has this sign.
    #[arg(long, value_enum)]
    pub change: Option<ChangeArg>,

    /// Case-insensitive substring match on symbol or display name.
    #[arg(long)]
    pub search: Option<String>,

    /// 1-based page number.
    #[arg(long, default_value_t = 1)]
    pub page: usize,

    /// Rows per page.
    #[arg(long, default_value_t = 10)]
    pub page_size: usize,
}

/// Arguments for the `detail` command.
#[derive(Debug, Args)]
pub struct DetailArgs {
    /// Market symbol (e.g. AAPL).
    pub symbol: String,
}

/// Arguments for the `history` command.
#[derive(Debug, Args)]
pub struct HistoryArgs {
    /// Market symbol (e.g. AAPL).
    pub symbol: String,

    /// Show only the most recent N points.
    #[arg(long)]
    pub limit: Option<usize>,
}
