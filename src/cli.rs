//! Command-line interface definitions and command handlers.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::config::{self, FlowGraphConfig};
use crate::db::store::FlowStore;
use crate::error::{FlowGraphError, Result};
use crate::graph::pipeline::FlowSession;
use crate::source;
use crate::types::{split_labels, Selection, TraversalScope};
use crate::viz;

// ---------------------------------------------------------------------------
// Argument definitions
// ---------------------------------------------------------------------------

#[derive(Debug, Parser)]
#[command(name = "flowgraph", version, about = "Explore depth-bounded flows as Sankey links")]
pub struct Cli {
    /// YAML config file (defaults to the per-user flowgraph.yaml).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log filter directive, overriding RUST_LOG (e.g. "flowgraph=debug").
    #[arg(long, global = true)]
    pub log: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print every label with its index.
    Labels(DataArgs),
    /// Recompute the diagram for a selection and print it as JSON.
    Links {
        #[command(flatten)]
        selection: SelectionArgs,
        #[arg(long, value_enum, default_value_t = OutputFormat::Indexed)]
        format: OutputFormat,
    },
    /// Print the filtered edges, reachable pairs and enumerated paths.
    Trace {
        #[command(flatten)]
        selection: SelectionArgs,
    },
    /// Copy a JSON edge list into a SQLite flows database, replacing its
    /// rows unless `--append` is given.
    Import {
        #[arg(long)]
        from: PathBuf,
        #[arg(long)]
        into: PathBuf,
        /// Keep existing rows; duplicate pairs are summed on load.
        #[arg(long)]
        append: bool,
    },
    /// Serve the HTTP API for an interactive front end.
    Serve {
        #[command(flatten)]
        data: DataArgs,
        #[arg(long)]
        host: Option<String>,
        #[arg(long)]
        port: Option<u16>,
    },
}

#[derive(Debug, Clone, Args)]
pub struct DataArgs {
    /// Dataset file (.json, .db, .sqlite, .sqlite3).
    #[arg(long)]
    pub data: Option<PathBuf>,
}

#[derive(Debug, Clone, Args)]
pub struct SelectionArgs {
    #[command(flatten)]
    pub data: DataArgs,
    /// Start label.
    #[arg(long)]
    pub start: Option<String>,
    /// Maximum number of edges per path.
    #[arg(long, allow_negative_numbers = true)]
    pub depth: Option<i64>,
    /// Comma-separated labels to include (default: all).
    #[arg(long)]
    pub include: Option<String>,
    #[arg(long, value_enum)]
    pub scope: Option<ScopeArg>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// `{nodes, links}` with one object per link.
    Indexed,
    /// Column-oriented Plotly Sankey `{node, link}`.
    Plotly,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ScopeArg {
    Included,
    Full,
}

impl From<ScopeArg> for TraversalScope {
    fn from(arg: ScopeArg) -> Self {
        match arg {
            ScopeArg::Included => Self::Included,
            ScopeArg::Full => Self::Full,
        }
    }
}

// ---------------------------------------------------------------------------
// Command handlers
// ---------------------------------------------------------------------------

/// Run a parsed command and return the text to print on stdout.
pub async fn run(cli: Cli) -> Result<Option<String>> {
    let config = config::load(cli.config.as_deref())?;

    match cli.command {
        Command::Labels(data) => {
            let session = open_session(&config, &data)?;
            let nodes: Vec<_> = session.labels().nodes().collect();
            Ok(Some(serde_json::to_string_pretty(&nodes)?))
        }
        Command::Links { selection, format } => {
            let session = open_session(&config, &selection.data)?;
            let sel = resolve_selection(&config, &session, &selection)?;
            let diagram = session.recompute(&sel);
            let text = match format {
                OutputFormat::Indexed => serde_json::to_string_pretty(&diagram)?,
                OutputFormat::Plotly => serde_json::to_string_pretty(&diagram.to_plotly())?,
            };
            Ok(Some(text))
        }
        Command::Trace { selection } => {
            let session = open_session(&config, &selection.data)?;
            let sel = resolve_selection(&config, &session, &selection)?;
            Ok(Some(serde_json::to_string_pretty(&session.trace(&sel))?))
        }
        Command::Import { from, into, append } => {
            let count = import(&from, &into, append)?;
            Ok(Some(format!("imported {count} rows into {}", into.display())))
        }
        Command::Serve { data, host, port } => {
            let session = open_session(&config, &data)?;
            let host = host.unwrap_or_else(|| config.server.host.clone());
            let port = port.unwrap_or(config.server.port);
            let addr: SocketAddr = format!("{host}:{port}")
                .parse()
                .map_err(|e| FlowGraphError::Config(format!("invalid address {host}:{port}: {e}")))?;
            viz::run_viz_server(session, config.selection.clone(), addr).await?;
            Ok(None)
        }
    }
}

/// Load the dataset named by `--data` or the config.
pub fn open_session(config: &FlowGraphConfig, data: &DataArgs) -> Result<FlowSession> {
    let path = data
        .data
        .as_ref()
        .or(config.data.as_ref())
        .ok_or_else(|| {
            FlowGraphError::Config(format!(
                "no dataset given; pass --data or set {}",
                config::ENV_DATA
            ))
        })?;
    Ok(FlowSession::new(source::load_edges(path)?))
}

fn resolve_selection(
    config: &FlowGraphConfig,
    session: &FlowSession,
    args: &SelectionArgs,
) -> Result<Selection> {
    config.selection.resolve(
        session.labels(),
        args.start.as_deref(),
        args.depth,
        args.include.as_deref().map(split_labels),
        args.scope.map(Into::into),
    )
}

/// Copy the edges of a JSON file into a flows database. Existing rows are
/// replaced unless `append` is set. Returns the number of rows written.
pub fn import(from: &Path, into: &Path, append: bool) -> Result<usize> {
    let edges = source::read_json(from)?;
    let db_path = into
        .to_str()
        .ok_or_else(|| FlowGraphError::Other(format!("non UTF-8 path: {}", into.display())))?;
    let store = FlowStore::open(db_path)?;
    if append {
        store.insert_edges(&edges)?;
    } else {
        store.replace_edges(&edges)?;
    }

    let stats = store.get_stats()?;
    tracing::info!(
        rows = edges.len(),
        total_rows = stats.rows,
        pairs = stats.pairs,
        labels = stats.labels,
        append,
        db = %into.display(),
        "import finished"
    );
    Ok(edges.len())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
