//! Command-line interface definitions.
//!
//! Defines all CLI arguments and subcommands using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Metahead SEO metadata CLI
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Project root directory
    #[arg(short, long)]
    pub root: Option<PathBuf>,

    /// Config file name (default: metahead.toml)
    #[arg(short = 'C', long, default_value = "metahead.toml")]
    pub config: PathBuf,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Render head markup for a request path
    Render {
        /// Request path to resolve (e.g. "blog/post-1"); empty for the homepage
        #[arg(default_value = "")]
        path: String,

        /// Site id (defaults to [general].primary_site)
        #[arg(short, long)]
        site: Option<u32>,

        /// Restrict output to one container kind: tag, link, script, jsonld, title
        #[arg(short, long)]
        only: Option<String>,

        /// Override the page title
        #[arg(short, long)]
        title: Option<String>,
    },

    /// Validate configuration, content index and bundle files
    Check,
}
