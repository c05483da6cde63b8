use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Resolve manga, chapter and page locators from supported reader sites
#[derive(Parser)]
#[command(name = "mangadl")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Config file (defaults to the platform config dir)
    #[arg(short, long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List registered services and the hosts they answer for
    Services,
    /// Tell whether a URL is a manga or a chapter, and print its name
    Identify {
        url: String,
    },
    /// List the chapters of a manga
    Chapters {
        url: String,
        /// Also fetch each chapter's canonical name
        #[arg(short, long)]
        names: bool,
    },
    /// List the pages of a chapter
    Pages {
        url: String,
        /// Also resolve each page's image URL
        #[arg(short, long)]
        images: bool,
    },
}
