mod cli;

use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use mangadl::prelude::*;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("mangadl=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref())?;
    let md = Arc::new(Downloader::from_config(&config).context("building http client")?);
    let registry = ServiceRegistry::from_config(md, &config)?;

    match cli.command {
        Commands::Services => {
            for service in registry.services() {
                println!("{}\t{}", service, service.hosts().join(", "));
            }
        }
        Commands::Identify { url } => {
            let entity = registry.identify_str(&url).await?;
            let name = entity
                .name()
                .await
                .with_context(|| format!("reading name of {}", entity.url()))?;
            println!("{}\t{}\t{}\t{}", entity.kind(), entity.service(), name, entity.url());
        }
        Commands::Chapters { url, names } => {
            let manga = match registry.identify_str(&url).await? {
                Entity::Manga(m) => m,
                Entity::Chapter(_) => bail!("{} is a chapter, not a manga", url),
            };
            for chapter in manga.chapters().await? {
                if names {
                    println!("{}\t{}", chapter.name().await?, chapter.url());
                } else {
                    println!("{}", chapter.url());
                }
            }
        }
        Commands::Pages { url, images } => {
            let chapter = match registry.identify_str(&url).await? {
                Entity::Chapter(c) => c,
                Entity::Manga(_) => bail!("{} is a manga, not a chapter", url),
            };
            for (i, page) in chapter.pages().await?.iter().enumerate() {
                if images {
                    println!("{:04}\t{}\t{}", i + 1, page.url(), page.image_url().await?);
                } else {
                    println!("{:04}\t{}", i + 1, page.url());
                }
            }
        }
    }
    Ok(())
}
