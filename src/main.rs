//! Metahead - SEO metadata aggregation and rendering for content-managed sites.

mod cli;

use anyhow::{Result, bail};
use clap::Parser;
use cli::{Cli, Commands};
use metahead::config::{SiteConfig, SiteId};
use metahead::content::store::ContentStore;
use metahead::log;
use metahead::meta::{ContainerKind, ContainerRegistry, PageLifecycle, RequestContext};
use std::io::stdout;
use std::path::Path;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;

    match &cli.command {
        Commands::Render {
            path,
            site,
            only,
            title,
        } => render_page(&config, path, *site, only.as_deref(), title.as_deref()),
        Commands::Check => check_site(&config),
    }
}

/// Load and validate configuration from CLI arguments
fn load_config(cli: &Cli) -> Result<SiteConfig> {
    let root = cli.root.as_deref().unwrap_or(Path::new("./"));
    let config_path = root.join(&cli.config);

    if !config_path.exists() {
        bail!("Config file not found: {}", config_path.display());
    }

    let mut config = SiteConfig::from_path(&config_path)?;
    config.resolve_paths(root);
    config.validate()?;

    Ok(config)
}

/// Resolve a request path and print its head markup.
fn render_page(
    config: &SiteConfig,
    path: &str,
    site: Option<SiteId>,
    only: Option<&str>,
    title: Option<&str>,
) -> Result<()> {
    let sites = config.site_registry();
    let store = ContentStore::load(config, &sites)?;
    let ctx = RequestContext {
        sites: &sites,
        elements: &store,
        bundles: &store,
    };

    let mut registry = ContainerRegistry::new();
    let mut lifecycle = PageLifecycle::new();
    let path = path.trim_start_matches('/');
    registry.load(&ctx, path, site, &mut lifecycle)?;

    if let Some(title) = title {
        registry.set_title(title)?;
    }

    match registry.matched_element() {
        Some(element) => log!("render"; "matched `{}` ({})", element.uri, element.title),
        None => log!("render"; "no content element matched `/{path}`"),
    }

    match only {
        Some(kind_name) => {
            let kind: ContainerKind = kind_name.parse()?;
            print!("{}", registry.render_by_kind(kind)?);
        }
        None => {
            let mut out = stdout().lock();
            lifecycle.page_finished(&registry, &mut out)?;
        }
    }

    Ok(())
}

/// Validate config, content index and bundles, then dry-render every site.
fn check_site(config: &SiteConfig) -> Result<()> {
    let sites = config.site_registry();
    let store = ContentStore::load(config, &sites)?;
    let ctx = RequestContext {
        sites: &sites,
        elements: &store,
        bundles: &store,
    };

    for site in sites.iter() {
        let mut registry = ContainerRegistry::new();
        let mut lifecycle = PageLifecycle::new();
        registry.load(&ctx, "", Some(site.id), &mut lifecycle)?;

        let mut fragments = 0;
        for kind in ContainerKind::ALL {
            fragments += registry.render_array_by_kind(kind)?.len();
        }
        log!(
            "check";
            "site {} ({}): {} head fragments render",
            site.id,
            site.handle,
            fragments
        );
    }

    log!(
        "check";
        "{} elements, {} bundles ok",
        store.element_count(),
        store.bundle_count()
    );
    Ok(())
}
