//! Soleado CLI
//!
//! Preview the page's scroll motion headlessly, exercise the FAQ accordion
//! and print enquiry hand-off links.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use soleado_core::ElementId;
use soleado_motion::PanelState;
use soleado_site::{locations, Channel, Enquiry, ReducedMotion, SectionKind, Site, SiteConfig, SiteError};

#[derive(Parser)]
#[command(name = "soleado")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Soleado Moments page motion preview", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file (defaults to ./soleado.toml if present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Mount the page and scroll it from top to bottom
    Preview {
        /// Location landing variant (leigh, wigan, bolton, warrington)
        #[arg(short, long)]
        location: Option<String>,

        /// Force the reduced-motion preference
        #[arg(long)]
        reduced_motion: bool,
    },

    /// Toggle FAQ panels in sequence and print every state change
    Faq {
        /// Panel indices to toggle, in order
        #[arg(short, long, num_args = 1.., required = true)]
        toggle: Vec<usize>,

        /// Advance this many ms between toggles instead of settling
        #[arg(short, long)]
        interval: Option<f32>,

        /// Force the reduced-motion preference
        #[arg(long)]
        reduced_motion: bool,
    },

    /// Print the WhatsApp and email links for an enquiry
    Enquiry {
        #[arg(long)]
        name: String,

        #[arg(long)]
        date: String,

        /// Postcode or area
        #[arg(long)]
        area: String,

        /// Package, theme and add-ons
        #[arg(long)]
        details: String,
    },

    /// Print the effective configuration as TOML
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Preview {
            location,
            reduced_motion,
        } => cmd_preview(config, location.as_deref(), reduced_motion),

        Commands::Faq {
            toggle,
            interval,
            reduced_motion,
        } => cmd_faq(config, &toggle, interval, reduced_motion),

        Commands::Enquiry {
            name,
            date,
            area,
            details,
        } => cmd_enquiry(&config, &name, &date, &area, &details),

        Commands::Config => {
            print!("{}", config.to_toml()?);
            Ok(())
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<SiteConfig> {
    match path {
        Some(path) => SiteConfig::load(path),
        None => {
            let cwd = std::env::current_dir().context("Failed to read current directory")?;
            SiteConfig::load_from_dir(&cwd)
        }
    }
}

fn with_reduced_motion(mut config: SiteConfig, forced: bool) -> SiteConfig {
    if forced {
        config.motion.reduced = ReducedMotion::Always;
    }
    config
}

fn cmd_preview(config: SiteConfig, location: Option<&str>, reduced_motion: bool) -> Result<()> {
    let location = match location {
        Some(slug) => Some(locations::find(slug).ok_or_else(|| SiteError::UnknownLocation(slug.to_string()))?),
        None => None,
    };
    let config = with_reduced_motion(config, reduced_motion);
    let step = config.viewport.scroll_step;

    let mut site = Site::new(&config, location);
    site.mount()?;
    info!(
        "Previewing {} ({:.0}px page, {:.0}px viewport)",
        location.map(|l| l.name).unwrap_or("home page"),
        site.layout().height(),
        config.viewport.height
    );

    let bottom = (site.layout().height() - config.viewport.height).max(0.0);
    let mut scroll_y = 0.0;
    let mut frames = 0;
    while scroll_y < bottom {
        scroll_y = (scroll_y + step).min(bottom);
        site.scroll_to(scroll_y);
        site.advance(16.0);
        frames += 1;
    }
    let settled_ms = site.settle(10_000.0);
    info!("Scrolled to {:.0}px in {} step(s), settled after {:.0}ms", scroll_y, frames, settled_ms);

    for kind in SectionKind::ALL {
        let hidden = site
            .layout()
            .root(kind)
            .map(|root| hidden_elements(&site, root))
            .unwrap_or(0);
        if hidden > 0 {
            warn!("{}: {} element(s) still hidden", kind.name(), hidden);
        } else {
            info!("{}: fully revealed", kind.name());
        }
    }

    let summary = site.unmount();
    let residual = site.residual_styles();
    info!(
        "Unmounted: {} effect(s) reverted, {} failed, {} residual inline style(s)",
        summary.cancelled, summary.failed, residual
    );
    if residual > 0 {
        anyhow::bail!("{} element(s) kept inline styles after unmount", residual);
    }
    Ok(())
}

fn hidden_elements(site: &Site, root: ElementId) -> usize {
    let document = site.stage().document();
    let document = document.borrow();
    document
        .styled_elements(root)
        .into_iter()
        .filter(|id| {
            // FAQ bodies are collapsed on purpose
            document.attr(*id, "data-faq") != Some("panel")
                && document
                    .inline_style(*id)
                    .is_some_and(|style| style.computed_opacity() < 1.0)
        })
        .count()
}

fn cmd_faq(config: SiteConfig, toggles: &[usize], interval: Option<f32>, reduced_motion: bool) -> Result<()> {
    let config = with_reduced_motion(config, reduced_motion);
    let mut site = Site::new(&config, None);
    site.mount()?;

    let faq = site.faq().ok_or(SiteError::FaqNotMounted)?;
    faq.subscribe(|event| {
        println!("{:>8.0}ms  panel {}  {:?}", event.at_ms, event.panel, event.state);
    });

    for &panel in toggles {
        println!("{:>8.0}ms  toggle {}", site.stage().now_ms(), panel);
        site.toggle_faq(panel)?;
        match interval {
            Some(ms) => {
                site.advance(ms);
            }
            None => {
                site.settle(5_000.0);
            }
        }
    }
    site.settle(5_000.0);

    let states = faq.states();
    let open: Vec<usize> = states
        .iter()
        .enumerate()
        .filter(|(_, state)| **state == PanelState::Open)
        .map(|(index, _)| index)
        .collect();
    info!("Open panel(s): {:?}", open);

    site.unmount();
    Ok(())
}

fn cmd_enquiry(config: &SiteConfig, name: &str, date: &str, area: &str, details: &str) -> Result<()> {
    let enquiry = Enquiry::new(name, date, area, details)?;
    println!("WhatsApp: {}", enquiry.link(Channel::WhatsApp, &config.contact));
    println!("Email:    {}", enquiry.link(Channel::Email, &config.contact));
    Ok(())
}
