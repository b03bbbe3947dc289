use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use huesmith_core::{Rgb, SeedPalette, Theme, share};
use huesmith_catalog::PaletteStore;
use tracing::info;

#[derive(Parser)]
#[command(name = "huesmith", version, about = "Derive a full light/dark CSS theme from six seed colors")]
pub struct Cli {
    /// Path to the palette store (defaults to the per-user data directory).
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Print the generated stylesheet for the given seeds.
    Css(SeedArgs),
    /// Print the share query string for the given seeds.
    Share {
        #[command(flatten)]
        seeds: SeedArgs,
        /// Emit a full URL instead of a bare query string.
        #[arg(long)]
        base_url: Option<String>,
    },
    /// Randomize the brand seeds (primary, neutral, accent) and print them.
    Random {
        #[command(flatten)]
        seeds: SeedArgs,
        /// Also randomize the status seeds (success, warning, error).
        #[arg(long)]
        status: bool,
    },
    /// Save the given seeds to the palette store.
    Save(SeedArgs),
    /// List saved palettes, newest first.
    List,
    /// Print the stylesheet for a saved palette.
    Load { id: i64 },
    /// Delete a saved palette.
    Delete { id: i64 },
    /// Pick an accessible text color for a canonical OKLCH background.
    TextColor { background: String },
}

/// Seed colors as hex flags, optionally overlaid with a share query.
#[derive(Args)]
pub struct SeedArgs {
    #[arg(long, default_value = "#3b82f6")]
    pub primary: String,
    #[arg(long, default_value = "#6b7280")]
    pub neutral: String,
    #[arg(long, default_value = "#8b5cf6")]
    pub accent: String,
    #[arg(long, default_value = "#10b981")]
    pub success: String,
    #[arg(long, default_value = "#f59e0b")]
    pub warning: String,
    #[arg(long, default_value = "#ef4444")]
    pub error: String,
    /// Share query string (`p=L_C_H&...`) applied on top of the hex flags.
    #[arg(long)]
    pub share: Option<String>,
}

impl SeedArgs {
    pub fn resolve(&self) -> Result<SeedPalette> {
        let hex = |name: &str, value: &str| {
            Rgb::from_hex(value).with_context(|| format!("invalid --{name} value"))
        };
        let mut palette = SeedPalette {
            primary: hex("primary", &self.primary)?,
            neutral: hex("neutral", &self.neutral)?,
            accent: hex("accent", &self.accent)?,
            success: hex("success", &self.success)?,
            warning: hex("warning", &self.warning)?,
            error: hex("error", &self.error)?,
        };
        if let Some(query) = &self.share {
            let decoded = share::decode(query);
            if !decoded.has_any() {
                anyhow::bail!("share query carried no decodable seeds: {query}");
            }
            decoded.apply(&mut palette);
        }
        Ok(palette)
    }
}

pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Css(seeds) => {
            let theme = Theme::derive(&seeds.resolve()?);
            print!("{}", theme.stylesheet());
        }
        Command::Share { seeds, base_url } => {
            let query = share::encode(&seeds.resolve()?);
            match base_url {
                Some(base) => println!("{base}?{query}"),
                None => println!("{query}"),
            }
        }
        Command::Random { seeds, status } => {
            let mut palette = seeds.resolve()?;
            let mut rng = rand::rng();
            palette.randomize_brand(&mut rng);
            if status {
                palette.randomize_status(&mut rng);
            }
            print_seeds(&palette);
            println!("share: {}", share::encode(&palette));
        }
        Command::Save(seeds) => {
            let palette = seeds.resolve()?;
            let store = open_store(cli.db.as_deref())?;
            let record = store.save(&palette)?;
            println!("saved palette {} at {}", record.id, record.timestamp);
        }
        Command::List => {
            let store = open_store(cli.db.as_deref())?;
            let records = store.list()?;
            if records.is_empty() {
                println!("no saved palettes");
            }
            for record in records {
                println!(
                    "{}  {}  {} {} {} {} {} {}",
                    record.id,
                    record.timestamp,
                    record.colors.primary,
                    record.colors.neutral,
                    record.colors.accent,
                    record.colors.success,
                    record.colors.warning,
                    record.colors.error,
                );
            }
        }
        Command::Load { id } => {
            let store = open_store(cli.db.as_deref())?;
            let record = store
                .get(id)?
                .with_context(|| format!("no saved palette with id {id}"))?;
            let palette = record.colors.to_palette()?;
            let theme = Theme::derive(&palette);
            print!("{}", theme.stylesheet());
        }
        Command::Delete { id } => {
            let store = open_store(cli.db.as_deref())?;
            if store.delete(id)? {
                println!("deleted palette {id}");
            } else {
                println!("no saved palette with id {id}");
            }
        }
        Command::TextColor { background } => {
            println!("{}", huesmith_core::contrast::best_text_color_css(&background));
        }
    }
    Ok(())
}

fn print_seeds(palette: &SeedPalette) {
    for (role, rgb) in palette.iter() {
        println!("{:<8} {}  {}", role.name(), rgb.to_hex(), palette.seed_oklch(role));
    }
}

fn open_store(db: Option<&Path>) -> Result<PaletteStore> {
    let path = match db {
        Some(path) => path.to_path_buf(),
        None => default_db_path()?,
    };
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    info!(path = %path.display(), "opening palette store");
    PaletteStore::open(path.to_str().context("non-UTF-8 store path")?)
}

fn default_db_path() -> Result<PathBuf> {
    let base = dirs::data_dir().context("no user data directory available")?;
    Ok(base.join("huesmith").join("palettes.db"))
}
