use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use nazotte::config::{ClosurePolicy, ContainmentMethod, NazotteConfig};
use nazotte::core::App;
use nazotte::domain::{SelectionPolygon, Vertex};
use nazotte::query::CatalogSource;
use nazotte::session::script;

#[derive(Parser, Debug)]
#[command(name = "nazotte", version, about = "Scribble-select listings on a map")]
pub struct Cli {
    /// Config file (defaults to the user config directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Override the polygon closure policy (convex_hull, drawn)
    #[arg(long, global = true)]
    pub closure: Option<ClosurePolicy>,

    /// Override the containment method (winding_number, angle_sum)
    #[arg(long, global = true)]
    pub containment: Option<ContainmentMethod>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Replay a recorded gesture against a listing catalog and print the selection
    Replay {
        /// Gesture script (JSON array of steps)
        #[arg(long)]
        gesture: PathBuf,
        /// Listing catalog (JSON)
        #[arg(long)]
        catalog: PathBuf,
    },
    /// Check whether a point lies inside a polygon
    Check {
        /// Polygon ring (JSON array of {latitude, longitude})
        #[arg(long)]
        polygon: PathBuf,
        /// Point as "latitude,longitude"
        #[arg(long, value_parser = parse_vertex, allow_hyphen_values = true)]
        point: Vertex,
    },
    /// Print the effective configuration, optionally saving it as the user default
    Config {
        /// Write it to the user config file
        #[arg(long)]
        save: bool,
    },
}

fn parse_vertex(s: &str) -> Result<Vertex, String> {
    let (lat, lng) = s
        .split_once(',')
        .ok_or_else(|| format!("expected \"latitude,longitude\", got '{s}'"))?;
    let latitude = lat.trim().parse().map_err(|e| format!("bad latitude '{lat}': {e}"))?;
    let longitude = lng.trim().parse().map_err(|e| format!("bad longitude '{lng}': {e}"))?;
    Ok(Vertex::new(latitude, longitude))
}

impl Cli {
    fn load_config(&self) -> Result<NazotteConfig> {
        let mut config = match &self.config {
            Some(path) => NazotteConfig::load_from(path)?,
            None => NazotteConfig::load(),
        };
        if let Some(closure) = self.closure {
            config.closure = closure;
        }
        if let Some(containment) = self.containment {
            config.containment = containment;
        }
        Ok(config)
    }
}

pub async fn run(cli: Cli) -> Result<()> {
    let config = cli.load_config()?;
    match &cli.command {
        Command::Replay { gesture, catalog } => replay(&config, gesture, catalog).await,
        Command::Check { polygon, point } => check(&config, polygon, *point),
        Command::Config { save } => {
            println!("{}", serde_json::to_string_pretty(&config)?);
            if *save {
                config.save();
            }
            Ok(())
        }
    }
}

async fn replay(config: &NazotteConfig, gesture: &Path, catalog: &Path) -> Result<()> {
    let steps = script::load_script(gesture)?;
    let source = CatalogSource::load(catalog)?;
    let mut app = App::new(config, Arc::new(source));
    app.replay(&steps).await;

    let view = app.state.view();
    log::info!(
        "{} of {} candidates selected",
        view.markers.iter().filter(|m| m.selected).count(),
        view.markers.len()
    );
    println!("{}", serde_json::to_string_pretty(&view)?);
    Ok(())
}

fn check(config: &NazotteConfig, polygon: &Path, point: Vertex) -> Result<()> {
    let json = std::fs::read_to_string(polygon)
        .with_context(|| format!("Failed to read polygon: {}", polygon.display()))?;
    let ring: Vec<Vertex> = serde_json::from_str(&json)
        .with_context(|| format!("Failed to parse polygon: {}", polygon.display()))?;
    let polygon = SelectionPolygon::from_ring(&ring);
    if polygon.is_empty() {
        log::warn!("Polygon has fewer than 3 distinct vertices; nothing is inside");
    }
    let inside = polygon.contains(point, config.containment);
    println!("{}", if inside { "inside" } else { "outside" });
    Ok(())
}
