pub mod assign;
pub mod recommend;
pub mod simulate;
pub mod status;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use parkr_common::config::EngineConfig;
use parkr_common::parking::lot::{Lot, LotId};
use parkr_common::parking::vehicle::DEFAULT_VEHICLE_CLASS;
use parkr_core::engine::AssignmentEngine;
use parkr_plugins::predictor::LogisticPredictor;
use tracing::debug;

#[derive(Parser)]
#[command(name = "parkr")]
#[command(about = "Parking lot recommendation and slot assignment.")]
pub struct CommandLine {
    /// Raise log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// JSON file holding the lots to load
    #[arg(long, global = true, default_value = "data/lots.json")]
    pub lots: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Rank nearby lots for a location
    #[command(alias = "r")]
    Recommend {
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,
        #[arg(long, allow_negative_numbers = true)]
        lon: f64,
        /// Lots further away than this are left out
        #[arg(long, default_value_t = 5.0)]
        max_distance: f64,
        /// Print the ranking as JSON
        #[arg(long)]
        json: bool,
    },
    /// Check a vehicle in and reserve a slot for it
    #[command(alias = "a")]
    Assign {
        #[arg(long)]
        plate: String,
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,
        #[arg(long, allow_negative_numbers = true)]
        lon: f64,
        /// Expected stay in minutes
        #[arg(long, default_value_t = 120)]
        duration: u32,
        /// Vehicle class shown on the check-in
        #[arg(long, default_value = DEFAULT_VEHICLE_CLASS)]
        class: String,
        /// Skip the confidence model
        #[arg(long)]
        no_confidence: bool,
        /// Logistic model coefficients as JSON
        #[arg(long)]
        model: Option<PathBuf>,
    },
    /// Show lot occupancy
    #[command(alias = "s")]
    Status {
        #[arg(long)]
        lot: Option<LotId>,
    },
    /// Check in many vehicles concurrently
    Simulate {
        #[arg(long, default_value_t = 100)]
        vehicles: usize,
        #[arg(long)]
        model: Option<PathBuf>,
    },
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

/// Builds an engine holding `lots`, with the logistic predictor attached.
pub fn build_engine(lots: Vec<Lot>, model: Option<&Path>) -> anyhow::Result<Arc<AssignmentEngine>> {
    let predictor = match model {
        Some(path) => LogisticPredictor::from_json_file(path)?,
        None => LogisticPredictor::default(),
    };
    let engine = AssignmentEngine::new(EngineConfig::default())
        .context("invalid engine configuration")?
        .with_predictor(Arc::new(predictor));

    for lot in lots {
        engine.register_lot(lot);
    }
    debug!("Engine ready with {} lots", engine.lot_count());
    Ok(Arc::new(engine))
}
