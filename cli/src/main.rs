mod commands;
mod lots;
mod terminal;

use commands::{CommandLine, Commands, assign, recommend, simulate, status};
use parkr_common::config::RankerConfig;
use parkr_common::geo::Coordinates;
use parkr_common::parking::vehicle::Vehicle;
use terminal::{logging, print};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let commands = CommandLine::parse_args();

    logging::init_logging(commands.verbose);
    let lots = lots::load(&commands.lots)?;

    match commands.command {
        Commands::Recommend {
            lat,
            lon,
            max_distance,
            json,
        } => {
            let config = RankerConfig::with_max_distance(max_distance);
            recommend::recommend(&lots, Coordinates::new(lat, lon), config, json)
        }
        Commands::Assign {
            plate,
            lat,
            lon,
            duration,
            class,
            no_confidence,
            model,
        } => {
            let engine = commands::build_engine(lots, model.as_deref())?;
            let vehicle = Vehicle::new(&plate, lat, lon).with_class(&class);
            assign::assign(engine, vehicle, duration, !no_confidence).await
        }
        Commands::Status { lot } => {
            let engine = commands::build_engine(lots, None)?;
            status::status(&engine, lot)
        }
        Commands::Simulate { vehicles, model } => {
            print::header("starting simulation");
            let engine = commands::build_engine(lots, model.as_deref())?;
            simulate::simulate(engine, vehicles).await
        }
    }
}
