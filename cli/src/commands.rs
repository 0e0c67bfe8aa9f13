//! Command-line definition and command execution

use clap::{Parser, Subcommand};

use crate::api_client::{ApiClient, ClientError};
use crate::output;

/// Command-line client for the car fuel tracker API.
#[derive(Parser, Debug)]
#[command(
    name = "carfuel",
    version,
    about = "Record refills and view fuel consumption",
    long_about = "Talks to the carfuel REST API. If the server is not running, \
                  offers to start a local carfuel-server first."
)]
pub struct Cli {
    /// Base URL of the API.
    #[arg(long, env = "CARFUEL_API_URL", default_value = "http://localhost:8080", global = true)]
    pub api_url: String,

    /// Start the server without asking when it is not running.
    #[arg(short, long, global = true)]
    pub yes: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Commands {
    /// Register a new car.
    CreateCar {
        #[arg(long)]
        brand: String,
        #[arg(long)]
        model: String,
        #[arg(long)]
        year: i32,
    },
    /// Record a refill for a car.
    AddFuel {
        #[arg(long = "car-id", alias = "carId")]
        car_id: i64,
        /// Fuel in liters.
        #[arg(long, allow_negative_numbers = true)]
        liters: f64,
        /// Total cost of the refill.
        #[arg(long, allow_negative_numbers = true)]
        price: f64,
        /// Odometer reading in km.
        #[arg(long, allow_negative_numbers = true)]
        odometer: i64,
    },
    /// Show fuel statistics for a car.
    FuelStats {
        #[arg(long = "car-id", alias = "carId")]
        car_id: i64,
    },
    /// List all registered cars.
    ListCars,
}

/// Runs one command and returns the text to print.
pub async fn execute(client: &ApiClient, command: &Commands) -> Result<String, ClientError> {
    match command {
        Commands::CreateCar { brand, model, year } => {
            let car = client.create_car(brand, model, *year).await?;
            Ok(output::created_car(&car))
        }
        Commands::AddFuel {
            car_id,
            liters,
            price,
            odometer,
        } => {
            let car = client.add_fuel(*car_id, *liters, *price, *odometer).await?;
            Ok(output::fuel_added(&car))
        }
        Commands::FuelStats { car_id } => {
            let stats = client.fuel_stats(*car_id).await?;
            Ok(output::fuel_stats(&stats))
        }
        Commands::ListCars => {
            let cars = client.list_cars().await?;
            Ok(output::car_table(&cars))
        }
    }
}
