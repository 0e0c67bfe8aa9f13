//! Car and fuel business logic service

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::domain::fuel_stats::distance_by_timestamp;
use crate::domain::{
    Car, CarId, CarRepository, DomainError, DomainResult, FuelEntry, FuelStats,
};

fn record_rejection(err: &DomainError) {
    metrics::counter!("carfuel_domain_errors_total", "kind" => err.kind()).increment(1);
}

/// Business rules over the car repository.
///
/// Holds no car data of its own. The locks below only serialize
/// check-then-write sequences: car creation (duplicate check) and fuel
/// appends per car (odometer check).
pub struct FuelService {
    store: Arc<dyn CarRepository>,
    creation_lock: Mutex<()>,
    car_locks: DashMap<CarId, Arc<Mutex<()>>>,
}

impl FuelService {
    pub fn new(store: Arc<dyn CarRepository>) -> Self {
        Self {
            store,
            creation_lock: Mutex::new(()),
            car_locks: DashMap::new(),
        }
    }

    pub fn store(&self) -> &Arc<dyn CarRepository> {
        &self.store
    }

    fn car_lock(&self, car_id: CarId) -> Arc<Mutex<()>> {
        self.car_locks.entry(car_id).or_default().clone()
    }

    pub async fn create_car(&self, brand: &str, model: &str, year: i32) -> DomainResult<Car> {
        info!(brand, model, year, "Creating new car");

        let _guard = self.creation_lock.lock().await;

        if self
            .store
            .exists_by_brand_model_year(brand, model, year)
            .await
        {
            warn!(brand, model, year, "Duplicate car creation attempt");
            let err = DomainError::Duplicate {
                brand: brand.to_string(),
                model: model.to_string(),
                year,
            };
            record_rejection(&err);
            return Err(err);
        }

        let car = self.store.save(Car::new(brand, model, year)).await;
        metrics::counter!("carfuel_cars_created_total").increment(1);
        info!(car_id = ?car.id, "Car created");

        Ok(car)
    }

    pub async fn get_all_cars(&self) -> Vec<Car> {
        info!("Fetching all cars");
        self.store.find_all().await
    }

    pub async fn get_car_by_id(&self, id: CarId) -> DomainResult<Car> {
        info!(car_id = id, "Fetching car");
        match self.store.find_by_id(id).await {
            Some(car) => Ok(car),
            None => {
                let err = DomainError::NotFound(id);
                record_rejection(&err);
                Err(err)
            }
        }
    }

    /// Appends a refill to the car's history.
    ///
    /// The new odometer reading must not be below the highest reading already
    /// recorded for the car.
    pub async fn add_fuel_entry(
        &self,
        car_id: CarId,
        liters: f64,
        price: f64,
        odometer: i64,
    ) -> DomainResult<Car> {
        info!(car_id, liters, price, odometer, "Adding fuel entry");

        // Fail fast for unknown cars before allocating a lock for them.
        self.get_car_by_id(car_id).await?;

        let lock = self.car_lock(car_id);
        let _guard = lock.lock().await;

        let mut car = self.get_car_by_id(car_id).await?;

        if let Some(max_odometer) = car.max_odometer() {
            if odometer < max_odometer {
                let message = format!(
                    "Invalid odometer reading: {} km. Cannot be less than previous reading: {} km",
                    odometer, max_odometer
                );
                warn!(car_id, "Invalid fuel entry: {}", message);
                let err = DomainError::InvalidRequest(message);
                record_rejection(&err);
                return Err(err);
            }
        }

        let entry = FuelEntry::new(self.store.generate_fuel_id(), liters, price, odometer);
        car.add_fuel_entry(entry);
        let car = self.store.save(car).await;

        metrics::counter!("carfuel_fuel_entries_added_total").increment(1);
        info!(
            car_id,
            entries = car.fuel_entries.len(),
            "Fuel entry added"
        );

        Ok(car)
    }

    pub async fn calculate_stats(&self, car_id: CarId) -> DomainResult<FuelStats> {
        info!(car_id, "Calculating fuel statistics");

        let car = self.get_car_by_id(car_id).await?;
        let entries = &car.fuel_entries;

        match (entries.len(), distance_by_timestamp(entries)) {
            (0, _) => info!(car_id, "No fuel entries found"),
            (n, None) => info!(car_id, entries = n, "Cannot calculate avg consumption"),
            (_, Some(distance)) if distance <= 0 => warn!(
                car_id,
                distance, "Invalid distance, cannot calculate avg consumption"
            ),
            (_, Some(distance)) => info!(car_id, distance, "Distance traveled"),
        }

        let stats = FuelStats::from_entries(entries);

        info!(
            car_id,
            total_fuel = stats.total_fuel,
            total_cost = stats.total_cost,
            avg_consumption = stats.avg_consumption,
            entries = stats.entries_count,
            "Statistics calculated"
        );

        Ok(stats)
    }
}
