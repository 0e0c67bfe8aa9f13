//! In-memory storage implementation

use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use dashmap::DashMap;

use crate::domain::{Car, CarId, CarRepository, FuelEntryId};

/// Process-lifetime car storage. Nothing survives a restart.
pub struct InMemoryCarStore {
    cars: DashMap<CarId, Car>,
    car_counter: AtomicI64,
    fuel_counter: AtomicI64,
}

impl InMemoryCarStore {
    pub fn new() -> Self {
        Self {
            cars: DashMap::new(),
            car_counter: AtomicI64::new(1),
            fuel_counter: AtomicI64::new(1),
        }
    }
}

impl Default for InMemoryCarStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CarRepository for InMemoryCarStore {
    async fn save(&self, mut car: Car) -> Car {
        let id = match car.id {
            Some(id) => id,
            None => {
                let id = self.generate_car_id();
                car.id = Some(id);
                id
            }
        };
        self.cars.insert(id, car.clone());
        car
    }

    async fn find_by_id(&self, id: CarId) -> Option<Car> {
        self.cars.get(&id).map(|c| c.clone())
    }

    async fn find_all(&self) -> Vec<Car> {
        self.cars.iter().map(|e| e.value().clone()).collect()
    }

    async fn exists_by_id(&self, id: CarId) -> bool {
        self.cars.contains_key(&id)
    }

    async fn exists_by_brand_model_year(&self, brand: &str, model: &str, year: i32) -> bool {
        self.cars.iter().any(|c| c.matches(brand, model, year))
    }

    async fn delete_all(&self) {
        self.cars.clear();
    }

    async fn count(&self) -> usize {
        self.cars.len()
    }

    fn generate_car_id(&self) -> CarId {
        self.car_counter.fetch_add(1, Ordering::SeqCst)
    }

    fn generate_fuel_id(&self) -> FuelEntryId {
        self.fuel_counter.fetch_add(1, Ordering::SeqCst)
    }
}
