//! Car repository interface

use async_trait::async_trait;

use super::model::{Car, CarId, FuelEntryId};

/// Storage contract for car aggregates.
///
/// Implementations own every `Car` and `FuelEntry` for the process lifetime
/// and must be safe to call concurrently without external locking. None of
/// the operations can fail: absence is reported through `Option`/`bool`.
#[async_trait]
pub trait CarRepository: Send + Sync {
    /// Insert or overwrite a car, assigning the next car id when `car.id`
    /// is `None`. Returns the stored car.
    async fn save(&self, car: Car) -> Car;

    async fn find_by_id(&self, id: CarId) -> Option<Car>;

    /// Snapshot of every stored car. Order is unspecified.
    async fn find_all(&self) -> Vec<Car>;

    async fn exists_by_id(&self, id: CarId) -> bool;

    /// Case-insensitive brand/model, exact year.
    async fn exists_by_brand_model_year(&self, brand: &str, model: &str, year: i32) -> bool;

    /// Remove every car. Id counters keep their position.
    async fn delete_all(&self);

    async fn count(&self) -> usize;

    fn generate_car_id(&self) -> CarId;

    fn generate_fuel_id(&self) -> FuelEntryId;
}
