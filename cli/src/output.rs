//! Human-readable rendering of API responses

use crate::api_client::{CarView, FuelStatsView};

const RULE: &str = "═══════════════════════════════════════";

pub fn created_car(car: &CarView) -> String {
    format!(
        "✅ Car created successfully!\n   ID:    {}\n   Brand: {}\n   Model: {}\n   Year:  {}",
        car.id, car.brand, car.model, car.year
    )
}

pub fn fuel_added(car: &CarView) -> String {
    let mut out = format!(
        "Fuel entry added successfully!\n   Car:           {} {}\n   Total entries: {}",
        car.brand,
        car.model,
        car.fuel_entries.len()
    );
    if let Some(last) = car.fuel_entries.last() {
        out.push_str(&format!(
            "\n   Last entry:    #{} {:.1} L, {:.2}, {} km",
            last.id, last.liters, last.price, last.odometer
        ));
    }
    out
}

pub fn fuel_stats(stats: &FuelStatsView) -> String {
    [
        String::new(),
        RULE.to_string(),
        "        Fuel Statistics".to_string(),
        RULE.to_string(),
        String::new(),
        format!("Total fuel:          {:.1} L", stats.total_fuel),
        format!("Total cost:          {:.2}", stats.total_cost),
        format!("Average consumption: {:.1} L/100km", stats.avg_consumption),
        format!("Entries count:       {}", stats.entries_count),
    ]
    .join("\n")
}

pub fn car_table(cars: &[CarView]) -> String {
    if cars.is_empty() {
        return "No cars registered yet.\n\
                Create one with: carfuel create-car --brand Toyota --model Corolla --year 2018"
            .to_string();
    }

    let mut lines = vec![
        String::new(),
        format!("{:<5} {:<15} {:<15} {:<6} {:<8}", "ID", "Brand", "Model", "Year", "Entries"),
        "─".repeat(53),
    ];
    lines.extend(cars.iter().map(|car| {
        format!(
            "{:<5} {:<15} {:<15} {:<6} {:<8}",
            car.id,
            car.brand,
            car.model,
            car.year,
            car.fuel_entries.len()
        )
    }));
    lines.join("\n")
}
