//! Car aggregate and its fuel entries

use chrono::{DateTime, Utc};

pub type CarId = i64;
pub type FuelEntryId = i64;

/// One refill event.
#[derive(Debug, Clone, PartialEq)]
pub struct FuelEntry {
    pub id: FuelEntryId,
    /// Amount of fuel in liters
    pub liters: f64,
    /// Total cost of the refill, not the unit price
    pub price: f64,
    /// Odometer reading in kilometers
    pub odometer: i64,
    pub timestamp: DateTime<Utc>,
}

impl FuelEntry {
    pub fn new(id: FuelEntryId, liters: f64, price: f64, odometer: i64) -> Self {
        Self {
            id,
            liters,
            price,
            odometer,
            timestamp: Utc::now(),
        }
    }
}

/// Car aggregate: the car plus its owned refill history.
#[derive(Debug, Clone, PartialEq)]
pub struct Car {
    /// `None` until the store assigns one
    pub id: Option<CarId>,
    pub brand: String,
    pub model: String,
    pub year: i32,
    /// Append-only, insertion order
    pub fuel_entries: Vec<FuelEntry>,
    pub created_at: DateTime<Utc>,
}

impl Car {
    pub fn new(brand: impl Into<String>, model: impl Into<String>, year: i32) -> Self {
        Self {
            id: None,
            brand: brand.into(),
            model: model.into(),
            year,
            fuel_entries: Vec::new(),
            created_at: Utc::now(),
        }
    }

    pub fn add_fuel_entry(&mut self, entry: FuelEntry) {
        self.fuel_entries.push(entry);
    }

    /// Highest odometer reading recorded so far, regardless of entry order.
    pub fn max_odometer(&self) -> Option<i64> {
        self.fuel_entries.iter().map(|e| e.odometer).max()
    }

    /// Case-insensitive on brand and model, exact on year.
    pub fn matches(&self, brand: &str, model: &str, year: i32) -> bool {
        self.year == year
            && eq_ignore_case(&self.brand, brand)
            && eq_ignore_case(&self.model, model)
    }
}

/// Compares one character at a time using single-character case mappings.
///
/// Unlike comparing `to_lowercase()` strings, a character never expands, so
/// `"İ"` equals `"i"` and `"ß"` does not equal `"SS"`.
pub fn eq_ignore_case(a: &str, b: &str) -> bool {
    a.chars().count() == b.chars().count()
        && a.chars().zip(b.chars()).all(|(x, y)| chars_eq_ignore_case(x, y))
}

fn chars_eq_ignore_case(a: char, b: char) -> bool {
    if a == b {
        return true;
    }
    // Characters outside the BMP only match exactly.
    if a.len_utf16() > 1 || b.len_utf16() > 1 {
        return false;
    }
    let (upper_a, upper_b) = (simple_upper(a), simple_upper(b));
    upper_a == upper_b || simple_lower(upper_a) == simple_lower(upper_b)
}

fn simple_upper(c: char) -> char {
    let mut mapped = c.to_uppercase();
    match (mapped.next(), mapped.next()) {
        (Some(u), None) => u,
        _ => c,
    }
}

fn simple_lower(c: char) -> char {
    if c == '\u{130}' {
        return 'i';
    }
    let mut mapped = c.to_lowercase();
    match (mapped.next(), mapped.next()) {
        (Some(l), None) => l,
        _ => c,
    }
}
