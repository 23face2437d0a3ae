//! crates/krishi_core/src/domain.rs
//!
//! Defines the pure, core data structures for the application.
//! These structs are independent of any database or serialization format.

use uuid::Uuid;

/// Represents a registered user - used throughout the app.
#[derive(Debug, Clone)]
pub struct UserAccount {
    pub id: Uuid,
    pub email: String,
}

/// Only used internally for login/registration - contains sensitive data.
#[derive(Debug, Clone)]
pub struct AccountCredentials {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
}

/// One forecasted calendar month, ready for presentation.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastPoint {
    /// Calendar month label, e.g. "January 2027".
    pub label: String,
    pub rainfall_mm: f64,
}

/// The seven soil/climate measurements a crop recommendation is made from.
#[derive(Debug, Clone, PartialEq)]
pub struct CropQuery {
    pub nitrogen: f64,
    pub phosphorus: f64,
    pub potassium: f64,
    pub temperature: f64,
    pub humidity: f64,
    pub ph: f64,
    pub rainfall: f64,
}

impl CropQuery {
    /// The feature vector in the exact order the classifier was trained on.
    /// The model contract depends on this ordering.
    pub fn feature_vector(&self) -> [f64; 7] {
        [
            self.nitrogen,
            self.phosphorus,
            self.potassium,
            self.temperature,
            self.humidity,
            self.ph,
            self.rainfall,
        ]
    }
}
