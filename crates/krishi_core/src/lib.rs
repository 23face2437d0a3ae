pub mod codec;
pub mod domain;
pub mod error;
pub mod forecast;
pub mod model;
pub mod ports;

pub use codec::Vocabulary;
pub use domain::{AccountCredentials, CropQuery, ForecastPoint, UserAccount};
pub use error::PredictError;
pub use model::{Artifact, Centroid, CropClassifier, RainfallForecaster};
pub use ports::{AccountStore, ModelStore, PortError, PortResult, SessionStore, VocabularySource};
