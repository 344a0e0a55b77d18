// Domain types and value objects
pub mod observation;
pub mod series_request;

// Re-export commonly used types
pub use observation::Observation;
pub use series_request::SeriesRequest;
