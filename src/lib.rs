pub mod api;
pub mod entities;
pub mod metrics;
pub mod migrator;
pub mod service;
pub mod telemetry;

pub use sea_orm;
