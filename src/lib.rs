pub mod api;
pub mod config;
pub mod db;
pub mod docs;
pub mod ingest;
pub mod metrics;
pub mod model;
pub mod routes;
