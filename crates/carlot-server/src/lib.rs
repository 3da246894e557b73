//! HTTP server for Carlot.
//!
//! Serves the car listing page and the create/delete forms, plus a small
//! JSON API, on top of [`carlot_service::CarService`].

pub mod backend;
pub mod config;
pub mod error;
pub mod form;
pub mod handler;
pub mod router;
pub mod server;
pub mod view;

pub use config::{AwsConfig, Backend, ServerConfig};
pub use error::{ServerError, ServerResult};
pub use router::{build_router, AppState};
pub use server::CarlotServer;
