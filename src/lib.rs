pub mod accounts;
pub mod analysis;
pub mod commands;
pub mod error;
pub mod grievances;
pub mod models;
pub mod portal;
pub mod session;
pub mod store;

pub use error::{ErrorKind, PortalError, Result};
pub use portal::Portal;
