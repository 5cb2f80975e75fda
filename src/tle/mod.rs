mod error;
mod orbit;
mod tle_loader;

pub use error::TleError;
pub use orbit::Sgp4Orbit;
pub use tle_loader::{parse_catalog, TleLoader};
