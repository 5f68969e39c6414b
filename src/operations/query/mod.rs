mod absolute_coordinate;
mod area;
mod mass;
mod validate;
mod volume;

pub use absolute_coordinate::AbsoluteCoordinate;
pub use area::SurfaceArea;
pub use mass::{Mass, TotalMass};
pub use validate::{IsValid, Validate, ValidationIssue};
pub use volume::{TotalVolume, Volume};
