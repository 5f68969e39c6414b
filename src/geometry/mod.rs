pub mod coordinate;
pub mod dimensions;

pub use coordinate::SolutionCoordinate;
pub use dimensions::Dimensions;
