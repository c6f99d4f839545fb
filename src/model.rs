pub mod coordinate;
pub mod open_notify_api_model;

pub use coordinate::Coordinate;
pub use open_notify_api_model::CrewMember;
