//! Core position types and the sidereal rotation engine

pub mod cartesian;
pub mod geodetic;
pub mod rotation;

pub use cartesian::Cartesian;
pub use geodetic::geodetic_to_ecef;
pub use rotation::{
    check_angle_count, ecef_to_eci_vec, eci_to_ecef_vec, rotate_ecef_to_eci, rotate_eci_to_ecef,
    sidereal_rotation,
};
