pub mod cloth;
pub mod collider;
pub mod config;
pub mod constraint;
pub mod controller_message;
pub mod error;
pub mod grid;
pub mod grid_index;
pub mod particle;
pub mod rigid_body;
pub mod wind;
pub mod world;

pub type V3 = nalgebra::Vector3<f32>;
pub type Quat = nalgebra::UnitQuaternion<f32>;
