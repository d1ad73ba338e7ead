pub mod host;
pub mod pr_model;
pub mod user_event;

pub type V3 = nalgebra::Vector3<f32>;
pub type Quat = nalgebra::UnitQuaternion<f32>;
