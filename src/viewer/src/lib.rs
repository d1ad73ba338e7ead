pub mod frame_loop;
pub mod keycode;
pub mod mesh_store;
pub mod scheduler;
pub mod sync;
pub mod viewer;

pub use crate::viewer::run;
