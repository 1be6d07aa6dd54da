pub mod classes;
pub mod common;
pub mod modules;
pub mod students;
pub mod users;

pub use common::AppStartTime;
