pub mod classes;
pub mod home;
pub mod modules;
pub mod students;
pub mod teachers;

pub use classes::ClassService;
pub use home::HomeService;
pub use modules::ModuleService;
pub use students::StudentService;
pub use teachers::TeacherService;
