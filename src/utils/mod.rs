pub mod app_data;
pub mod flash;
pub mod multipart;
pub mod parameter_error_handler;
pub mod session;

pub use app_data::{get_blobs, get_config, get_renderer, get_storage};
pub use flash::FlashMessages;
pub use multipart::{MultipartForm, UploadedFile, read_multipart};
pub use parameter_error_handler::{form_error_handler, path_error_handler};
pub use session::{SessionIdentity, SessionUtils};
