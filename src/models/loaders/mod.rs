pub mod resume_loader;

pub use resume_loader::{load_all_resume_files, load_resume_file};
