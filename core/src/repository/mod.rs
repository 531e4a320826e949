pub mod codec;
pub mod file;
pub mod traits;

// Re-export
pub use file::FileTaskRepository;
pub use traits::TaskRepository;
