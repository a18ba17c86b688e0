pub mod in_memory;
pub mod json_file;

pub use in_memory::InMemoryListStore;
pub use json_file::JsonFileListStore;
