/// Finding store adapters
mod in_memory_store;
mod json_file_store;

pub use in_memory_store::InMemoryFindingStore;
pub use json_file_store::JsonFileFindingStore;
