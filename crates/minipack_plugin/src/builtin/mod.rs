pub mod define;
pub mod hot_module_replacement;
pub mod limit_chunk_count;
pub mod loader_options;
pub mod min_chunk_size;
pub mod prefetch;
pub mod provide;
