//! Every existence check and config read goes through [`FileSystem`], so callers can
//! compile against something other than the real disk.

mod file_system;
#[cfg(feature = "os")]
mod os;

pub use crate::file_system::FileSystem;
#[cfg(feature = "os")]
pub use os::OsFileSystem;
