//! # Path Module
//!
//! Canonicalization of URL paths, used at registration (patterns) and at request
//! time (incoming paths).
//!
//! ## Rules
//!
//! - Empty input becomes `/`
//! - A leading `/` is added when missing
//! - Runs of `/` collapse into one
//! - `.` segments are removed
//! - `..` removes the previous segment; at the root it is a no-op
//! - A trailing `/` is kept when the last written segment was followed by one
//!   (`/abc/.` keeps it, `/abc/def/..` does not)
//!
//! ## Allocation
//!
//! [`clean_path`] returns `Cow::Borrowed` for input that is already canonical, so the
//! common request case performs no heap allocation. Otherwise the scan runs in a
//! [`CleanPathBuffer`] checked out of a bounded process-wide pool and returned to it
//! when the guard drops.
//!
//! ```rust
//! use brrtrouter_radix::path::clean_path;
//!
//! assert_eq!(clean_path("/abc/def/../ghi/../jkl"), "/abc/jkl");
//! assert_eq!(clean_path(""), "/");
//! ```

mod clean;
mod pool;

pub use clean::{clean_path, is_clean, CleanPathBuffer};
pub use pool::{acquire_buffer, BufferPool, PooledBuffer};
