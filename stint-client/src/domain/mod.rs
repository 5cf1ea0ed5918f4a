mod datetime;
mod project;
mod time_entry;

pub use datetime::*;
pub use project::*;
pub use time_entry::*;
