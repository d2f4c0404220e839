//! Pagination services: ordering, window planning, total counts and
//! connection assembly.

mod connection;
mod ordering;
mod total_count;
mod window;

pub use connection::{paginate, Connection};
pub use ordering::{camel_to_snake, normalize, parse_ordering};
pub use total_count::{resolve_total_count, TotalCountCache, TotalCountResolver, TotalCountSlot};
pub use window::{CountStrategy, PaginationConfig, Window, WindowPlanner};
