//! Testing utilities for split exports.
//!
//! - **Fixtures**: small tables and file contents used across the test suite
//! - **Assertions**: check the row-conservation and archive-completeness properties
//!
//! ```
//! use ironsplit::testing::*;
//! use ironsplit::{GroupOrder, group_by_column};
//!
//! let table = regions_table();
//! let groups = group_by_column(&table, "region", GroupOrder::FirstSeen).unwrap();
//! assert_rows_conserved(&table, &groups);
//! ```

pub mod assertions;
pub mod fixtures;

pub use assertions::*;
pub use fixtures::*;
