//! Table operations - each module holds an `impl Database` block for one table.

mod notes;
