//! Pure data structures persisted by the [`store`](crate::store).
//!
//! Each record comes with a `New*` payload used for creation; the store assigns the id
//! (and, for orders, the timestamp) and hands back the full record.

pub mod menu_item;
pub mod order;
pub mod user;

pub use menu_item::*;
pub use order::*;
pub use user::*;
