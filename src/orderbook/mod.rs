//! Order book module for the matching core.
//!
//! ## Architecture
//!
//! The book is a pair of price-time priority sides:
//!
//! - **Slab-based storage**: O(1) order insertion and removal
//! - **Price levels**: orders grouped by price in a BTreeMap
//! - **Price-time priority**: time-ordered FIFO at each price level
//!
//! ## Components
//!
//! - [`OrderNode`]: resting `LimitOrder` with linked-list pointers
//! - [`PriceLevel`]: queue of orders at a single price
//! - [`BookSide`]: all resting orders of one side
//! - [`Book`]: bid side plus ask side
//!
//! ## Performance
//!
//! | Operation | Complexity |
//! |-----------|------------|
//! | Insert | O(log n) |
//! | Best order | O(log n) |
//! | Decrement/remove front | O(log n) |
//! | Ordered traversal | O(n) |

pub mod node;
pub mod level;
pub mod side;
pub mod book;

pub use node::OrderNode;
pub use level::{LevelIter, PriceLevel};
pub use side::BookSide;
pub use book::Book;
