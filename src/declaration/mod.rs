//! Declaration keywords and the pending-declaration slot.
pub mod keyword;
pub mod pending;

pub use keyword::{keyword_name, Keyword, KeywordRegistry};
pub use pending::{returns, DeclArg, Declaration, PendingSlot};
