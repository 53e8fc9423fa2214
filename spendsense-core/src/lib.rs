//! spendsense-core: category taxonomy, transaction records, date extraction,
//! keyword classification and confidence refinement.
//!
//! Everything here is pure: no I/O, no shared state, no failure modes.

pub mod category;
pub mod classifier;
pub mod confidence;
pub mod date;
pub mod model;

pub use category::{CATEGORY_RULES, Category, CategoryRule, TransactionType};
pub use classifier::{Classification, categorize};
pub use confidence::{refine, refine_all};
pub use date::{ExtractedDate, extract_date, extract_date_at, month_key};
pub use model::{MAX_CONFIDENCE, MonthData, ParsedTransaction, UNKNOWN_MERCHANT, clamp_confidence};
