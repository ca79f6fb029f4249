pub mod record;
pub mod types;

// Re-export commonly used types
pub use record::{Record, RecordSet};
pub use types::{Sequence, SequenceType};
