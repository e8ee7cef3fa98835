//! Recovers tables from loosely structured, line-oriented text such as the
//! text layer of a printed event schedule.
//!
//! ```
//! use schedtab_extraction::{Extractor, RuleConfig};
//!
//! let extractor = Extractor::new(&RuleConfig::default()).unwrap();
//! let table = extractor.extract_text(
//!     "#Event,Entries,Heats,Est. Start,Actual Start\n1,100m Dash,12,2,09:00,09:05\n",
//! );
//! assert_eq!(table.len(), 2);
//! ```

mod error;
mod extract;
pub mod rules;
mod table;
mod title;

pub use error::ConfigError;
pub use extract::{Extractor, extract};
pub use rules::{RuleConfig, RuleKind};
pub use table::{Row, Table};
pub use title::find_title;
