//! Primitive rule evaluators
//!
//! Self-contained predicates over a single environment value, grouped by
//! the kind of data they check.

pub mod network;
pub mod numeric;
pub mod string;

pub use network::{IpRule, IpVersion, UrlRule};
pub use numeric::{IntegerRule, NumericRule, PortRule};
pub use string::{BooleanRule, EmailRule, InRule, JsonRule, KeyRule, PatternRule};
