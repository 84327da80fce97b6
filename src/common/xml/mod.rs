//! XML text helpers shared by the markup writers.

mod escape;

pub use escape::escape_xml;
