pub mod catalog;
pub mod compatibility;
pub mod data_card;
pub mod data_source;
pub mod dimension;
pub mod metric;
pub mod overview;
pub mod report;

pub use catalog::*;
pub use compatibility::*;
pub use data_card::*;
pub use data_source::*;
pub use dimension::*;
pub use metric::*;
pub use overview::*;
pub use report::*;
