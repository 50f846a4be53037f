pub mod catalog;
pub mod compatibility;
pub mod data_card;
pub mod data_source;
pub mod dimension;
pub mod metric;
pub mod overview;
pub mod report;
