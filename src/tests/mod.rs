// Test modules

pub mod common;
mod compatibility_service_test;
mod data_card_service_test;
mod dimension_service_test;
mod metric_service_test;
