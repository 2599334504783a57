pub mod a001_load_item;
pub mod a002_shipment_package;
pub mod common;
