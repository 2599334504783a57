//! Shipment packages page: lists the packages of a shipment and hosts the
//! load item dialog for each of them.

mod view;
mod view_model;

pub use view::ShipmentPackagesPage;
pub use view_model::ShipmentPackagesVm;
