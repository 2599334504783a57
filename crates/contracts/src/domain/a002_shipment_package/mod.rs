pub mod aggregate;
pub mod response;

pub use aggregate::{LoadItemDialogData, PackageIndex, PackageMap, ShipmentPackage};
pub use response::{into_page_state, PackageWithItems, ShipmentPackagesResponse};
