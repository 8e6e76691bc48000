pub mod consumption;
pub mod inventory;

pub use consumption::ConsumptionService;
pub use inventory::InventoryService;
