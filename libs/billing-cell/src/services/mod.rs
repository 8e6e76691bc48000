pub mod billing;
pub mod settings;

pub use billing::BillingService;
pub use settings::BillingSettingsService;
