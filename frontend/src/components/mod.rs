pub mod metrics;
pub mod plot;
pub mod sidebar;
pub mod table;
pub mod toast;
