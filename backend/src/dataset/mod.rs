pub mod record;
pub mod parser;
pub mod scaler;
pub mod prepare;
pub mod selection;
pub mod loader;
