pub mod instance;
pub mod overlay;
