pub mod fetch;
pub mod history;
pub mod overlay;
pub mod process;
