pub mod csv_export;
pub mod file;

pub use file::{load_portfolio, save_portfolio};
