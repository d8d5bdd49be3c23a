pub mod get;

pub use get::list_prescriptions_handler;
