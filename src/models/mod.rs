pub mod service;
pub mod status;
pub mod report;

pub use service::ServiceSpec;
pub use status::{Reachability, StatusRecord};
pub use report::Report;
