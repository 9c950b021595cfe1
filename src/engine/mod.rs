pub mod core;
pub mod messages;
pub mod state;

pub use self::core::DashboardSession;
pub use messages::{DashboardEvent, DashboardView};
pub use state::LoadedUpload;
