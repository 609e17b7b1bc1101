pub mod column;
pub mod reading;
pub mod station;

pub use column::Column;
pub use reading::Reading;
pub use station::{StationRegistry, StationSite};
