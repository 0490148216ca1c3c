pub mod error;
pub mod feature_flags;

pub mod delivery;
pub mod role;
pub mod session;
pub mod stats;
pub mod subscription;

pub use error::*;
pub use feature_flags::*;

pub use delivery::*;
pub use role::*;
pub use session::*;
pub use stats::*;
pub use subscription::*;
