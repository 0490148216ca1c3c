// Standalone components
pub mod badge;
pub mod button;
pub mod card;
pub mod data_table;
pub mod form_select;
pub mod input;
pub mod page_header;
pub mod skeleton;
pub mod stat_card;

// Primitive wrappers
pub mod dialog;
pub mod tabs;
pub mod toast;

pub use badge::*;
pub use button::*;
pub use card::*;
pub use data_table::*;
pub use dialog::*;
pub use form_select::*;
pub use input::*;
pub use page_header::*;
pub use skeleton::*;
pub use stat_card::*;
pub use tabs::*;
pub use toast::*;
