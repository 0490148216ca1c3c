pub mod customer;
pub mod delivery;
pub mod delivery_partner;
pub mod profile;
pub mod refresh_token;
pub mod stats;
pub mod user;
pub mod user_role;
