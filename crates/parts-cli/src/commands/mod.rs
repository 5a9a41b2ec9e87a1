pub mod components;
pub mod dispatch;
pub mod migrate;
pub mod seed_users;
