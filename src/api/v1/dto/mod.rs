pub mod roles;
pub mod tokens;
pub mod users;
