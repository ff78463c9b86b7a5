pub mod blogs;
pub mod health;
pub mod listings;
