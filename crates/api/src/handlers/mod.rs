pub mod floor_requests;
pub mod health;
