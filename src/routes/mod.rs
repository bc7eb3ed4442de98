pub mod health;
pub mod mail;
