pub mod client;
pub mod models;
pub mod response;

pub use client::{ChatGateway, HttpGateway};
