pub mod admin;
pub mod booking;
pub mod chat;
pub mod faq;
pub mod favorite;
pub mod review;
pub mod support;
pub mod user;
pub mod vehicle;
