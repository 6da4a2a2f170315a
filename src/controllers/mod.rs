//! Controllers de la API

pub mod admin_controller;
pub mod auth_controller;
pub mod booking_controller;
pub mod chat_controller;
pub mod faq_controller;
pub mod favorite_controller;
pub mod review_controller;
pub mod support_controller;
pub mod vehicle_controller;

pub use admin_controller::AdminController;
pub use auth_controller::AuthController;
pub use booking_controller::BookingController;
pub use chat_controller::ChatController;
pub use faq_controller::FaqController;
pub use favorite_controller::FavoriteController;
pub use review_controller::ReviewController;
pub use support_controller::SupportController;
pub use vehicle_controller::VehicleController;
