pub mod admin;
pub mod bookings;
pub mod pages;
pub mod sessions;
