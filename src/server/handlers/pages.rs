use axum::extract::Json;
use serde::{Deserialize, Serialize};

use crate::server::CurrentUser;

pub const PAGES: [&str; 5] = ["Home", "Book Ride", "Track Ride", "Admin Dashboard", "About"];

#[derive(Serialize, Deserialize)]
pub struct Home {
    title: String,
    greeting: String,
    message: String,
    menu: Vec<String>,
}

#[derive(Serialize, Deserialize)]
pub struct About {
    title: String,
    description: String,
    features: Vec<String>,
}

pub async fn home(CurrentUser(user): CurrentUser) -> Json<Home> {
    Json(Home {
        title: PAGES[0].into(),
        greeting: format!("Welcome, {}!", user.display_name),
        message: "Welcome to the Transport Booking System.".into(),
        menu: PAGES[1..].iter().map(|page| page.to_string()).collect(),
    })
}

pub async fn about(CurrentUser(_): CurrentUser) -> Json<About> {
    Json(About {
        title: PAGES[4].into(),
        description: "A demo transport booking system.".into(),
        features: vec![
            "Book a ride and get a driver and fare straight away".into(),
            "Track your latest ride".into(),
            "Admin dashboard with revenue and bulk completion".into(),
        ],
    })
}
