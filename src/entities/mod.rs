mod booking;
mod driver;
mod map;

pub use booking::{BookingRecord, BookingRequest, Status as BookingStatus, HEADER};
pub use driver::Driver;
pub use map::{Coordinates, Marker, Polyline, RouteMap};
