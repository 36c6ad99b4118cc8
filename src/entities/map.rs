use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    pub coordinates: Coordinates,
    pub tooltip: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Polyline {
    pub locations: Vec<Coordinates>,
    pub color: String,
}

/// What the client draws for a ride: two markers joined by a line. The points are fixed
/// and never derived from the origin and destination text.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RouteMap {
    pub center: Coordinates,
    pub zoom: u8,
    pub markers: Vec<Marker>,
    pub polyline: Polyline,
}

const ORIGIN: Coordinates = Coordinates {
    lat: 28.61,
    lng: 77.23,
};

const DESTINATION: Coordinates = Coordinates {
    lat: 28.65,
    lng: 77.25,
};

impl RouteMap {
    pub fn demo() -> Self {
        Self {
            center: ORIGIN,
            zoom: 12,
            markers: vec![
                Marker {
                    coordinates: ORIGIN,
                    tooltip: "Origin".into(),
                },
                Marker {
                    coordinates: DESTINATION,
                    tooltip: "Destination".into(),
                },
            ],
            polyline: Polyline {
                locations: vec![ORIGIN, DESTINATION],
                color: "blue".into(),
            },
        }
    }
}

#[test]
fn demo_map_test() {
    let map = RouteMap::demo();

    assert_eq!(map.center, ORIGIN);
    assert_eq!(map.markers.len(), 2);
    assert_eq!(map.markers[1].tooltip, "Destination");
    assert_eq!(map.polyline.locations, vec![ORIGIN, DESTINATION]);
}
