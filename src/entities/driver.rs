use serde::{Deserialize, Serialize};

const POOL: [(&str, &str); 4] = [
    ("Amit", "Swift Dzire - KA01AB1234"),
    ("Rahul", "Innova - KA02CD5678"),
    ("Sonal", "Tiago - KA03EF9012"),
    ("Priya", "Ertiga - KA04GH3456"),
];

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Driver {
    pub name: String,
    pub vehicle: String,
}

impl Driver {
    pub fn new(name: &str, vehicle: &str) -> Self {
        Self {
            name: name.into(),
            vehicle: vehicle.into(),
        }
    }

    /// The fixed set of drivers bookings are assigned to. Availability is never tracked.
    pub fn pool() -> Vec<Driver> {
        POOL.iter()
            .map(|(name, vehicle)| Driver::new(name, vehicle))
            .collect()
    }
}

#[test]
fn pool_test() {
    let pool = Driver::pool();

    assert_eq!(pool.len(), 4);
    assert_eq!(pool[0], Driver::new("Amit", "Swift Dzire - KA01AB1234"));
    assert_eq!(pool[3], Driver::new("Priya", "Ertiga - KA04GH3456"));
}
