use oso::{Oso, PolarClass};

use crate::auth::{Platform, User, ADMIN_ROLE};
use crate::error::Error;

pub fn new() -> Result<Oso, Error> {
    let mut o = Oso::new();

    o.register_class(Platform::get_polar_class())?;
    o.register_class(User::get_polar_class())?;
    o.register_constant(ADMIN_ROLE.to_string(), "ADMIN_ROLE")?;

    o.load_str(include_str!("rules.polar"))?;

    Ok(o)
}

#[test]
fn admin_role_test() {
    let authorizor = new().unwrap();

    let admin = User::new("admin", "Admin", vec![ADMIN_ROLE.into()]);

    let result = authorizor.is_allowed(admin.clone(), "administer", Platform);
    assert_eq!(result.unwrap(), true);

    let result = authorizor.is_allowed(admin.clone(), "book", Platform);
    assert_eq!(result.unwrap(), true);

    let result = authorizor.is_allowed(admin.clone(), "track", Platform);
    assert_eq!(result.unwrap(), true);
}

#[test]
fn rider_role_test() {
    let authorizor = new().unwrap();

    let rider = User::new("asha", "Asha", vec![]);

    let result = authorizor.is_allowed(rider.clone(), "book", Platform);
    assert_eq!(result.unwrap(), true);

    let result = authorizor.is_allowed(rider.clone(), "track", Platform);
    assert_eq!(result.unwrap(), true);

    let result = authorizor.is_allowed(rider.clone(), "administer", Platform);
    assert_eq!(result.unwrap(), false);
}

#[test]
fn admin_username_without_role_test() {
    let authorizor = new().unwrap();

    let impostor = User::new("admin", "Admin", vec!["rider".into()]);

    let result = authorizor.is_allowed(impostor, "administer", Platform);
    assert_eq!(result.unwrap(), false);
}
