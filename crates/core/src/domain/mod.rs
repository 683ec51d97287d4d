pub mod accessory;
pub mod profile;
