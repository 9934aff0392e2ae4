pub mod cases;
pub mod entitlements;
