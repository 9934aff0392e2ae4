pub mod case;
pub mod entitlement;
pub mod plan;
pub mod plan_override;
pub mod subscription;
pub mod usage;
