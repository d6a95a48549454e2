//! Attribute, group, and skill names shared by the catalog, the attribute graph,
//! and the simulation engine.

/// Resolved maximum velocity of a hull (m/s).
pub const ATTR_MAX_VELOCITY: &str = "maxVelocity";
/// Hard speed cap of a hull. Absent or zero means uncapped.
pub const ATTR_SPEED_LIMIT: &str = "speedLimit";
/// Maximum targeting range of a hull (m).
pub const ATTR_MAX_TARGET_RANGE: &str = "maxTargetRange";

/// Slot counts declared by hulls.
pub const ATTR_HIGH_SLOTS: &str = "hiSlots";
pub const ATTR_MID_SLOTS: &str = "medSlots";
pub const ATTR_LOW_SLOTS: &str = "lowSlots";

/// Weapon optimal range (m).
pub const ATTR_MAX_RANGE: &str = "maxRange";
/// Weapon falloff range (m).
pub const ATTR_FALLOFF: &str = "falloff";
/// Milliseconds between weapon cycles.
pub const ATTR_RATE_OF_FIRE: &str = "rateOfFire";
/// Weapon damage multiplier applied to loaded charge damage.
pub const ATTR_DAMAGE_MULTIPLIER: &str = "damageMultiplier";
/// Charge size a weapon accepts, and the size of a charge.
pub const ATTR_CHARGE_SIZE: &str = "chargeSize";
/// Maximum number of modules of the same group that may be fitted.
pub const ATTR_MAX_GROUP_FITTED: &str = "maxGroupFitted";

pub const ATTR_EM_DAMAGE: &str = "emDamage";
pub const ATTR_THERMAL_DAMAGE: &str = "thermalDamage";
pub const ATTR_KINETIC_DAMAGE: &str = "kineticDamage";
pub const ATTR_EXPLOSIVE_DAMAGE: &str = "explosiveDamage";

/// Group shared by afterburners and microwarpdrives.
pub const GROUP_PROPULSION: &str = "Propulsion Module";

pub const SKILL_AFTERBURNER: &str = "Afterburner";
pub const SKILL_HIGH_SPEED_MANEUVERING: &str = "High Speed Maneuvering";

/// Marker rendered in place of a value that could not be derived.
pub const UNAVAILABLE: &str = "—";
