//! Net mass derivation

use weighbridge_types::Kilograms;

/// First mass minus second mass; `None` unless both are present
///
/// Negative when the second weighing is heavier (tare taken first).
pub fn compute_net_mass(first: Option<Kilograms>, second: Option<Kilograms>) -> Option<Kilograms> {
    match (first, second) {
        (Some(first), Some(second)) => Some(first - second),
        _ => None,
    }
}
