use glam::Vec3;

/// Below this length a vector is treated as zero by [`normalize`].
const NORMALIZE_EPSILON: f32 = 0.00001;

/// Scale `v` to unit length, or return the zero vector when it is too short to
/// carry a direction.
pub fn normalize(v: Vec3) -> Vec3 {
    let length = v.length();
    if length > NORMALIZE_EPSILON {
        v / length
    } else {
        Vec3::ZERO
    }
}

pub fn deg_to_rad(degrees: f32) -> f32 {
    degrees * std::f32::consts::PI / 180.0
}
