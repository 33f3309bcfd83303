//! Rigid head-pose composition: `T · Rz(yaw) · Ry(pitch) · Rx(roll)` on a
//! column-vector convention.

use nalgebra::{Matrix4, Rotation3, Vector3};

/// Composes a 4×4 rigid transform from yaw/pitch/roll (radians) and a
/// translation (meters), in that fixed order.
#[must_use]
pub fn compose(yaw: f64, pitch: f64, roll: f64, translation: Vector3<f64>) -> Matrix4<f64> {
    let rz = Rotation3::from_axis_angle(&Vector3::z_axis(), yaw);
    let ry = Rotation3::from_axis_angle(&Vector3::y_axis(), pitch);
    let rx = Rotation3::from_axis_angle(&Vector3::x_axis(), roll);
    let rotation = rz * ry * rx;
    Matrix4::new_translation(&translation) * rotation.to_homogeneous()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn identity_when_everything_zero() {
        let m = compose(0.0, 0.0, 0.0, Vector3::zeros());
        assert!(m.iter().zip(Matrix4::identity().iter()).all(|(a, b)| close(*a, *b)));
    }

    #[test]
    fn yaw_rotates_x_into_y() {
        let m = compose(std::f64::consts::FRAC_PI_2, 0.0, 0.0, Vector3::zeros());
        let x = Vector3::new(1.0, 0.0, 0.0);
        let rotated = m.fixed_view::<3, 3>(0, 0) * x;
        assert!(close(rotated.x, 0.0));
        assert!(close(rotated.y, 1.0));
        assert!(close(rotated.z, 0.0));
    }

    #[test]
    fn translation_lands_in_last_column() {
        let m = compose(0.0, 0.0, 0.0, Vector3::new(1.0, 2.0, 3.0));
        assert!(close(m[(0, 3)], 1.0));
        assert!(close(m[(1, 3)], 2.0));
        assert!(close(m[(2, 3)], 3.0));
        assert!(close(m[(3, 0)], 0.0));
        assert!(close(m[(3, 1)], 0.0));
        assert!(close(m[(3, 2)], 0.0));
        assert!(close(m[(3, 3)], 1.0));
    }
}
