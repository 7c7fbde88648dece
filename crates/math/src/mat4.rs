use crate::vec::normalize;
use glam::Vec3;
use std::ops::Mul;

/// 4x4 matrix of `f32`, column-major: element `(row, col)` lives at `col * 4 + row`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mat4(pub [f32; 16]);

impl Default for Mat4 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mat4 {
    #[rustfmt::skip]
    pub const IDENTITY: Self = Self([
        1.0, 0.0, 0.0, 0.0,
        0.0, 1.0, 0.0, 0.0,
        0.0, 0.0, 1.0, 0.0,
        0.0, 0.0, 0.0, 1.0,
    ]);

    /// Remaps GL clip-space depth (`[-1, 1]`) onto the `[0, 1]` range wgpu expects.
    /// Pre-multiply a projection built by [`Mat4::perspective`] with it.
    #[rustfmt::skip]
    pub const GL_TO_WGPU: Self = Self([
        1.0, 0.0, 0.0, 0.0,
        0.0, 1.0, 0.0, 0.0,
        0.0, 0.0, 0.5, 0.0,
        0.0, 0.0, 0.5, 1.0,
    ]);

    /// Raw column-major elements.
    pub fn as_array(&self) -> &[f32; 16] {
        &self.0
    }

    /// Columns as nested arrays, the layout GPU uniform structs use.
    pub fn to_cols_array_2d(&self) -> [[f32; 4]; 4] {
        let m = &self.0;
        [
            [m[0], m[1], m[2], m[3]],
            [m[4], m[5], m[6], m[7]],
            [m[8], m[9], m[10], m[11]],
            [m[12], m[13], m[14], m[15]],
        ]
    }

    /// GL-style perspective projection (clip z in `[-1, 1]`).
    ///
    /// Requires `aspect > 0` and `0 < near < far`; otherwise the matrix is
    /// degenerate. Nothing is checked.
    #[rustfmt::skip]
    pub fn perspective(fov_radians: f32, aspect: f32, near: f32, far: f32) -> Self {
        let f = (std::f32::consts::FRAC_PI_2 - 0.5 * fov_radians).tan();
        let range_inv = 1.0 / (near - far);
        Self([
            f / aspect, 0.0, 0.0, 0.0,
            0.0, f, 0.0, 0.0,
            0.0, 0.0, (near + far) * range_inv, -1.0,
            0.0, 0.0, near * far * range_inv * 2.0, 0.0,
        ])
    }

    /// Camera-to-world matrix placing a camera at `eye` looking at `target`.
    /// Invert it to obtain a view matrix.
    ///
    /// Unstable when `eye == target` or `up` is parallel to the eye-target axis:
    /// the cross products collapse and the basis becomes zero.
    #[rustfmt::skip]
    pub fn look_at(eye: Vec3, target: Vec3, up: Vec3) -> Self {
        let z_axis = normalize(eye - target);
        let x_axis = normalize(up.cross(z_axis));
        let y_axis = normalize(z_axis.cross(x_axis));
        Self([
            x_axis.x, x_axis.y, x_axis.z, 0.0,
            y_axis.x, y_axis.y, y_axis.z, 0.0,
            z_axis.x, z_axis.y, z_axis.z, 0.0,
            eye.x, eye.y, eye.z, 1.0,
        ])
    }

    #[rustfmt::skip]
    pub fn translation(tx: f32, ty: f32, tz: f32) -> Self {
        Self([
            1.0, 0.0, 0.0, 0.0,
            0.0, 1.0, 0.0, 0.0,
            0.0, 0.0, 1.0, 0.0,
            tx, ty, tz, 1.0,
        ])
    }

    #[rustfmt::skip]
    pub fn x_rotation(radians: f32) -> Self {
        let (s, c) = radians.sin_cos();
        Self([
            1.0, 0.0, 0.0, 0.0,
            0.0, c, s, 0.0,
            0.0, -s, c, 0.0,
            0.0, 0.0, 0.0, 1.0,
        ])
    }

    #[rustfmt::skip]
    pub fn y_rotation(radians: f32) -> Self {
        let (s, c) = radians.sin_cos();
        Self([
            c, 0.0, -s, 0.0,
            0.0, 1.0, 0.0, 0.0,
            s, 0.0, c, 0.0,
            0.0, 0.0, 0.0, 1.0,
        ])
    }

    #[rustfmt::skip]
    pub fn z_rotation(radians: f32) -> Self {
        let (s, c) = radians.sin_cos();
        Self([
            c, s, 0.0, 0.0,
            -s, c, 0.0, 0.0,
            0.0, 0.0, 1.0, 0.0,
            0.0, 0.0, 0.0, 1.0,
        ])
    }

    #[rustfmt::skip]
    pub fn scaling(sx: f32, sy: f32, sz: f32) -> Self {
        Self([
            sx, 0.0, 0.0, 0.0,
            0.0, sy, 0.0, 0.0,
            0.0, 0.0, sz, 0.0,
            0.0, 0.0, 0.0, 1.0,
        ])
    }

    /// `self * other`. Applied to a vector, `other` acts first.
    pub fn multiply(&self, other: &Self) -> Self {
        let a = &self.0;
        let b = &other.0;
        let mut out = [0.0; 16];
        for col in 0..4 {
            for row in 0..4 {
                out[col * 4 + row] = a[row] * b[col * 4]
                    + a[4 + row] * b[col * 4 + 1]
                    + a[8 + row] * b[col * 4 + 2]
                    + a[12 + row] * b[col * 4 + 3];
            }
        }
        Self(out)
    }

    pub fn translate(&self, tx: f32, ty: f32, tz: f32) -> Self {
        self.multiply(&Self::translation(tx, ty, tz))
    }

    pub fn x_rotate(&self, radians: f32) -> Self {
        self.multiply(&Self::x_rotation(radians))
    }

    pub fn y_rotate(&self, radians: f32) -> Self {
        self.multiply(&Self::y_rotation(radians))
    }

    pub fn z_rotate(&self, radians: f32) -> Self {
        self.multiply(&Self::z_rotation(radians))
    }

    pub fn scale(&self, sx: f32, sy: f32, sz: f32) -> Self {
        self.multiply(&Self::scaling(sx, sy, sz))
    }

    #[rustfmt::skip]
    pub fn transpose(&self) -> Self {
        let m = &self.0;
        Self([
            m[0], m[4], m[8], m[12],
            m[1], m[5], m[9], m[13],
            m[2], m[6], m[10], m[14],
            m[3], m[7], m[11], m[15],
        ])
    }

    /// General inverse via 2x2 sub-determinants.
    ///
    /// A singular matrix divides by a zero determinant and yields non-finite
    /// elements; callers own that case.
    pub fn inverse(&self) -> Self {
        let [
            a00, a01, a02, a03,
            a10, a11, a12, a13,
            a20, a21, a22, a23,
            a30, a31, a32, a33,
        ] = self.0;

        let b00 = a00 * a11 - a01 * a10;
        let b01 = a00 * a12 - a02 * a10;
        let b02 = a00 * a13 - a03 * a10;
        let b03 = a01 * a12 - a02 * a11;
        let b04 = a01 * a13 - a03 * a11;
        let b05 = a02 * a13 - a03 * a12;
        let b06 = a20 * a31 - a21 * a30;
        let b07 = a20 * a32 - a22 * a30;
        let b08 = a20 * a33 - a23 * a30;
        let b09 = a21 * a32 - a22 * a31;
        let b10 = a21 * a33 - a23 * a31;
        let b11 = a22 * a33 - a23 * a32;

        let det = b00 * b11 - b01 * b10 + b02 * b09 + b03 * b08 - b04 * b07 + b05 * b06;
        let d = 1.0 / det;

        Self([
            (a11 * b11 - a12 * b10 + a13 * b09) * d,
            (a02 * b10 - a01 * b11 - a03 * b09) * d,
            (a31 * b05 - a32 * b04 + a33 * b03) * d,
            (a22 * b04 - a21 * b05 - a23 * b03) * d,
            (a12 * b08 - a10 * b11 - a13 * b07) * d,
            (a00 * b11 - a02 * b08 + a03 * b07) * d,
            (a32 * b02 - a30 * b05 - a33 * b01) * d,
            (a20 * b05 - a22 * b02 + a23 * b01) * d,
            (a10 * b10 - a11 * b08 + a13 * b06) * d,
            (a01 * b08 - a00 * b10 - a03 * b06) * d,
            (a30 * b04 - a31 * b02 + a33 * b00) * d,
            (a21 * b02 - a20 * b04 - a23 * b00) * d,
            (a11 * b07 - a10 * b09 - a12 * b06) * d,
            (a00 * b09 - a01 * b07 + a02 * b06) * d,
            (a31 * b01 - a30 * b03 - a32 * b00) * d,
            (a20 * b03 - a21 * b01 + a22 * b00) * d,
        ])
    }

    /// Transform a point (w = 1) and divide by the resulting w.
    pub fn transform_point(&self, p: Vec3) -> Vec3 {
        let m = &self.0;
        let x = m[0] * p.x + m[4] * p.y + m[8] * p.z + m[12];
        let y = m[1] * p.x + m[5] * p.y + m[9] * p.z + m[13];
        let z = m[2] * p.x + m[6] * p.y + m[10] * p.z + m[14];
        let w = m[3] * p.x + m[7] * p.y + m[11] * p.z + m[15];
        Vec3::new(x / w, y / w, z / w)
    }
}

impl Mul for Mat4 {
    type Output = Mat4;

    fn mul(self, rhs: Mat4) -> Mat4 {
        self.multiply(&rhs)
    }
}
