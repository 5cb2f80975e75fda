pub type Vec3 = [f64; 3];

pub fn sub(a: &Vec3, b: &Vec3) -> Vec3 {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

pub fn dot(a: &Vec3, b: &Vec3) -> f64 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

pub fn norm(v: &Vec3) -> f64 {
    dot(v, v).sqrt()
}

/// Unit vector along `v`, or the zero vector when `v` has no length.
pub fn normalize(v: &Vec3) -> Vec3 {
    let mag = norm(v);
    if mag > 0.0 {
        [v[0] / mag, v[1] / mag, v[2] / mag]
    } else {
        [0.0, 0.0, 0.0]
    }
}
