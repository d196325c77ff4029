// Copyright @yucwang 2023

use crate::math::aabb::AABB;
use crate::math::constants::{ EPSILON, Float, Vector3f };
use crate::math::ray::Ray3f;

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Triangle {
    p0: Vector3f,
    p1: Vector3f,
    p2: Vector3f
}

impl Triangle {
    pub fn new(new_p0: Vector3f, new_p1: Vector3f, new_p2: Vector3f) -> Self {
        Triangle {
            p0: new_p0,
            p1: new_p1,
            p2: new_p2,
        }
    }

    pub fn bounding_box(&self) -> AABB {
        let mut bound = AABB::new(self.p0, self.p1);
        bound.expand_by_point(&self.p2);

        bound
    }

    /// Distance along `ray` to the triangle plane when the hit lies inside
    /// the triangle and strictly in front of the origin.
    pub fn ray_intersect(&self, ray: &Ray3f) -> Option<Float> {
        let edge0 = self.p1 - self.p0;
        let edge1 = self.p2 - self.p0;
        let geo_normal = edge0.cross(&edge1);
        if geo_normal.norm_squared() < EPSILON * EPSILON * EPSILON {
            return None;
        }
        let geo_normal = geo_normal.normalize();

        let n_dot_dir = geo_normal.dot(&ray.dir());
        if n_dot_dir > -EPSILON && n_dot_dir < EPSILON {
            return None;
        }

        let plane_d = geo_normal.dot(&self.p0);
        let t = (plane_d - geo_normal.dot(&ray.origin())) / n_dot_dir;
        if t <= EPSILON {
            return None;
        }

        let intersection_p = ray.at(t);
        if self.is_in_triangle(&intersection_p) {
            Some(t)
        } else {
            None
        }
    }

    fn is_in_triangle(&self, p: &Vector3f) -> bool {
        let edge0 = self.p1 - self.p0;
        let edge1 = self.p2 - self.p0;
        let geo_normal = edge0.cross(&edge1);

        let n0 = (self.p1 - self.p0).cross(&(p - self.p0));
        let n1 = (self.p2 - self.p1).cross(&(p - self.p1));
        let n2 = (self.p0 - self.p2).cross(&(p - self.p2));

        (n0.dot(&geo_normal) >= 0.0) && (n1.dot(&geo_normal) >= 0.0) && (n2.dot(&geo_normal) >= 0.0)
    }

    pub fn apply_transform(&mut self, scale: Float, translate: &Vector3f) {
        self.p0 = self.p0 * scale + translate;
        self.p1 = self.p1 * scale + translate;
        self.p2 = self.p2 * scale + translate;
    }
}
