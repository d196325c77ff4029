// Copyright @yucwang 2023

use super::triangle::Triangle;

use crate::io::obj_utils;
use crate::io::obj_utils::ObjLoadError;
use crate::math::aabb::AABB;
use crate::math::constants::{ Float, Vector3f };
use crate::math::ray::Ray3f;

use std::path::Path;
use std::vec::Vec;

/// Direction of the parity rays used by `is_inside`. Skewed off the axes so
/// rays from grid-aligned points rarely graze shared edges.
const PARITY_DIRECTION: [Float; 3] = [1.0, 0.013_171, 0.007_919];

pub struct TriangleMesh {
    triangles: Vec<Triangle>,
}

impl TriangleMesh {
    pub fn new(triangles: Vec<Triangle>) -> Self {
        Self { triangles }
    }

    pub fn from_obj<P: AsRef<Path>>(path: P) -> Result<Self, ObjLoadError> {
        let obj_set = obj_utils::load_obj_from_file(path)?;
        let mut triangles = Vec::new();

        for object in obj_set.objects {
            let vertex = |idx: usize| -> Result<Vector3f, ObjLoadError> {
                object.vertices.get(idx)
                    .map(|v| Vector3f::new(v.x as Float, v.y as Float, v.z as Float))
                    .ok_or(ObjLoadError::Index(idx))
            };
            for geom in &object.geometry {
                for shape in &geom.shapes {
                    if let wavefront_obj::obj::Primitive::Triangle(a, b, c) = &shape.primitive {
                        triangles.push(Triangle::new(vertex(a.0)?, vertex(b.0)?, vertex(c.0)?));
                    }
                }
            }
        }

        log::info!("Loaded mesh with {} triangles.", triangles.len());
        Ok(Self::new(triangles))
    }

    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    pub fn len(&self) -> usize {
        self.triangles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    pub fn bounding_box(&self) -> AABB {
        let mut bound = AABB::default();
        for tri in &self.triangles {
            bound.expand_by_aabb(&tri.bounding_box());
        }
        bound
    }

    pub fn apply_transform(&mut self, scale: Float, translate: &Vector3f) {
        for tri in &mut self.triangles {
            tri.apply_transform(scale, translate);
        }
    }

    /// Uniformly scales and moves the mesh so its bounds sit centered inside
    /// `target`, touching it along the tightest axis.
    pub fn fit_to_bbox(&mut self, target: &AABB) {
        let bound = self.bounding_box();
        if !bound.is_valid() {
            return;
        }

        let size = bound.diagnal();
        let room = target.diagnal();
        let mut scale = std::f32::MAX;
        for idx in 0..3 {
            if size[idx] > 1e-8 {
                scale = scale.min(room[idx] / size[idx]);
            }
        }
        if scale == std::f32::MAX {
            scale = 1.0;
        }

        let translate = target.center() - bound.center() * scale;
        self.apply_transform(scale, &translate);
    }

    /// Number of triangles crossed by `ray`.
    pub fn crossings(&self, ray: &Ray3f) -> usize {
        self.triangles.iter().filter(|tri| tri.ray_intersect(ray).is_some()).count()
    }

    /// Odd/even test along a single fixed direction.
    pub fn is_inside(&self, p: &Vector3f) -> bool {
        let dir = Vector3f::new(PARITY_DIRECTION[0], PARITY_DIRECTION[1], PARITY_DIRECTION[2]);
        self.crossings(&Ray3f::new(*p, dir)) % 2 == 1
    }
}
