//! Procedural meshes for the rasterization path and the per-device distortion pass, per §4.4.

use glam::Vec3;

/// One vertex of a procedural layer mesh: position plus UV, matching the `mvp`/`flip_y`-driven
/// vertex shader input the rasterization path binds per layer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MeshVertex {
    pub position: Vec3,
    pub uv: (f32, f32),
}

/// A unit quad in the XY plane, used for quad and stereo-projection layers.
pub fn unit_quad() -> [MeshVertex; 6] {
    [
        MeshVertex { position: Vec3::new(-0.5, -0.5, 0.0), uv: (0.0, 1.0) },
        MeshVertex { position: Vec3::new(0.5, -0.5, 0.0), uv: (1.0, 1.0) },
        MeshVertex { position: Vec3::new(0.5, 0.5, 0.0), uv: (1.0, 0.0) },
        MeshVertex { position: Vec3::new(-0.5, -0.5, 0.0), uv: (0.0, 1.0) },
        MeshVertex { position: Vec3::new(0.5, 0.5, 0.0), uv: (1.0, 0.0) },
        MeshVertex { position: Vec3::new(-0.5, 0.5, 0.0), uv: (0.0, 0.0) },
    ]
}

const CYLINDER_FACES: usize = 360;
const CYLINDER_VERTICES_PER_FACE: usize = 6;

/// A cylinder layer's tessellated surface segment, per §4.4: 360 faces, 6 vertices per face,
/// regenerated whenever `central_angle` changes (§8 scenario 5).
#[derive(Clone, Debug)]
pub struct CylinderMesh {
    radius: f32,
    central_angle: f32,
    aspect_ratio: f32,
    vertices: Vec<MeshVertex>,
}

impl CylinderMesh {
    /// Builds (tessellates) a new mesh for the given parameters.
    pub fn new(radius: f32, central_angle: f32, aspect_ratio: f32) -> Self {
        let mut mesh = Self {
            radius,
            central_angle,
            aspect_ratio,
            vertices: Vec::with_capacity(CYLINDER_FACES * CYLINDER_VERTICES_PER_FACE),
        };
        mesh.tessellate();
        mesh
    }

    /// Re-tessellates in place only if any parameter changed since the last build, matching the
    /// "regenerated when central_angle changes" requirement without doing needless GPU uploads
    /// every frame when the submission is unchanged.
    pub fn update(&mut self, radius: f32, central_angle: f32, aspect_ratio: f32) -> bool {
        if self.radius == radius && self.central_angle == central_angle && self.aspect_ratio == aspect_ratio {
            return false;
        }

        self.radius = radius;
        self.central_angle = central_angle;
        self.aspect_ratio = aspect_ratio;
        self.tessellate();
        true
    }

    fn tessellate(&mut self) {
        self.vertices.clear();

        let half_height = self.radius / self.aspect_ratio.max(f32::EPSILON);
        let angle_step = self.central_angle / CYLINDER_FACES as f32;
        let start_angle = -self.central_angle / 2.0;

        for face in 0..CYLINDER_FACES {
            let theta0 = start_angle + face as f32 * angle_step;
            let theta1 = theta0 + angle_step;

            let p0 = cylinder_point(self.radius, theta0, -half_height);
            let p1 = cylinder_point(self.radius, theta1, -half_height);
            let p2 = cylinder_point(self.radius, theta1, half_height);
            let p3 = cylinder_point(self.radius, theta0, half_height);

            let u0 = face as f32 / CYLINDER_FACES as f32;
            let u1 = (face + 1) as f32 / CYLINDER_FACES as f32;

            self.vertices.extend_from_slice(&[
                MeshVertex { position: p0, uv: (u0, 1.0) },
                MeshVertex { position: p1, uv: (u1, 1.0) },
                MeshVertex { position: p2, uv: (u1, 0.0) },
                MeshVertex { position: p0, uv: (u0, 1.0) },
                MeshVertex { position: p2, uv: (u1, 0.0) },
                MeshVertex { position: p3, uv: (u0, 0.0) },
            ]);
        }
    }

    pub fn vertices(&self) -> &[MeshVertex] {
        &self.vertices
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.aspect_ratio
    }
}

fn cylinder_point(radius: f32, theta: f32, y: f32) -> Vec3 {
    Vec3::new(radius * theta.sin(), y, -radius * theta.cos())
}

/// A full-screen sphere quad used for equirect layers: geometry is a single quad that covers the
/// viewport, with the sphere sampling math done per-pixel in the shader; this matches the
/// rasterization path's "full-screen sphere quad for equirect" note in §4.4.
pub fn equirect_fullscreen_quad() -> [MeshVertex; 6] {
    unit_quad()
}

/// Per-channel UV remap used by the distortion pass: separate red/green/blue UV textures for
/// chromatic correction, per the GPU resource bundle's distortion-mesh resources in §3.
#[derive(Clone, Debug)]
pub struct DistortionUvChannels {
    pub red: Vec<(f32, f32)>,
    pub green: Vec<(f32, f32)>,
    pub blue: Vec<(f32, f32)>,
}

impl DistortionUvChannels {
    /// `true` if all three channels carry the same number of samples, the precondition for
    /// building the device-specific distortion mesh from them.
    pub fn is_consistent(&self) -> bool {
        self.red.len() == self.green.len() && self.green.len() == self.blue.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cylinder_mesh_has_360_faces_of_6_vertices() {
        let mesh = CylinderMesh::new(1.0, std::f32::consts::PI / 2.0, 1.0);
        assert_eq!(mesh.vertices().len(), CYLINDER_FACES * CYLINDER_VERTICES_PER_FACE);
    }

    #[test]
    fn update_with_same_parameters_is_a_no_op() {
        let mut mesh = CylinderMesh::new(1.0, std::f32::consts::PI / 2.0, 1.0);
        assert!(!mesh.update(1.0, std::f32::consts::PI / 2.0, 1.0));
    }

    #[test]
    fn update_with_new_central_angle_retessellates() {
        let mut mesh = CylinderMesh::new(1.0, std::f32::consts::PI / 2.0, 1.0);
        assert!(mesh.update(1.0, std::f32::consts::PI, 1.0));
        assert_eq!(mesh.central_angle, std::f32::consts::PI);
        assert_eq!(mesh.vertices().len(), CYLINDER_FACES * CYLINDER_VERTICES_PER_FACE);
    }

    #[test]
    fn distortion_channels_must_have_matching_lengths() {
        let channels = DistortionUvChannels {
            red: vec![(0.0, 0.0); 4],
            green: vec![(0.0, 0.0); 4],
            blue: vec![(0.0, 0.0); 3],
        };
        assert!(!channels.is_consistent());
    }
}
