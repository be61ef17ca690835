use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Radius of the animated light's orbit.
const ORBIT_RADIUS: f32 = 5.0;
/// Orbit center offset along Z.
const ORBIT_CENTER_Z: f32 = -5.0;

/// Point light and flashlight switches owned by the scene.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Lighting {
    pub enabled: bool,
    pub position: Vec3,
    pub color: Vec3,
    /// Orbit the light around the arena over time.
    pub animate: bool,
    /// Camera-mounted cone light.
    pub spotlight: bool,
    pub spot_cutoff_degrees: f32,
    /// Render normals as colors instead of shading.
    pub show_normals: bool,
}

impl Default for Lighting {
    fn default() -> Self {
        Self {
            enabled: true,
            position: Vec3::new(2.0, 3.0, -5.0),
            color: Vec3::ONE,
            animate: true,
            spotlight: false,
            spot_cutoff_degrees: 15.0,
            show_normals: false,
        }
    }
}

impl Lighting {
    /// Move the light along its orbit for time `seconds`. No-op when animation is off.
    pub fn advance(&mut self, seconds: f32) {
        if !self.animate {
            return;
        }
        self.position.x = ORBIT_RADIUS * seconds.cos();
        self.position.z = ORBIT_RADIUS * seconds.sin() + ORBIT_CENTER_Z;
    }

    /// Place the light by hand. Stops the orbit so the manual position sticks.
    pub fn place(&mut self, position: Vec3) {
        self.animate = false;
        self.position = position;
    }

    /// Per-frame shader parameters. The spotlight rides on the camera.
    pub fn uniforms(&self, eye: Vec3, forward: Vec3) -> LightingUniforms {
        LightingUniforms {
            enabled: self.enabled,
            position: self.position,
            color: self.color,
            camera_position: eye,
            spotlight: self.spotlight.then(|| Spotlight {
                position: eye,
                direction: forward,
                cutoff_cos: self.spot_cutoff_degrees.to_radians().cos(),
            }),
            show_normals: self.show_normals,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spotlight {
    pub position: Vec3,
    pub direction: Vec3,
    /// Cosine of the half-angle; fragments with a smaller cosine are unlit.
    pub cutoff_cos: f32,
}

/// Lighting parameters handed to the rasterizer once per frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightingUniforms {
    pub enabled: bool,
    pub position: Vec3,
    pub color: Vec3,
    pub camera_position: Vec3,
    pub spotlight: Option<Spotlight>,
    pub show_normals: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn orbit_follows_time() {
        let mut light = Lighting::default();
        light.advance(0.0);
        assert!((light.position - Vec3::new(5.0, 3.0, -5.0)).length() < 1e-5);
        light.advance(std::f32::consts::FRAC_PI_2);
        assert!((light.position - Vec3::new(0.0, 3.0, 0.0)).length() < 1e-5);
    }

    #[test]
    fn manual_placement_stops_orbit() {
        let mut light = Lighting::default();
        light.place(Vec3::new(1.0, 2.0, 3.0));
        light.advance(10.0);
        assert_eq!(light.position, Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn spotlight_rides_on_camera() {
        let mut light = Lighting::default();
        assert!(light.uniforms(Vec3::ZERO, Vec3::NEG_Z).spotlight.is_none());

        light.spotlight = true;
        let spot = light
            .uniforms(Vec3::new(1.0, 0.5, 0.0), Vec3::NEG_Z)
            .spotlight
            .unwrap();
        assert_eq!(spot.position, Vec3::new(1.0, 0.5, 0.0));
        assert_eq!(spot.direction, Vec3::NEG_Z);
        assert!((spot.cutoff_cos - 15.0_f32.to_radians().cos()).abs() < 1e-6);
    }
}
