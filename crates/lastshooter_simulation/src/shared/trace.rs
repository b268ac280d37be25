//! Trace collaborators — ray-cast primitive и deprojection экрана
//!
//! Simulation не владеет геометрией мира. Engine adapter реализует:
//! - `WorldTracer` — line trace (visibility channel), первый blocking hit
//! - `Viewport` — центр экрана (crosshair) → world ray
//!
//! Для headless прогонов и тестов есть `SceneGeometry` (аналитические plane/sphere)
//! и `CrosshairRay` (ray, который engine пишет каждый frame).

use bevy::prelude::*;

/// World-space ray (direction не обязан быть normalized)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self { origin, direction }
    }

    /// Точка на расстоянии `distance` вдоль normalized direction
    pub fn point_at(&self, distance: f32) -> Vec3 {
        self.origin + self.direction.normalize_or_zero() * distance
    }
}

/// Blocking hit от line trace
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TraceHit {
    /// Точка попадания (world space)
    pub location: Vec3,
    /// Actor, которому принадлежит поверхность (None = статическая геометрия)
    pub actor: Option<Entity>,
}

/// Line trace primitive (engine physics / headless scene)
pub trait WorldTracer {
    /// First blocking hit on the segment `start → end`, or None.
    fn raycast(&self, start: Vec3, end: Vec3) -> Option<TraceHit>;
}

/// Screen-center deprojection (player viewport)
pub trait Viewport {
    /// None = viewport/controller недоступен в этом frame
    fn deproject_screen_center(&self) -> Option<Ray>;
}

/// Crosshair ray resource
///
/// Engine adapter пишет сюда deprojected центр экрана каждый frame.
/// `None` — нет viewport (loading, dedicated server) → trace пропускается.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq)]
pub struct CrosshairRay(pub Option<Ray>);

impl Viewport for CrosshairRay {
    fn deproject_screen_center(&self) -> Option<Ray> {
        self.0
    }
}

/// Аналитическая форма для headless сцены
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SceneShape {
    /// Бесконечная плоскость (пол, стена)
    Plane { point: Vec3, normal: Vec3 },
    /// Сфера (collision volume предмета или актёра)
    Sphere { center: Vec3, radius: f32 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneBody {
    pub shape: SceneShape,
    pub actor: Option<Entity>,
}

/// Headless world geometry (blocking для visibility channel)
#[derive(Resource, Debug, Clone, Default)]
pub struct SceneGeometry {
    pub bodies: Vec<SceneBody>,
}

impl SceneGeometry {
    pub fn with_plane(mut self, point: Vec3, normal: Vec3) -> Self {
        self.bodies.push(SceneBody {
            shape: SceneShape::Plane { point, normal },
            actor: None,
        });
        self
    }

    pub fn with_sphere(mut self, center: Vec3, radius: f32, actor: Option<Entity>) -> Self {
        self.bodies.push(SceneBody {
            shape: SceneShape::Sphere { center, radius },
            actor,
        });
        self
    }

    /// Убрать все тела, принадлежащие actor (предмет подобран/уничтожен)
    pub fn remove_actor(&mut self, actor: Entity) {
        self.bodies.retain(|body| body.actor != Some(actor));
    }
}

impl WorldTracer for SceneGeometry {
    fn raycast(&self, start: Vec3, end: Vec3) -> Option<TraceHit> {
        let segment = end - start;
        let length = segment.length();
        if length <= f32::EPSILON {
            return None;
        }
        let direction = segment / length;

        self.bodies
            .iter()
            .filter_map(|body| {
                intersect(&body.shape, start, direction, length).map(|distance| (distance, body))
            })
            .min_by(|(a, _), (b, _)| a.total_cmp(b))
            .map(|(distance, body)| TraceHit {
                location: start + direction * distance,
                actor: body.actor,
            })
    }
}

/// Distance along `direction` to the first intersection within `max_distance`.
fn intersect(shape: &SceneShape, start: Vec3, direction: Vec3, max_distance: f32) -> Option<f32> {
    match *shape {
        SceneShape::Plane { point, normal } => {
            let denom = normal.dot(direction);
            if denom.abs() <= f32::EPSILON {
                return None;
            }
            let distance = normal.dot(point - start) / denom;
            (0.0..=max_distance).contains(&distance).then_some(distance)
        }
        SceneShape::Sphere { center, radius } => {
            let to_start = start - center;
            let b = to_start.dot(direction);
            let c = to_start.length_squared() - radius * radius;

            // Старт снаружи и луч смотрит от сферы
            if c > 0.0 && b > 0.0 {
                return None;
            }

            let discriminant = b * b - c;
            if discriminant < 0.0 {
                return None;
            }

            // Старт внутри сферы → hit в точке старта
            let distance = (-b - discriminant.sqrt()).max(0.0);
            (distance <= max_distance).then_some(distance)
        }
    }
}
