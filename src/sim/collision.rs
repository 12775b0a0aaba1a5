//! Ground collision probe
//!
//! A single ray cast forward along the lane from the avatar's collision
//! anchor, intersected against every active obstacle box. The nearest hit
//! within tolerance is the confirmed collision; being airborne during the
//! check window is what makes a dodge succeed, so the probe is only run
//! while the avatar is grounded.

use glam::Vec3;

use super::obstacles::Obstacle;
use crate::consts::*;

/// Vertical offset from the avatar origin to its collision anchor, placing
/// the probe at obstacle height
pub const PROBE_OFFSET_Y: f32 = 0.04;

/// Obstacles scroll toward the avatar from negative z
pub const PROBE_DIR: Vec3 = Vec3::new(0.0, 0.0, -1.0);

/// Nearest obstacle intersected by the probe
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProbeHit {
    pub id: super::obstacles::ObstacleId,
    pub distance: f32,
}

/// Ray vs axis-aligned box (slab test). Returns the entry distance along
/// `dir`, clamped to 0 when the origin starts inside the box.
fn ray_box_distance(origin: Vec3, dir: Vec3, center: Vec3, half: Vec3) -> Option<f32> {
    let mut t_min = f32::NEG_INFINITY;
    let mut t_max = f32::INFINITY;

    for axis in 0..3 {
        let o = origin[axis];
        let d = dir[axis];
        let lo = center[axis] - half[axis];
        let hi = center[axis] + half[axis];

        if d.abs() < 1e-8 {
            // Ray parallel to this slab: must already be inside it
            if o < lo || o > hi {
                return None;
            }
        } else {
            let inv = 1.0 / d;
            let (t0, t1) = {
                let a = (lo - o) * inv;
                let b = (hi - o) * inv;
                if a <= b { (a, b) } else { (b, a) }
            };
            t_min = t_min.max(t0);
            t_max = t_max.min(t1);
            if t_min > t_max {
                return None;
            }
        }
    }

    if t_max < 0.0 {
        // Box entirely behind the probe
        return None;
    }
    Some(t_min.max(0.0))
}

/// Cast a probe from `origin` along `dir` against all active obstacles and
/// return the nearest intersection. Stateless and pure given its inputs.
pub fn probe<'a, I>(origin: Vec3, dir: Vec3, obstacles: I) -> Option<ProbeHit>
where
    I: IntoIterator<Item = &'a Obstacle>,
{
    let half = Vec3::from_array(OBSTACLE_HALF_EXTENTS);
    let mut nearest: Option<ProbeHit> = None;
    for obstacle in obstacles {
        if let Some(distance) = ray_box_distance(origin, dir, obstacle.pos, half) {
            let closer = nearest.map(|h| distance < h.distance).unwrap_or(true);
            if closer {
                nearest = Some(ProbeHit {
                    id: obstacle.id,
                    distance,
                });
            }
        }
    }
    nearest
}

/// Ground-level collision check: probe from the avatar's collision anchor
/// and report a hit when the nearest obstacle is within `tolerance`
/// (boundary inclusive).
pub fn check_ground_hit<'a, I>(avatar_pos: Vec3, obstacles: I, tolerance: f32) -> Option<ProbeHit>
where
    I: IntoIterator<Item = &'a Obstacle>,
{
    let anchor = avatar_pos + Vec3::new(0.0, PROBE_OFFSET_Y, 0.0);
    probe(anchor, PROBE_DIR, obstacles).filter(|hit| hit.distance <= tolerance)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::obstacles::ObstacleId;

    fn obstacle_at(id: u32, z: f32) -> Obstacle {
        Obstacle::test_at(ObstacleId(id), Vec3::new(0.0, OBSTACLE_Y, z))
    }

    fn avatar_grounded() -> Vec3 {
        Vec3::new(0.0, AVATAR_REST_Y, AVATAR_Z)
    }

    #[test]
    fn test_hit_at_exact_tolerance_boundary() {
        // Near face exactly HIT_TOLERANCE in front of the anchor
        let z = AVATAR_Z - HIT_TOLERANCE - OBSTACLE_HALF_EXTENTS[2];
        let obstacles = [obstacle_at(1, z)];
        let hit = check_ground_hit(avatar_grounded(), &obstacles, HIT_TOLERANCE);
        let hit = hit.expect("boundary distance counts as a hit");
        assert!((hit.distance - HIT_TOLERANCE).abs() < 1e-5);
    }

    #[test]
    fn test_miss_just_beyond_tolerance() {
        let z = AVATAR_Z - HIT_TOLERANCE - OBSTACLE_HALF_EXTENTS[2] - 0.001;
        let obstacles = [obstacle_at(1, z)];
        assert!(check_ground_hit(avatar_grounded(), &obstacles, HIT_TOLERANCE).is_none());
    }

    #[test]
    fn test_nearest_of_several_wins() {
        let near = AVATAR_Z - 0.03 - OBSTACLE_HALF_EXTENTS[2];
        let far = AVATAR_Z - 0.05 - OBSTACLE_HALF_EXTENTS[2];
        let obstacles = [obstacle_at(1, far), obstacle_at(2, near)];
        let hit = check_ground_hit(avatar_grounded(), &obstacles, HIT_TOLERANCE).unwrap();
        assert_eq!(hit.id, ObstacleId(2));
    }

    #[test]
    fn test_airborne_anchor_clears_obstacle() {
        // Probe height while at the jump peak passes over the obstacle box
        let z = AVATAR_Z - 0.02 - OBSTACLE_HALF_EXTENTS[2];
        let obstacles = [obstacle_at(1, z)];
        let airborne = Vec3::new(0.0, AVATAR_PEAK_Y, AVATAR_Z);
        assert!(check_ground_hit(airborne, &obstacles, HIT_TOLERANCE).is_none());
    }

    #[test]
    fn test_obstacle_behind_probe_ignored() {
        // Already scrolled past the avatar
        let obstacles = [obstacle_at(1, AVATAR_Z + 0.5)];
        assert!(check_ground_hit(avatar_grounded(), &obstacles, HIT_TOLERANCE).is_none());
    }

    #[test]
    fn test_overlapping_box_reports_zero_distance() {
        let obstacles = [obstacle_at(1, AVATAR_Z)];
        let hit = check_ground_hit(avatar_grounded(), &obstacles, HIT_TOLERANCE).unwrap();
        assert_eq!(hit.distance, 0.0);
    }
}
