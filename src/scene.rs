//! Narrow bridge to the external scene-graph engine
//!
//! 3D rendering, model loading, lighting and camera control all live in an
//! external engine. The game reaches it only through [`SceneBridge`]:
//! structural changes (add/remove obstacle objects) are replayed from the
//! sim's event queue, per-object transforms are pushed every frame.

use std::collections::BTreeMap;

use glam::Vec3;

use crate::sim::{GameEvent, GameState, ObstacleId};

/// What the game asks of the scene engine. Consumed, never reimplemented.
pub trait SceneBridge {
    fn add_obstacle(&mut self, id: ObstacleId, pos: Vec3);
    fn remove_obstacle(&mut self, id: ObstacleId);
    fn set_obstacle_position(&mut self, id: ObstacleId, pos: Vec3);
    /// Vertical position of the avatar model
    fn set_avatar_y(&mut self, y: f32);
    /// Ground texture offset for the scrolling lane
    fn set_ground_scroll(&mut self, offset: f32);
    /// Run-animation clip time and pause flag
    fn set_run_clip(&mut self, time: f32, paused: bool);
    /// Draw the current frame
    fn render(&mut self);
}

/// Replay one step's structural scene changes from the sim event queue
pub fn apply_events(events: &[GameEvent], scene: &mut impl SceneBridge) {
    for event in events {
        match *event {
            GameEvent::ObstacleSpawned { id, pos } => scene.add_obstacle(id, pos),
            GameEvent::ObstacleRemoved { id } => scene.remove_obstacle(id),
            GameEvent::LifeLost { .. } | GameEvent::GameOver => {}
        }
    }
}

/// Push per-frame transforms: obstacle positions, avatar height, ground
/// scroll and the run clip.
pub fn sync_transforms(state: &GameState, scene: &mut impl SceneBridge) {
    for obstacle in state.obstacles.iter() {
        scene.set_obstacle_position(obstacle.id, obstacle.pos);
    }
    scene.set_ground_scroll(state.ground_scroll);
    if state.avatar_ready {
        scene.set_avatar_y(state.avatar.y());
        scene.set_run_clip(state.anim_time, state.anim_paused);
    }
}

/// In-memory scene for tests and headless runs. Tracks live objects and
/// counts structural calls so exactly-once disposal is checkable.
#[derive(Debug, Default)]
pub struct RecordingScene {
    pub objects: BTreeMap<ObstacleId, Vec3>,
    pub adds: usize,
    pub removes: usize,
    /// Removals for ids that were not in the scene
    pub stale_removes: usize,
    pub avatar_y: f32,
    pub ground_scroll: f32,
    pub frames_rendered: usize,
}

impl RecordingScene {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SceneBridge for RecordingScene {
    fn add_obstacle(&mut self, id: ObstacleId, pos: Vec3) {
        self.objects.insert(id, pos);
        self.adds += 1;
    }

    fn remove_obstacle(&mut self, id: ObstacleId) {
        if self.objects.remove(&id).is_none() {
            self.stale_removes += 1;
        }
        self.removes += 1;
    }

    fn set_obstacle_position(&mut self, id: ObstacleId, pos: Vec3) {
        if let Some(entry) = self.objects.get_mut(&id) {
            *entry = pos;
        }
    }

    fn set_avatar_y(&mut self, y: f32) {
        self.avatar_y = y;
    }

    fn set_ground_scroll(&mut self, offset: f32) {
        self.ground_scroll = offset;
    }

    fn set_run_clip(&mut self, _time: f32, _paused: bool) {}

    fn render(&mut self) {
        self.frames_rendered += 1;
    }
}
