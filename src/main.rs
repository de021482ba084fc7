//! Vantage - third-person camera driver
//!
//! Builds a small walled scene, then drives the camera controller through a
//! scripted input timeline at a fixed frame rate and logs what it does.

mod settings;

use anyhow::{Context, Result};
use glam::{Vec2, Vec3};
use tracing::{debug, info, warn};
use tracing_subscriber::filter::{EnvFilter, LevelFilter};
use tracing_subscriber::FmtSubscriber;

use vantage_camera::camera::BarEffect;
use vantage_camera::{
    CameraButton, CameraController, CameraFrameResult, CameraInput, CameraNodes, CameraWorld,
    PlayerFlags, PlayerHandle, SceneQuery,
};
use vantage_core::{GameTime, NodeId, Transform, TransformHierarchy};
use vantage_physics::PhysicsWorld;

use settings::{DemoSettings, SettingsOrigin};

/// Player walk speed in units per second
const WALK_SPEED: f32 = 3.0;

/// Scene and camera state for one run
struct VantageApp {
    physics: PhysicsWorld,
    hierarchy: TransformHierarchy,
    player: PlayerFlags,
    player_node: NodeId,
    camera: CameraController,
    input: CameraInput,
    game_time: GameTime,
}

impl VantageApp {
    fn new(settings: &DemoSettings) -> Result<Self> {
        let mut physics = PhysicsWorld::new();
        physics.create_ground(0.0);
        // Wall behind the start point so the camera has something to slide along.
        physics.create_static_box(Vec3::new(6.0, 3.0, 0.25), Vec3::new(0.0, 3.0, 3.5));
        // Pillar the player walks past.
        physics.create_static_box(Vec3::new(0.5, 3.0, 0.5), Vec3::new(2.0, 3.0, -4.0));

        let mut hierarchy = TransformHierarchy::new();
        let player_node = hierarchy.spawn("Player", Transform::default());
        let follow = hierarchy
            .spawn_child(
                player_node,
                "PlayerFollow",
                Transform::from_position(Vec3::new(0.0, 1.0, 0.0)),
            )
            .context("Failed to create follow node")?;
        let camera_node = hierarchy.spawn(
            "Main Camera",
            Transform::from_position(Vec3::new(0.0, 4.0, 6.0)),
        );

        let mut player = PlayerFlags::default();
        let nodes = CameraNodes {
            camera: camera_node,
            player: player_node,
            follow,
        };
        let camera = {
            let mut world = CameraWorld {
                hierarchy: &mut hierarchy,
                player: &mut player,
                collision: &SceneQuery::new(&physics),
            };
            CameraController::attach(
                settings.camera.clone(),
                &mut world,
                nodes,
                Some(Box::new(BarEffect::default())),
            )
            .context("Failed to attach camera")?
        };

        Ok(Self {
            physics,
            hierarchy,
            player,
            player_node,
            camera,
            input: CameraInput::new(),
            game_time: GameTime::new(settings.time.clone()),
        })
    }

    /// Advance one frame: player movement on fixed steps, then the camera.
    fn update(&mut self, delta: f32) -> Result<CameraFrameResult> {
        self.game_time.update(delta);
        script_input(
            self.game_time.total_time as f32,
            &mut self.input,
            &mut self.player,
            &mut self.camera,
        );

        let steps = self.game_time.fixed_steps();
        let step_dt = self.game_time.config.fixed_timestep;
        for _ in 0..steps {
            self.move_player(step_dt);
        }

        let mut world = CameraWorld {
            hierarchy: &mut self.hierarchy,
            player: &mut self.player,
            collision: &SceneQuery::new(&self.physics),
        };
        let result = self
            .camera
            .update(self.game_time.delta_time, &self.input, &mut world)?;
        self.input.clear_frame();
        Ok(result)
    }

    fn move_player(&mut self, dt: f32) {
        if !self.player.movement_enabled() || self.player.inventory_open() {
            return;
        }
        let Some(player) = self.hierarchy.local_mut(self.player_node) else {
            return;
        };
        let forward = player.forward();
        let right = player.right();
        let axis = self.input.move_axis;
        player.translate((forward * axis.y + right * axis.x) * WALK_SPEED * dt);
    }
}

/// Input timeline, in seconds of game time
fn script_input(
    time: f32,
    input: &mut CameraInput,
    player: &mut PlayerFlags,
    camera: &mut CameraController,
) {
    input.right_stick = Vec2::ZERO;
    input.target = 0.0;
    input.move_axis = Vec2::ZERO;

    match time {
        // Walk forward, then back toward the wall.
        t if t < 2.0 => input.move_axis = Vec2::new(0.0, 1.0),
        t if t < 3.0 => input.move_axis = Vec2::new(0.3, -1.0),
        // Targeting while strafing.
        t if t < 4.5 => {
            input.target = 1.0;
            input.move_axis = Vec2::new(1.0, 0.0);
        }
        // First person: look down and turn right.
        t if t < 6.0 => {
            input.press(CameraButton::Look);
            input.move_axis = Vec2::new(0.5, if t < 5.0 { 1.0 } else { -1.0 });
        }
        t if t < 7.0 => {
            input.release(CameraButton::Look);
            player.show_inventory = (6.3..6.8).contains(&t);
        }
        t if t < 8.0 => camera.enter_free(),
        t if t < 8.5 => input.right_stick = Vec2::new(0.0, 1.0),
        _ => input.press(CameraButton::ExitFirstPerson),
    }
}

fn main() -> Result<()> {
    let (settings, origin) = DemoSettings::load();

    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(settings.run.level()).into())
        .from_env_lossy();
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber).context("Failed to set subscriber")?;

    info!("Starting Vantage camera driver...");
    origin.log();
    if let SettingsOrigin::Defaults(path) = &origin {
        if let Err(e) = settings.save() {
            warn!("Could not write default settings to {:?}: {:#}", path, e);
        }
    }

    let mut app = VantageApp::new(&settings)?;
    let delta = settings.run.frame_delta();
    let mut transitions = 0;
    let mut skipped = 0;

    for frame in 0..settings.run.frames {
        let result = app.update(delta)?;
        if !result.updated {
            skipped += 1;
            continue;
        }
        if let Some(change) = result.transition {
            transitions += 1;
            info!(
                "Frame {}: camera {} -> {} at {:.2?}",
                frame,
                change.from,
                change.to,
                result.position()
            );
        }
        if let Some(hit) = result.wall_hit {
            debug!("Frame {}: wall hit at {:.2?}", frame, hit);
        }
        for line in &result.debug_lines {
            debug!(
                "Frame {}: line {:.2?} -> {:.2?} {:?}",
                frame,
                line.start,
                line.end,
                line.color.to_array()
            );
        }
    }

    info!(
        "Run finished: {} frames, {} transitions, {} frozen, final state {}, coverage {:?}",
        settings.run.frames,
        transitions,
        skipped,
        app.camera.state(),
        app.camera.coverage()
    );
    Ok(())
}
