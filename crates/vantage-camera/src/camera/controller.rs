//! Third-person camera controller: mode switching, placement, smoothing

use glam::{Quat, Vec3};
use tracing::{debug, error, info, trace};
use vantage_core::{Color, NodeId, Transform, TransformHierarchy};

use crate::error::CameraError;
use crate::input::{CameraButton, CameraInput};
use crate::player::PlayerHandle;

use super::anchor::FirstPersonAnchor;
use super::letterbox::{smooth_step, LetterboxEffect};
use super::smoothing::SmoothedFollow;
use super::state::{CameraFrameResult, CameraState, DebugLine, StateTransition};
use super::walls::{compensate_for_walls, CollisionQuery};
use super::CameraConfig;

/// Targeting axis values at or below this count as released
pub const TARGETING_DEADZONE: f32 = 0.01;

/// Hierarchy nodes the controller drives
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CameraNodes {
    /// The camera itself; must be a root node
    pub camera: NodeId,
    /// The player, yawed by first-person look and parent of the eye anchor
    pub player: NodeId,
    /// The follow point the camera orbits
    pub follow: NodeId,
}

/// External state the controller reads and writes during a frame
pub struct CameraWorld<'a> {
    pub hierarchy: &'a mut TransformHierarchy,
    pub player: &'a mut dyn PlayerHandle,
    pub collision: &'a dyn CollisionQuery,
}

/// Camera controller
pub struct CameraController {
    /// Configuration
    pub config: CameraConfig,
    /// Current camera mode
    state: CameraState,
    /// Nodes resolved at attach time
    nodes: CameraNodes,
    /// Eye node under the player
    anchor: FirstPersonAnchor,
    /// Smooth-damp velocity state
    follow: SmoothedFollow,
    /// First-person pitch in degrees
    pitch: f32,
    /// Residual first-person look blend
    look_weight: f32,
    /// Letterbox bars eased while targeting
    letterbox: Option<Box<dyn LetterboxEffect>>,
    /// Desired position from the last processed frame
    target_position: Vec3,
    /// Look-at point from the last processed frame
    look_at: Vec3,
}

impl CameraController {
    /// Validate the scene and create the first-person anchor.
    ///
    /// A missing letterbox is logged and tolerated; everything else the
    /// controller needs must be present or this fails.
    pub fn attach(
        config: CameraConfig,
        world: &mut CameraWorld<'_>,
        nodes: CameraNodes,
        letterbox: Option<Box<dyn LetterboxEffect>>,
    ) -> Result<Self, CameraError> {
        config.validate()?;

        let hierarchy = &mut *world.hierarchy;
        for (role, node) in [
            ("camera", nodes.camera),
            ("player", nodes.player),
            ("follow", nodes.follow),
        ] {
            if !hierarchy.contains(node) {
                return Err(CameraError::MissingNode { role, node });
            }
        }
        if hierarchy.parent(nodes.camera).is_some() {
            return Err(CameraError::CameraParented(nodes.camera));
        }

        if letterbox.is_none() {
            error!("No letterbox effect attached to the camera; coverage easing disabled");
        }

        let anchor = FirstPersonAnchor::spawn(
            hierarchy,
            nodes.player,
            config.anchor_name.clone(),
            config.anchor_offset,
        )?;
        let camera_position = hierarchy
            .world_transform(nodes.camera)
            .map(|t| t.position)
            .unwrap_or_default();

        world.player.set_movement_enabled(true);
        info!(
            "Camera attached: camera={}, player={}, follow={}, anchor={}",
            nodes.camera,
            nodes.player,
            nodes.follow,
            anchor.node()
        );

        Ok(Self {
            config,
            state: CameraState::Behind,
            nodes,
            anchor,
            follow: SmoothedFollow::new(),
            pitch: 0.0,
            look_weight: 0.0,
            letterbox,
            target_position: camera_position,
            look_at: camera_position,
        })
    }

    pub fn state(&self) -> CameraState {
        self.state
    }

    /// First-person pitch in degrees (positive looks down)
    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    pub fn look_weight(&self) -> f32 {
        self.look_weight
    }

    pub fn anchor(&self) -> &FirstPersonAnchor {
        &self.anchor
    }

    pub fn nodes(&self) -> CameraNodes {
        self.nodes
    }

    /// Smooth-damp velocity carried into the next frame
    pub fn velocity(&self) -> Vec3 {
        self.follow.velocity()
    }

    /// Desired position from the last processed frame
    pub fn target_position(&self) -> Vec3 {
        self.target_position
    }

    /// Current letterbox coverage, if a letterbox is attached
    pub fn coverage(&self) -> Option<f32> {
        self.letterbox.as_ref().map(|bars| bars.coverage())
    }

    /// Park the camera where it is until a regular transition fires
    pub fn enter_free(&mut self) {
        if self.state != CameraState::Free {
            debug!(from = %self.state, "camera entering free mode");
            self.state = CameraState::Free;
        }
    }

    /// Run one frame. Call after all player movement for the frame.
    pub fn update(
        &mut self,
        dt: f32,
        input: &CameraInput,
        world: &mut CameraWorld<'_>,
    ) -> Result<CameraFrameResult, CameraError> {
        let mut camera = *world
            .hierarchy
            .local(self.nodes.camera)
            .ok_or(CameraError::MissingNode {
                role: "camera",
                node: self.nodes.camera,
            })?;

        if world.player.inventory_open() {
            trace!("inventory open, camera frozen");
            return Ok(CameraFrameResult {
                updated: false,
                state: self.state,
                transition: None,
                desired_position: self.target_position,
                look_at: self.look_at,
                camera,
                wall_hit: None,
                coverage: self.coverage(),
                debug_lines: Vec::new(),
            });
        }

        let follow = world
            .hierarchy
            .world_transform(self.nodes.follow)
            .ok_or(CameraError::MissingNode {
                role: "follow",
                node: self.nodes.follow,
            })?;

        let character_offset = follow.position + Vec3::Y * self.config.distance_up;
        let mut look_at = character_offset;

        let previous = self.state;
        self.evaluate_transitions(input, &camera);

        let desired = match self.state {
            CameraState::Behind => {
                self.relax_first_person(&mut camera, dt);
                let mut look_dir = character_offset - camera.position;
                look_dir.y = 0.0;
                let look_dir = look_dir.normalize_or_zero();
                world.player.set_movement_enabled(true);
                self.orbit_position(character_offset, &follow, look_dir)
            }
            CameraState::Target => {
                self.relax_first_person(&mut camera, dt);
                world.player.set_movement_enabled(true);
                self.orbit_position(character_offset, &follow, follow.forward())
            }
            CameraState::FirstPerson => {
                let (desired, blended) =
                    self.first_person(dt, input, &mut camera, world.hierarchy, look_at)?;
                look_at = blended;
                world.player.set_movement_enabled(false);
                desired
            }
            CameraState::Free => {
                look_at = camera.position + camera.forward();
                camera.position
            }
        };

        let wall = compensate_for_walls(world.collision, character_offset, desired);
        self.target_position = wall.position;
        self.look_at = look_at;

        camera.position = self.follow.step(
            camera.position,
            wall.position,
            self.config.smooth_time,
            self.config.max_speed,
            dt,
        );
        if self.state != CameraState::FirstPerson || self.config.first_person_look_at {
            camera.look_at(look_at, Vec3::Y);
        }

        if let Some(local) = world.hierarchy.local_mut(self.nodes.camera) {
            *local = camera;
        }

        let transition = (previous != self.state).then(|| StateTransition {
            from: previous,
            to: self.state,
        });
        if let Some(change) = transition {
            debug!(from = %change.from, to = %change.to, "camera state changed");
        }
        trace!(
            state = %self.state,
            position = ?camera.position,
            desired = ?wall.position,
            "camera frame"
        );

        let debug_lines = if self.config.debug_draw {
            self.debug_lines(&follow, character_offset, desired, wall.hit)
        } else {
            Vec::new()
        };

        Ok(CameraFrameResult {
            updated: true,
            state: self.state,
            transition,
            desired_position: wall.position,
            look_at,
            camera,
            wall_hit: wall.hit,
            coverage: self.coverage(),
            debug_lines,
        })
    }

    /// Decide this frame's mode. Targeting always wins.
    fn evaluate_transitions(&mut self, input: &CameraInput, camera: &Transform) {
        if input.target > TARGETING_DEADZONE {
            self.ease_coverage(self.config.wide_screen);
            self.state = CameraState::Target;
            return;
        }

        self.ease_coverage(0.0);
        if input.right_stick.y > self.config.first_person_threshold
            || input.is_just_pressed(CameraButton::Look)
        {
            self.anchor.record_prior_pose(*camera);
            self.pitch = 0.0;
            self.look_weight = 0.0;
            self.state = CameraState::FirstPerson;
        }

        let leave_first_person = self.state == CameraState::FirstPerson
            && input.is_held(CameraButton::ExitFirstPerson);
        if leave_first_person || input.is_just_released(CameraButton::Look) {
            self.state = CameraState::Behind;
        }
    }

    fn ease_coverage(&mut self, goal: f32) {
        let blend = self.config.targeting_blend;
        if let Some(bars) = self.letterbox.as_mut() {
            let eased = smooth_step(bars.coverage(), goal, blend);
            bars.set_coverage(eased);
        }
    }

    /// Fade out leftovers from first person while orbiting
    fn relax_first_person(&mut self, camera: &mut Transform, dt: f32) {
        let t = (dt * self.config.first_person_look_speed).clamp(0.0, 1.0);
        self.look_weight += (0.0 - self.look_weight) * t;
        camera.rotation = camera.rotation.lerp(Quat::IDENTITY, dt.clamp(0.0, 1.0));
    }

    fn orbit_position(&self, character_offset: Vec3, follow: &Transform, look_dir: Vec3) -> Vec3 {
        character_offset + follow.up() * self.config.distance_up - look_dir * self.config.distance_away
    }

    /// Pitch the eye, turn the camera onto it, yaw the player.
    /// Returns the desired position and the blended look-at point.
    fn first_person(
        &mut self,
        dt: f32,
        input: &CameraInput,
        camera: &mut Transform,
        hierarchy: &mut TransformHierarchy,
        look_at: Vec3,
    ) -> Result<(Vec3, Vec3), CameraError> {
        self.pitch = (self.pitch + input.move_axis.y * self.config.first_person_look_speed)
            .clamp(self.config.pitch_min, self.config.pitch_max);
        self.anchor.set_pitch(hierarchy, self.pitch)?;

        let eye = self.anchor.world_transform(hierarchy)?;
        if let (Some(from), Some(to)) = (
            camera.forward().try_normalize(),
            eye.forward().try_normalize(),
        ) {
            camera.rotate(Quat::from_rotation_arc(from, to));
        }

        // Positive horizontal input turns the player right (clockwise from above).
        let yaw = (self.config.fps_rotation_degrees_per_second * input.move_axis.x * dt).to_radians();
        let player = hierarchy
            .local_mut(self.nodes.player)
            .ok_or(CameraError::MissingNode {
                role: "player",
                node: self.nodes.player,
            })?;
        player.rotation = (player.rotation * Quat::from_rotation_y(-yaw)).normalize();

        let eye_position = self.anchor.world_transform(hierarchy)?.position;

        // Weighted by the camera-to-eye distance rather than a look weight; any
        // distance of a unit or more saturates to `look_at`.
        let weight = camera.position.distance(eye_position).clamp(0.0, 1.0);
        let blended = (camera.position + camera.forward()).lerp(look_at, weight);

        Ok((eye_position, blended))
    }

    fn debug_lines(
        &self,
        follow: &Transform,
        character_offset: Vec3,
        desired: Vec3,
        hit: Option<Vec3>,
    ) -> Vec<DebugLine> {
        let mut lines = vec![
            DebugLine {
                start: follow.position,
                end: follow.position + Vec3::Y * self.config.distance_up,
                color: Color::RED,
            },
            DebugLine {
                start: follow.position,
                end: follow.position - follow.forward() * self.config.distance_away,
                color: Color::BLUE,
            },
            DebugLine {
                start: follow.position,
                end: desired,
                color: Color::MAGENTA,
            },
            DebugLine {
                start: character_offset,
                end: desired,
                color: Color::CYAN,
            },
        ];
        if let Some(point) = hit {
            lines.push(DebugLine {
                start: point,
                end: point + Vec3::NEG_X,
                color: Color::RED,
            });
        }
        lines
    }
}
