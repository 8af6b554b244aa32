//! Rotation controller: the single entry point for face turns.
//!
//! Only one turn may be in flight. Requests that arrive while a turn is
//! animating are dropped, not queued.

use std::f32::consts::FRAC_PI_2;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::animation::{AnimationConfig, AnimationEngine, AnimationSink};
use crate::cubelet::Cubelet;
use crate::error::{CommandError, ParseError};
use crate::geometry::LayerSign::{Negative as Neg, Positive as Pos};
use crate::geometry::{Axis, LayerSign, Transform};
use crate::pivot::PivotGroup;
use crate::store::CubeStore;

use self::Direction::{Clockwise as Cw, CounterClockwise as Ccw};

/// Turn direction as seen looking at the turned face from outside the cube.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Clockwise,
    CounterClockwise,
}

impl Direction {
    /// `+1` for clockwise, `-1` for counter-clockwise.
    pub const fn value(self) -> i32 {
        match self {
            Direction::Clockwise => 1,
            Direction::CounterClockwise => -1,
        }
    }

    /// The opposite turn.
    pub const fn reversed(self) -> Self {
        match self {
            Direction::Clockwise => Direction::CounterClockwise,
            Direction::CounterClockwise => Direction::Clockwise,
        }
    }
}

/// A request to turn one outer slice by a quarter turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RotationCommand {
    pub axis: Axis,
    pub sign: LayerSign,
    pub direction: Direction,
}

impl RotationCommand {
    pub const fn new(axis: Axis, sign: LayerSign, direction: Direction) -> Self {
        Self {
            axis,
            sign,
            direction,
        }
    }

    /// Validates an untyped `(axis, sign, direction)` triple from the input
    /// layer and decodes it through the move table.
    pub fn from_raw(axis: char, sign: i32, direction: i32) -> Result<Self, CommandError> {
        NamedMove::from_raw(axis, sign, direction).map(NamedMove::command)
    }

    /// Signed quarter turns about the positive axis.
    ///
    /// Clockwise seen from the positive side is a negative rotation about
    /// the axis; seen from the negative side it is a positive one.
    pub const fn quarter_turns(&self) -> i32 {
        -self.sign.value() * self.direction.value()
    }

    /// The angle, in radians, the pivot rotates through.
    pub fn signed_delta(&self) -> f32 {
        self.quarter_turns() as f32 * FRAC_PI_2
    }

    /// The command that undoes this one.
    pub const fn inverse(self) -> Self {
        Self::new(self.axis, self.sign, self.direction.reversed())
    }
}

impl TryFrom<(char, i32, i32)> for RotationCommand {
    type Error = CommandError;

    fn try_from((axis, sign, direction): (char, i32, i32)) -> Result<Self, Self::Error> {
        Self::from_raw(axis, sign, direction)
    }
}

impl fmt::Display for RotationCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = match self.sign {
            LayerSign::Positive => '+',
            LayerSign::Negative => '-',
        };
        let direction = match self.direction {
            Direction::Clockwise => "cw",
            Direction::CounterClockwise => "ccw",
        };
        write!(f, "{}{sign} {direction}", self.axis)
    }
}

/// The twelve face turns offered to the input layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NamedMove {
    LeftCw,
    LeftCcw,
    RightCw,
    RightCcw,
    BackCw,
    BackCcw,
    FrontCw,
    FrontCcw,
    TopCw,
    TopCcw,
    BottomCw,
    BottomCcw,
}

/// Name, command and input-layer direction of every [`NamedMove`], in
/// declaration order.
///
/// The raw direction is the `±1` the input layer sends for the move. It is
/// not `Direction::value`: on the Y and Z faces `+1` is a positive rotation
/// about the axis, on the X faces a negative one.
const MOVE_TABLE: [(&str, RotationCommand, i32); 12] = [
    ("left-cw", RotationCommand::new(Axis::X, Neg, Cw), -1),
    ("left-ccw", RotationCommand::new(Axis::X, Neg, Ccw), 1),
    ("right-cw", RotationCommand::new(Axis::X, Pos, Cw), 1),
    ("right-ccw", RotationCommand::new(Axis::X, Pos, Ccw), -1),
    ("back-cw", RotationCommand::new(Axis::Z, Neg, Cw), 1),
    ("back-ccw", RotationCommand::new(Axis::Z, Neg, Ccw), -1),
    ("front-cw", RotationCommand::new(Axis::Z, Pos, Cw), -1),
    ("front-ccw", RotationCommand::new(Axis::Z, Pos, Ccw), 1),
    ("top-cw", RotationCommand::new(Axis::Y, Pos, Cw), -1),
    ("top-ccw", RotationCommand::new(Axis::Y, Pos, Ccw), 1),
    ("bottom-cw", RotationCommand::new(Axis::Y, Neg, Cw), 1),
    ("bottom-ccw", RotationCommand::new(Axis::Y, Neg, Ccw), -1),
];

impl NamedMove {
    pub const ALL: [NamedMove; 12] = [
        NamedMove::LeftCw,
        NamedMove::LeftCcw,
        NamedMove::RightCw,
        NamedMove::RightCcw,
        NamedMove::BackCw,
        NamedMove::BackCcw,
        NamedMove::FrontCw,
        NamedMove::FrontCcw,
        NamedMove::TopCw,
        NamedMove::TopCcw,
        NamedMove::BottomCw,
        NamedMove::BottomCcw,
    ];

    /// Lowercase name used on the command line, e.g. `right-cw`.
    pub const fn name(self) -> &'static str {
        MOVE_TABLE[self as usize].0
    }

    pub const fn command(self) -> RotationCommand {
        MOVE_TABLE[self as usize].1
    }

    /// The `±1` direction the input layer sends for this move.
    pub const fn raw_direction(self) -> i32 {
        MOVE_TABLE[self as usize].2
    }

    /// Looks up the move an untyped `(axis, sign, direction)` triple names.
    pub fn from_raw(axis: char, sign: i32, direction: i32) -> Result<Self, CommandError> {
        let axis = Axis::from_char(axis).ok_or(CommandError::InvalidAxis(axis))?;
        let sign = LayerSign::from_value(sign).ok_or(CommandError::InvalidSign(sign))?;
        NamedMove::ALL
            .into_iter()
            .find(|named| {
                let command = named.command();
                command.axis == axis && command.sign == sign && named.raw_direction() == direction
            })
            .ok_or(CommandError::InvalidDirection(direction))
    }

    /// The move that undoes this one.
    pub const fn inverse(self) -> Self {
        // clockwise and counter-clockwise variants alternate in the table
        NamedMove::ALL[self as usize ^ 1]
    }
}

impl fmt::Display for NamedMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

impl FromStr for NamedMove {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NamedMove::ALL
            .into_iter()
            .find(|named| named.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseError::UnknownMove(s.to_owned()))
    }
}

/// Outcome of [`RotationController::request_rotation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotationRequest {
    Started,
    /// Dropped because another rotation was still animating.
    Ignored,
}

/// A cubelet together with its current world transform.
#[derive(Debug, Clone, Copy)]
pub struct CubeletView<'a> {
    pub cubelet: &'a Cubelet,
    pub transform: Transform,
}

/// Scene state mutated by tween updates and completions.
#[derive(Debug, Clone, Default)]
struct CubeState {
    store: CubeStore,
    pivot: Option<PivotGroup>,
}

impl AnimationSink<Axis> for CubeState {
    fn update(&mut self, axis: &Axis, angle: f32) {
        if let Some(pivot) = &mut self.pivot {
            debug_assert_eq!(pivot.axis(), *axis, "tween drives a different pivot");
            log::trace!("pivot {axis} at {angle:.4} rad");
            pivot.set_angle(angle);
        }
    }

    fn complete(&mut self, axis: Axis) {
        let Some(pivot) = self.pivot.take() else {
            panic!("rotation about {axis} completed without a pivot group");
        };
        pivot.disband(&mut self.store);
        if cfg!(debug_assertions) {
            self.store.assert_lattice_complete();
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct RotationController {
    engine: AnimationEngine<Axis>,
    cube: CubeState,
}

impl RotationController {
    /// A solved cube with no turn in flight.
    pub fn new(config: AnimationConfig) -> Self {
        Self {
            engine: AnimationEngine::new(config),
            cube: CubeState::default(),
        }
    }

    /// Duration and easing applied to every turn.
    pub fn config(&self) -> AnimationConfig {
        self.engine.config()
    }

    /// Starts a quarter turn unless one is already animating.
    pub fn request_rotation(&mut self, command: RotationCommand) -> RotationRequest {
        if self.engine.is_active() {
            log::debug!("dropping {command}: a rotation is already in flight");
            return RotationRequest::Ignored;
        }
        self.reset_stale_pivot();

        let pivot = PivotGroup::attach(&mut self.cube.store, command.axis, command.sign);
        self.engine.start(command.axis, pivot.angle(), command.signed_delta());
        self.cube.pivot = Some(pivot);

        log::debug!("started {command}");
        RotationRequest::Started
    }

    /// Starts the named turn. See [`Self::request_rotation`].
    pub fn request_move(&mut self, named: NamedMove) -> RotationRequest {
        self.request_rotation(named.command())
    }

    /// Validates an untyped command, then behaves like [`Self::request_rotation`].
    pub fn request_raw(
        &mut self,
        axis: char,
        sign: i32,
        direction: i32,
    ) -> Result<RotationRequest, CommandError> {
        let command = RotationCommand::from_raw(axis, sign, direction)?;
        Ok(self.request_rotation(command))
    }

    /// Returns leftover pivot members to the store before a new turn.
    fn reset_stale_pivot(&mut self) {
        if let Some(pivot) = self.cube.pivot.take() {
            log::warn!("found stale pivot group about {}, disbanding it", pivot.axis());
            pivot.disband(&mut self.cube.store);
        }
    }

    /// Advances the in-flight rotation, if any, by `dt`.
    pub fn tick(&mut self, dt: Duration) {
        self.engine.tick(dt, &mut self.cube);
    }

    /// Ticks in steps of `step` until no rotation is animating.
    ///
    /// # Panics
    ///
    /// Panics if `step` is zero.
    pub fn tick_until_idle(&mut self, step: Duration) {
        assert!(!step.is_zero(), "tick step must be positive");
        while self.engine.is_active() {
            self.tick(step);
        }
    }

    /// True while a quarter turn is animating.
    pub fn is_active(&self) -> bool {
        self.engine.is_active()
    }

    /// Cubelets at rest. Excludes the members of an in-flight turn.
    pub fn store(&self) -> &CubeStore {
        &self.cube.store
    }

    /// The pivot group of the in-flight turn, if any.
    pub fn pivot(&self) -> Option<&PivotGroup> {
        self.cube.pivot.as_ref()
    }

    /// Cubelets in the store plus cubelets held by the pivot.
    pub fn cubelet_count(&self) -> usize {
        self.cube.store.len() + self.cube.pivot.as_ref().map_or(0, PivotGroup::len)
    }

    /// Every cubelet with its live world transform, resting ones first.
    pub fn cubelets(&self) -> impl Iterator<Item = CubeletView<'_>> + '_ {
        let resting = self.cube.store.all().map(|cubelet| CubeletView {
            cubelet,
            transform: *cubelet.transform(),
        });
        let moving = self
            .cube
            .pivot
            .iter()
            .flat_map(|pivot| pivot.members())
            .map(|(cubelet, transform)| CubeletView { cubelet, transform });
        resting.chain(moving)
    }
}
