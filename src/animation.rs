//! Tick-driven tween engine.
//!
//! The engine owns no scene state. Every tick it reports interpolated values
//! and completions to an [`AnimationSink`], which is where the caller's
//! completion handling lives.

use std::f32::consts::PI;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::error::ParseError;

/// Default duration of one quarter turn.
pub const DEFAULT_DURATION: Duration = Duration::from_millis(250);

/// Interpolation curve mapping linear progress in `[0, 1]` to eased progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    Linear,
    /// Cubic ease-in-ease-out: slow start, fast middle, slow end.
    #[default]
    CubicInOut,
    /// Half-period cosine from 0 to pi.
    Cosine,
}

impl Easing {
    pub const ALL: [Easing; 3] = [Easing::Linear, Easing::CubicInOut, Easing::Cosine];

    /// Eased progress for linear progress `t`, clamped to `[0, 1]`.
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::CubicInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    let u = -2.0 * t + 2.0;
                    1.0 - u * u * u / 2.0
                }
            }
            Easing::Cosine => (1.0 - (t * PI).cos()) / 2.0,
        }
    }

    /// Name accepted by `--easing`.
    pub const fn name(self) -> &'static str {
        match self {
            Easing::Linear => "linear",
            Easing::CubicInOut => "cubic",
            Easing::Cosine => "cosine",
        }
    }
}

impl fmt::Display for Easing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Easing {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Easing::ALL
            .into_iter()
            .find(|easing| easing.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseError::UnknownEasing(s.to_owned()))
    }
}

/// Timing parameters shared by every tween the engine starts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationConfig {
    pub duration: Duration,
    pub easing: Easing,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            duration: DEFAULT_DURATION,
            easing: Easing::default(),
        }
    }
}

/// A single interpolation from `from` to `to`.
#[derive(Debug, Clone)]
pub struct Tween {
    from: f32,
    to: f32,
    elapsed: Duration,
    duration: Duration,
    easing: Easing,
}

impl Tween {
    /// A tween at elapsed time zero.
    pub fn new(from: f32, to: f32, config: AnimationConfig) -> Self {
        Self {
            from,
            to,
            elapsed: Duration::ZERO,
            duration: config.duration,
            easing: config.easing,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }

    /// Current value. Exactly `to` once finished.
    pub fn value(&self) -> f32 {
        if self.is_finished() {
            return self.to;
        }
        let progress = self.elapsed.as_secs_f32() / self.duration.as_secs_f32();
        self.from + (self.to - self.from) * self.easing.apply(progress)
    }

    /// Advances the tween and returns whether it has reached its target.
    fn advance(&mut self, dt: Duration) -> bool {
        self.elapsed = self.elapsed.saturating_add(dt).min(self.duration);
        self.is_finished()
    }
}

/// Receives tween updates from [`AnimationEngine::tick`].
pub trait AnimationSink<K> {
    /// Called every tick for each running tween with its current value.
    fn update(&mut self, key: &K, value: f32);
    /// Called exactly once per tween, right after its final `update`.
    fn complete(&mut self, key: K);
}

/// Runs tweens forward in response to external ticks.
///
/// Several tweens may run at once; callers that need mutual exclusion check
/// [`AnimationEngine::is_active`] before starting one.
#[derive(Debug, Clone)]
pub struct AnimationEngine<K> {
    config: AnimationConfig,
    tweens: Vec<(K, Tween)>,
}

impl<K> Default for AnimationEngine<K> {
    fn default() -> Self {
        Self::new(AnimationConfig::default())
    }
}

impl<K> AnimationEngine<K> {
    /// An idle engine that starts every tween with `config`.
    pub fn new(config: AnimationConfig) -> Self {
        Self {
            config,
            tweens: Vec::new(),
        }
    }

    /// Timing used for newly started tweens.
    pub fn config(&self) -> AnimationConfig {
        self.config
    }

    /// Starts interpolating from `from` to `from + delta`.
    pub fn start(&mut self, key: K, from: f32, delta: f32) {
        self.tweens.push((key, Tween::new(from, from + delta, self.config)));
    }

    /// True while any tween has not yet reached its target.
    pub fn is_active(&self) -> bool {
        !self.tweens.is_empty()
    }

    /// Advances every running tween by `dt`, reporting values and completions
    /// to `sink`. A no-op when nothing is running.
    pub fn tick(&mut self, dt: Duration, sink: &mut impl AnimationSink<K>) {
        let mut index = 0;
        while index < self.tweens.len() {
            let (key, tween) = &mut self.tweens[index];
            let finished = tween.advance(dt);
            sink.update(key, tween.value());
            if finished {
                let (key, _) = self.tweens.remove(index);
                sink.complete(key);
            } else {
                index += 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        values: Vec<(u32, f32)>,
        completed: Vec<u32>,
    }

    impl AnimationSink<u32> for Recorder {
        fn update(&mut self, key: &u32, value: f32) {
            self.values.push((*key, value));
        }

        fn complete(&mut self, key: u32) {
            self.completed.push(key);
        }
    }

    const MS: Duration = Duration::from_millis(1);

    #[test]
    fn test_easing_endpoints() {
        for easing in Easing::ALL {
            assert_eq!(easing.apply(0.0), 0.0, "{easing}");
            assert!((easing.apply(1.0) - 1.0).abs() < 1e-6, "{easing}");
            assert!((easing.apply(0.5) - 0.5).abs() < 1e-6, "{easing}");
        }
    }

    #[test]
    fn test_cubic_is_slow_at_the_ends() {
        let easing = Easing::CubicInOut;
        assert!(easing.apply(0.1) < 0.1);
        assert!(easing.apply(0.9) > 0.9);
        let mut previous = 0.0;
        for step in 1..=100 {
            let value = easing.apply(step as f32 / 100.0);
            assert!(value >= previous, "easing must be monotonic");
            previous = value;
        }
    }

    #[test]
    fn test_easing_parse() {
        assert_eq!("cubic".parse::<Easing>().unwrap(), Easing::CubicInOut);
        assert_eq!("Linear".parse::<Easing>().unwrap(), Easing::Linear);
        assert!("bouncy".parse::<Easing>().is_err());
    }

    #[test]
    fn test_tick_when_idle_is_noop() {
        let mut engine: AnimationEngine<u32> = AnimationEngine::default();
        let mut recorder = Recorder::default();
        engine.tick(100 * MS, &mut recorder);
        assert!(!engine.is_active());
        assert!(recorder.values.is_empty() && recorder.completed.is_empty());
    }

    #[test]
    fn test_tween_reaches_target_and_completes_once() {
        let mut engine = AnimationEngine::new(AnimationConfig {
            duration: 250 * MS,
            easing: Easing::CubicInOut,
        });
        let mut recorder = Recorder::default();
        engine.start(7, 1.0, -2.0);
        assert!(engine.is_active());

        engine.tick(100 * MS, &mut recorder);
        engine.tick(100 * MS, &mut recorder);
        assert!(engine.is_active());
        assert!(recorder.completed.is_empty());

        engine.tick(100 * MS, &mut recorder);
        assert!(!engine.is_active());
        assert_eq!(recorder.completed, vec![7]);
        assert_eq!(recorder.values.last(), Some(&(7, -1.0)));

        engine.tick(100 * MS, &mut recorder);
        assert_eq!(recorder.completed, vec![7]);
        assert_eq!(recorder.values.len(), 3);
    }

    #[test]
    fn test_values_move_monotonically_toward_target() {
        let mut engine = AnimationEngine::default();
        let mut recorder = Recorder::default();
        engine.start(1, 0.0, 10.0);
        while engine.is_active() {
            engine.tick(16 * MS, &mut recorder);
        }
        let values: Vec<f32> = recorder.values.iter().map(|&(_, v)| v).collect();
        assert!(values.windows(2).all(|pair| pair[0] <= pair[1]));
        assert_eq!(values.last(), Some(&10.0));
        assert_eq!(recorder.completed.len(), 1);
    }

    #[test]
    fn test_zero_duration_finishes_on_first_tick() {
        let mut engine = AnimationEngine::new(AnimationConfig {
            duration: Duration::ZERO,
            easing: Easing::Linear,
        });
        let mut recorder = Recorder::default();
        engine.start(3, 0.0, 1.0);
        engine.tick(Duration::ZERO, &mut recorder);
        assert_eq!(recorder.values, vec![(3, 1.0)]);
        assert_eq!(recorder.completed, vec![3]);
    }

    #[test]
    fn test_huge_tick_clamps_to_target() {
        let mut engine = AnimationEngine::default();
        let mut recorder = Recorder::default();
        engine.start(4, 0.0, 2.0);
        engine.tick(10 * MS, &mut recorder);
        engine.tick(Duration::MAX, &mut recorder);
        assert!(!engine.is_active());
        assert_eq!(recorder.values.last(), Some(&(4, 2.0)));
        assert_eq!(recorder.completed, vec![4]);
    }

    #[test]
    fn test_concurrent_tweens_complete_independently() {
        let mut engine = AnimationEngine::new(AnimationConfig {
            duration: 100 * MS,
            easing: Easing::Linear,
        });
        let mut recorder = Recorder::default();
        engine.start(1, 0.0, 1.0);
        engine.tick(50 * MS, &mut recorder);
        engine.start(2, 0.0, 1.0);
        engine.tick(50 * MS, &mut recorder);
        assert_eq!(recorder.completed, vec![1]);
        assert!(engine.is_active());
        engine.tick(50 * MS, &mut recorder);
        assert_eq!(recorder.completed, vec![1, 2]);
    }
}
