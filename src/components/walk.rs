//! Walk timeline component.
//!
//! A [`Walk`] is the animation handle attached to a peep while it is in the
//! crowd. It is a small timeline made of [`Track`]s that all start at time 0
//! and each drive one axis of the peep's
//! [`MapPosition`](super::mapposition::MapPosition).
//!
//! Tracks flagged with `gates_completion` decide when the walk finishes. Other
//! tracks (the walking bob) are cosmetic and are simply cut off when the walk
//! ends. See [`crate::systems::walk`] for the update system.

use bevy_ecs::prelude::Component;
use raylib::prelude::Vector2;
use smallvec::SmallVec;

/// Easing functions for smooth interpolation.
///
/// These functions transform a linear `t` value (0.0 to 1.0) to create
/// different acceleration/deceleration curves.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Easing {
    /// Constant speed (no easing).
    Linear,
    /// Starts slow, accelerates (quadratic).
    QuadIn,
    /// Starts fast, decelerates (quadratic).
    QuadOut,
}

impl Easing {
    /// Apply the easing curve. `t` is clamped to [0.0, 1.0].
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::QuadIn => t * t,
            Easing::QuadOut => t * (2.0 - t),
        }
    }
}

/// How a track repeats after its first pass.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Repeat {
    /// Play once and hold the end value.
    Once,
    /// Play forward, then backward, alternating, for `n` extra passes.
    PingPong(u32),
}

/// Which coordinate a track writes.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

/// One animated value inside a [`Walk`].
#[derive(Clone, Debug)]
pub struct Track {
    pub axis: Axis,
    pub from: f32,
    pub to: f32,
    /// Duration of a single pass, in timeline units.
    pub duration: f32,
    pub easing: Easing,
    pub repeat: Repeat,
    /// Whether the walk waits for this track before finishing.
    pub gates_completion: bool,
}

impl Track {
    pub fn new(axis: Axis, from: f32, to: f32, duration: f32) -> Self {
        Track {
            axis,
            from,
            to,
            duration,
            easing: Easing::Linear,
            repeat: Repeat::Once,
            gates_completion: true,
        }
    }
    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }
    pub fn with_repeat(mut self, repeat: Repeat) -> Self {
        self.repeat = repeat;
        self
    }
    pub fn cosmetic(mut self) -> Self {
        self.gates_completion = false;
        self
    }

    /// Length of all passes together.
    pub fn total_duration(&self) -> f32 {
        match self.repeat {
            Repeat::Once => self.duration,
            Repeat::PingPong(n) => self.duration * (n as f32 + 1.0),
        }
    }

    /// Value of the track at timeline time `time`.
    pub fn value_at(&self, time: f32) -> f32 {
        if self.duration <= 0.0 {
            return self.to;
        }
        let t = time.clamp(0.0, self.total_duration());
        let local = match self.repeat {
            Repeat::Once => t / self.duration,
            Repeat::PingPong(n) => {
                let pass = (t / self.duration).floor();
                let (pass, frac) = if pass > n as f32 {
                    (n as f32, 1.0)
                } else {
                    (pass, (t - pass * self.duration) / self.duration)
                };
                if pass as u32 % 2 == 1 { 1.0 - frac } else { frac }
            }
        };
        let e = self.easing.apply(local);
        self.from + (self.to - self.from) * e
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum WalkState {
    Playing,
    Finished,
    Killed,
}

/// Timeline animating a peep across the stage.
///
/// `id` is unique per walk and lets completion handlers discard
/// notifications that belong to a walk that has since been replaced.
#[derive(Component, Clone, Debug)]
pub struct Walk {
    pub id: u64,
    pub tracks: SmallVec<[Track; 2]>,
    /// Playback rate multiplier.
    pub time_scale: f32,
    /// Current time within the timeline.
    pub time: f32,
    state: WalkState,
}

impl Walk {
    pub fn new(id: u64) -> Self {
        Walk {
            id,
            tracks: SmallVec::new(),
            time_scale: 1.0,
            time: 0.0,
            state: WalkState::Playing,
        }
    }

    /// A walk that has already been killed. Used for idle peeps.
    pub fn idle() -> Self {
        let mut walk = Walk::new(0);
        walk.kill();
        walk
    }

    pub fn with_track(mut self, track: Track) -> Self {
        self.tracks.push(track);
        self
    }
    pub fn with_time_scale(mut self, time_scale: f32) -> Self {
        self.time_scale = time_scale;
        self
    }

    /// Time at which the walk finishes: the longest gating track, or the
    /// longest track if none gates.
    pub fn duration(&self) -> f32 {
        let gating = self
            .tracks
            .iter()
            .filter(|t| t.gates_completion)
            .map(Track::total_duration)
            .fold(None, |acc: Option<f32>, d| Some(acc.map_or(d, |a| a.max(d))));
        gating.unwrap_or_else(|| {
            self.tracks
                .iter()
                .map(Track::total_duration)
                .fold(0.0, f32::max)
        })
    }

    /// Normalized position in the timeline.
    pub fn progress(&self) -> f32 {
        let d = self.duration();
        if d <= 0.0 { 1.0 } else { (self.time / d).clamp(0.0, 1.0) }
    }

    /// Jump to a normalized position. Does not fire completion.
    pub fn set_progress(&mut self, progress: f32) {
        if self.state != WalkState::Playing {
            return;
        }
        self.time = progress.clamp(0.0, 1.0) * self.duration();
    }

    /// Advance by `dt` (scaled by `time_scale`).
    ///
    /// Returns `true` only on the call that finishes the walk.
    pub fn advance(&mut self, dt: f32) -> bool {
        if self.state != WalkState::Playing {
            return false;
        }
        let duration = self.duration();
        self.time += dt.max(0.0) * self.time_scale;
        if self.time >= duration {
            self.time = duration;
            self.state = WalkState::Finished;
            return true;
        }
        false
    }

    /// Write the current track values onto `pos`.
    pub fn sample(&self, pos: &mut Vector2) {
        for track in &self.tracks {
            let v = track.value_at(self.time);
            match track.axis {
                Axis::X => pos.x = v,
                Axis::Y => pos.y = v,
            }
        }
    }

    /// Stop the walk for good. A killed walk never reports completion.
    pub fn kill(&mut self) {
        self.state = WalkState::Killed;
    }

    pub fn is_playing(&self) -> bool {
        self.state == WalkState::Playing
    }
    pub fn is_finished(&self) -> bool {
        self.state == WalkState::Finished
    }
    pub fn is_killed(&self) -> bool {
        self.state == WalkState::Killed
    }
}
