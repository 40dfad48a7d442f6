//! The bowed "perfect arrow": one quadratic curve between two points.

use std::f64::consts::{FRAC_PI_2, PI, TAU};

use flowroute_core::Vec2;

use crate::curve;
use crate::error::RouteError;

/// Shape of a direct arrow.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ArrowOptions {
    /// Fixed bend, as a fraction of the chord.
    pub bow: f64,
    /// Extra bend for short arrows, fading out between `stretch_min` and
    /// `stretch_max`.
    pub stretch: f64,
    pub stretch_min: f64,
    pub stretch_max: f64,
    /// Distance to keep clear at the start.
    pub pad_start: f64,
    /// Distance to keep clear at the end.
    pub pad_end: f64,
    /// Bend to the other side.
    pub flip: bool,
    /// Draw horizontal, vertical and 45° arrows straight.
    pub straights: bool,
}

impl Default for ArrowOptions {
    fn default() -> Self {
        Self {
            bow: 0.0,
            stretch: 0.5,
            stretch_min: 0.0,
            stretch_max: 420.0,
            pad_start: 0.0,
            pad_end: 0.0,
            flip: false,
            straights: true,
        }
    }
}

impl ArrowOptions {
    /// Options used for edge fallbacks: a gentle bend, padded 3 units at
    /// each end.
    pub fn edge() -> Self {
        Self {
            stretch: 0.2,
            pad_start: 3.0,
            pad_end: 3.0,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), RouteError> {
        let numbers = [
            self.bow,
            self.stretch,
            self.stretch_min,
            self.stretch_max,
            self.pad_start,
            self.pad_end,
        ];
        if numbers.iter().any(|v| !v.is_finite()) {
            return Err(RouteError::InvalidArrowOptions("values must be finite"));
        }
        if self.pad_start < 0.0 || self.pad_end < 0.0 {
            return Err(RouteError::InvalidArrowOptions("padding must not be negative"));
        }
        if self.stretch_min >= self.stretch_max {
            return Err(RouteError::InvalidArrowOptions(
                "stretch_min must be below stretch_max",
            ));
        }
        Ok(())
    }
}

/// A quadratic arrow with the angles needed to orient its heads.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Arrow {
    pub start: Vec2,
    pub control: Vec2,
    pub end: Vec2,
    /// Direction the curve arrives at `end`.
    pub end_angle: f64,
    /// Direction from the bend back toward `start`.
    pub start_angle: f64,
    /// Direction of the chord from start to end.
    pub angle: f64,
}

impl Arrow {
    pub fn to_path(&self) -> String {
        curve::quadratic(self.start, self.control, self.end)
    }
}

/// Compute the arrow from `a` to `b`.
///
/// The control point is the chord midpoint pushed sideways by `bow` plus a
/// `stretch` share that shrinks as the chord grows toward `stretch_max`.
/// Which side depends on the chord's octant and on `flip`. Short chords
/// (not longer than twice the padding), arrows without any bend, and, with
/// `straights`, axis-aligned or 45° chords are drawn as padded straight
/// segments instead.
///
/// `opts` is expected to have passed [`ArrowOptions::validate`].
pub fn arrow(a: Vec2, b: Vec2, opts: &ArrowOptions) -> Arrow {
    let angle = a.angle_to(b);
    let dist = a.distance(b);
    let straight_line = opts.straights && [0.0, 1.0, f64::INFINITY].contains(&angliness(a, b));

    if dist < (opts.pad_start + opts.pad_end) * 2.0
        || dist == 0.0
        || (opts.bow == 0.0 && opts.stretch == 0.0)
        || straight_line
    {
        let pad_start = opts.pad_start.min(dist - opts.pad_start).max(0.0);
        let pad_end = opts.pad_end.min(dist - pad_start).max(0.0);
        let start = a.project(angle, pad_start);
        let end = b.project(angle + PI, pad_end);
        return Arrow {
            start,
            control: start.midpoint(end),
            end,
            end_angle: angle,
            start_angle: angle,
            angle,
        };
    }

    let side = if sector(angle, 8) % 2 == 0 { 1.0 } else { -1.0 };
    let rot = side * if opts.flip { -1.0 } else { 1.0 };
    let arc = opts.bow
        + modulate(dist, (opts.stretch_min, opts.stretch_max), (1.0, 0.0), true) * opts.stretch;

    let bend = bent_midpoint(a, b, arc, rot);
    let start = a.project(a.angle_to(bend), opts.pad_start);
    let end = b.project(b.angle_to(bend), opts.pad_end);
    let inner = bent_midpoint(start, end, arc, rot);

    Arrow {
        start,
        control: bend.midpoint(inner),
        end,
        end_angle: bend.angle_to(b),
        start_angle: bend.angle_to(a),
        angle,
    }
}

/// The point `arc` short of the middle of `a..b`, turned a quarter turn
/// about the middle in direction `rot`.
fn bent_midpoint(a: Vec2, b: Vec2, arc: f64, rot: f64) -> Vec2 {
    a.lerp(b, 0.5 - arc)
        .rotate_around(a.midpoint(b), FRAC_PI_2 * rot)
}

/// Which of `n` equal slices of the circle `angle` falls in, counted from
/// the negative x axis.
pub fn sector(angle: f64, n: u32) -> i64 {
    let n = f64::from(n);
    (n * (0.5 + (angle / TAU) % n)).floor() as i64
}

/// `|dx / dy|` of the chord: 0 when vertical, 1 at 45°, infinite when
/// horizontal.
pub fn angliness(a: Vec2, b: Vec2) -> f64 {
    ((b.x - a.x) / 2.0 / ((b.y - a.y) / 2.0)).abs()
}

/// Map `value` from range `from` onto range `to`, optionally clamped to `to`.
pub fn modulate(value: f64, from: (f64, f64), to: (f64, f64), clamp: bool) -> f64 {
    let v = to.0 + (value - from.0) / (from.1 - from.0) * (to.1 - to.0);
    if !clamp {
        return v;
    }
    let (lo, hi) = if to.0 < to.1 { (to.0, to.1) } else { (to.1, to.0) };
    v.clamp(lo, hi)
}
