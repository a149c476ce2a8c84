use serde::{Deserialize, Serialize};

/// Channel differences at or below this are considered settled.
pub const SETTLE_EPSILON: f32 = 1e-4;

/// Linear RGBA, each channel nominally in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
    pub const RED: Color = Color::rgb(1.0, 0.0, 0.0);
    pub const GREEN: Color = Color::rgb(0.0, 1.0, 0.0);
    pub const MAGENTA: Color = Color::rgb(1.0, 0.0, 1.0);
    pub const GREY: Color = Color::rgb(0.5, 0.5, 0.5);

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    fn channels_mut(&mut self) -> [&mut f32; 4] {
        [&mut self.r, &mut self.g, &mut self.b, &mut self.a]
    }

    fn channels(&self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

/// The five colors a map paints tiles with.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorPalette {
    pub select: Color,
    pub path: Color,
    pub hover: Color,
    pub invalid: Color,
    pub default: Color,
}

impl Default for ColorPalette {
    fn default() -> Self {
        Self {
            select: Color::RED,
            path: Color::GREEN,
            hover: Color::MAGENTA,
            invalid: Color::GREY,
            default: Color::WHITE,
        }
    }
}

fn move_towards(current: f32, target: f32, max_delta: f32) -> f32 {
    if (target - current).abs() <= max_delta {
        target
    } else {
        current + (target - current).signum() * max_delta
    }
}

/// Displayed color of one tile and the color it is heading for.
///
/// Every channel closes a fraction `dt * rate` of its remaining gap per
/// update, so the approach slows down as it nears the target and can never
/// pass it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorFade {
    current: Color,
    target: Color,
}

impl ColorFade {
    pub fn new(color: Color) -> Self {
        Self {
            current: color,
            target: color,
        }
    }

    pub fn current(&self) -> Color {
        self.current
    }

    pub fn target(&self) -> Color {
        self.target
    }

    pub fn is_settled(&self) -> bool {
        self.current == self.target
    }

    pub fn set(&mut self, color: Color, animation_rate: f32) {
        self.target = color;
        if animation_rate <= 0.0 {
            self.current = color;
        }
    }

    pub fn reset_to(&mut self, color: Color) {
        self.current = color;
        self.target = color;
    }

    /// Moves `current` toward `target`. Returns `true` when any channel
    /// actually moved.
    pub fn advance(&mut self, delta_time: f32, animation_rate: f32) -> bool {
        if self.is_settled() {
            return false;
        }
        if animation_rate <= 0.0 {
            self.current = self.target;
            return true;
        }
        let target = self.target.channels();
        let mut updated = false;
        for (cur, tgt) in self.current.channels_mut().into_iter().zip(target) {
            let remaining = (*cur - tgt).abs();
            if remaining <= SETTLE_EPSILON {
                *cur = tgt;
                continue;
            }
            let before = *cur;
            *cur = move_towards(before, tgt, delta_time * animation_rate * remaining);
            if (*cur - tgt).abs() <= SETTLE_EPSILON {
                *cur = tgt;
            }
            updated |= *cur != before;
        }
        updated
    }
}
