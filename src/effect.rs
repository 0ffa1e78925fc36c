use crate::bitmap::Color;

pub mod easing {
    #[inline]
    pub fn linear(t: f64) -> f64 {
        t
    }

    #[inline]
    pub fn ease_in(t: f64) -> f64 {
        t * t
    }

    #[inline]
    pub fn ease_out(t: f64) -> f64 {
        1.0 - ease_in(1.0 - t)
    }

    #[inline]
    pub fn ease_in_ease_out(t: f64) -> f64 {
        if t < 0.5 {
            2.0 * ease_in(t)
        } else {
            4.0 * t - 2.0 * ease_in(t) - 1.0
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectKind {
    FadeIn,
    FadeOut,
    FizzleOut,
}

/// Full-screen transition composited after the 3D pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Effect {
    pub kind: EffectKind,
    pub color: Color,
    pub duration: f64,
    pub time: f64,
}

impl Effect {
    pub fn new(kind: EffectKind, color: Color, duration: f64) -> Self {
        Self {
            kind,
            color,
            duration,
            time: 0.0,
        }
    }

    #[inline]
    pub fn is_completed(&self) -> bool {
        self.time >= self.duration
    }

    /// Eased completion in `[0, 1]`.
    pub fn progress(&self) -> f64 {
        let t = if self.duration > 0.0 {
            (self.time / self.duration).min(1.0)
        } else {
            1.0
        };
        match self.kind {
            EffectKind::FadeIn => easing::ease_in(t),
            EffectKind::FadeOut => easing::ease_out(t),
            EffectKind::FizzleOut => easing::ease_in_ease_out(t),
        }
    }
}
