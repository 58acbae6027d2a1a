use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use ratatui::style::Color;

use crate::style;
use crate::types::CelebrationVariant;

const CONFETTI_GLYPHS: &[char] = &['*', '+', '•', '✦', '·'];
const HEART_GLYPHS: &[char] = &['♥', '❤'];

/// Receiver of the "speech finished" effect.
pub trait Celebrate {
    fn fire(&mut self, variant: CelebrationVariant);
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    /// Horizontal position as a fraction of the overlay width.
    pub x: f64,
    /// Fraction of the overlay height travelled per second.
    pub speed: f64,
    pub glyph: char,
    pub color: Color,
}

#[derive(Debug, Clone)]
pub struct Burst {
    pub variant: CelebrationVariant,
    pub started_at: DateTime<Utc>,
    pub particles: Vec<Particle>,
}

impl Burst {
    pub fn duration(&self) -> Duration {
        match self.variant {
            CelebrationVariant::Default => Duration::milliseconds(1500),
            CelebrationVariant::Heart => Duration::seconds(2),
        }
    }

    /// Seconds since the burst started, never negative.
    pub fn age_secs(&self, now: DateTime<Utc>) -> f64 {
        ((now - self.started_at).num_milliseconds().max(0) as f64) / 1000.0
    }
}

/// Confetti overlay drawn on top of the practice view for a short while.
#[derive(Debug, Default)]
pub struct Confetti {
    burst: Option<Burst>,
}

impl Confetti {
    const DEFAULT_PARTICLES: usize = 100;
    const HEART_PARTICLES: usize = 60;

    pub fn active(&self) -> Option<&Burst> {
        self.burst.as_ref()
    }

    /// Drop the burst once its time is up.
    pub fn expire(&mut self, now: DateTime<Utc>) {
        if let Some(burst) = &self.burst {
            if now - burst.started_at >= burst.duration() {
                self.burst = None;
            }
        }
    }

    pub fn clear(&mut self) {
        self.burst = None;
    }

    pub fn launch<R: Rng + ?Sized>(
        &mut self,
        variant: CelebrationVariant,
        now: DateTime<Utc>,
        rng: &mut R,
    ) {
        let (count, glyphs, colors) = match variant {
            CelebrationVariant::Default => (Self::DEFAULT_PARTICLES, CONFETTI_GLYPHS, style::CONFETTI),
            CelebrationVariant::Heart => (Self::HEART_PARTICLES, HEART_GLYPHS, style::HEARTS),
        };
        let particles = (0..count)
            .map(|i| {
                // Hearts stream in from both edges; regular confetti spreads out from the middle.
                let x = match variant {
                    CelebrationVariant::Heart if i % 2 == 0 => rng.gen_range(0.0..0.35),
                    CelebrationVariant::Heart => rng.gen_range(0.65..1.0),
                    CelebrationVariant::Default => rng.gen_range(0.15..0.85),
                };
                Particle {
                    x,
                    speed: rng.gen_range(0.3..1.0),
                    glyph: glyphs[rng.gen_range(0..glyphs.len())],
                    color: colors[rng.gen_range(0..colors.len())],
                }
            })
            .collect();
        tracing::debug!(?variant, count, "celebration launched");
        self.burst = Some(Burst {
            variant,
            started_at: now,
            particles,
        });
    }
}

impl Celebrate for Confetti {
    fn fire(&mut self, variant: CelebrationVariant) {
        self.launch(variant, Utc::now(), &mut rand::thread_rng());
    }
}
