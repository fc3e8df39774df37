//! Confetti and fireworks particle effect shown when a game ends.

use crate::config::CelebrationConfig;
use rand::Rng;
use ratatui::{buffer::Buffer, layout::Rect, style::Color, widgets::Widget};
use std::f32::consts::TAU;
use tracing::debug;

const PALETTE: [Color; 6] = [
    Color::Red,
    Color::Yellow,
    Color::Green,
    Color::Cyan,
    Color::Magenta,
    Color::LightBlue,
];

const CONFETTI_GLYPHS: [char; 4] = ['*', '•', '▪', '◆'];

/// Confetti flutters rather than free-falls.
const MAX_FALL_SPEED: f32 = 0.8;

/// Scales the configured gravity down to a per-frame value.
const GRAVITY_SCALE: f32 = 0.1;

const SPARKS_PER_FIREWORK: usize = 24;

#[derive(Debug, Clone, PartialEq)]
struct Particle {
    x: f32,
    y: f32,
    vx: f32,
    vy: f32,
    color: Color,
    glyph: char,
    /// Frames left for sparks; confetti lives until it leaves the screen.
    ttl: Option<u16>,
}

/// A running celebration. Particles are never recycled.
#[derive(Debug, Clone)]
pub struct Celebration {
    particles: Vec<Particle>,
    gravity: f32,
    height: f32,
}

impl Celebration {
    /// Spawns confetti across the top of `area` and firework bursts evenly
    /// spaced through its upper third.
    pub fn new<R: Rng>(area: Rect, config: &CelebrationConfig, rng: &mut R) -> Self {
        let width = f32::from(area.width.max(1));
        let height = f32::from(area.height.max(1));
        let sparks = config.fireworks().saturating_mul(SPARKS_PER_FIREWORK);
        let mut particles = Vec::with_capacity(config.confetti_pieces().saturating_add(sparks));

        for _ in 0..*config.confetti_pieces() {
            particles.push(Particle {
                x: rng.random_range(0.0..width),
                // Staggered above the top edge so pieces keep arriving.
                y: -rng.random_range(0.0..height),
                vx: rng.random_range(-0.3..0.3),
                vy: rng.random_range(0.1..0.5),
                color: PALETTE[rng.random_range(0..PALETTE.len())],
                glyph: CONFETTI_GLYPHS[rng.random_range(0..CONFETTI_GLYPHS.len())],
                ttl: None,
            });
        }

        let bursts = *config.fireworks();
        for i in 0..bursts {
            let cx = width * (i + 1) as f32 / (bursts + 1) as f32;
            let cy = height / 3.0;
            let color = PALETTE[rng.random_range(0..PALETTE.len())];
            for k in 0..SPARKS_PER_FIREWORK {
                let angle = TAU * k as f32 / SPARKS_PER_FIREWORK as f32;
                let speed = rng.random_range(0.6..1.2);
                particles.push(Particle {
                    x: cx,
                    y: cy,
                    // Terminal cells are about twice as tall as wide.
                    vx: angle.cos() * speed * 2.0,
                    vy: angle.sin() * speed,
                    color,
                    glyph: if k % 2 == 0 { '✦' } else { '·' },
                    ttl: Some(rng.random_range(8..16)),
                });
            }
        }

        debug!(particles = particles.len(), "Celebration started");
        Self {
            particles,
            gravity: *config.gravity() as f32 * GRAVITY_SCALE,
            height,
        }
    }

    /// Advances one frame and drops particles that burned out or fell off
    /// the bottom.
    pub fn step(&mut self) {
        let gravity = self.gravity;
        let height = self.height;
        self.particles.retain_mut(|p| {
            p.x += p.vx;
            p.y += p.vy;
            match p.ttl.as_mut() {
                Some(ttl) => {
                    p.vy += gravity;
                    p.vx *= 0.9;
                    *ttl = ttl.saturating_sub(1);
                    *ttl > 0
                }
                None => {
                    p.vy = (p.vy + gravity).min(MAX_FALL_SPEED);
                    p.y < height
                }
            }
        });
    }

    /// Number of live particles.
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    /// True once every particle is gone.
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }
}

impl Widget for &Celebration {
    fn render(self, area: Rect, buf: &mut Buffer) {
        for p in &self.particles {
            if p.x < 0.0 || p.y < 0.0 {
                continue;
            }
            let (x, y) = (p.x as u16, p.y as u16);
            if x >= area.width || y >= area.height {
                continue;
            }
            if let Some(cell) = buf.cell_mut((area.x + x, area.y + y)) {
                cell.set_char(p.glyph).set_fg(p.color);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn celebration() -> Celebration {
        let mut rng = StdRng::seed_from_u64(7);
        Celebration::new(Rect::new(0, 0, 60, 20), &CelebrationConfig::default(), &mut rng)
    }

    #[test]
    fn test_spawns_confetti_and_sparks() {
        let celebration = celebration();
        assert_eq!(celebration.len(), 200 + 3 * SPARKS_PER_FIREWORK);
    }

    #[test]
    fn test_largest_accepted_config_spawns() {
        let config = crate::config::GameConfig::from_toml(
            "[celebration]\nconfetti_pieces = 5000\nfireworks = 32",
        )
        .unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        let celebration =
            Celebration::new(Rect::new(0, 0, 80, 24), config.celebration(), &mut rng);
        assert_eq!(celebration.len(), 5_000 + 32 * SPARKS_PER_FIREWORK);
    }

    #[test]
    fn test_sparks_burn_out_first() {
        let mut celebration = celebration();
        for _ in 0..16 {
            celebration.step();
        }
        assert!(celebration.particles.iter().all(|p| p.ttl.is_none()));
    }

    #[test]
    fn test_everything_eventually_falls_off() {
        let mut celebration = celebration();
        for _ in 0..1_000 {
            celebration.step();
        }
        assert!(celebration.is_empty());
    }

    #[test]
    fn test_render_stays_inside_area() {
        let mut celebration = celebration();
        for _ in 0..5 {
            celebration.step();
        }
        let area = Rect::new(0, 0, 60, 20);
        let mut buf = Buffer::empty(area);
        (&celebration).render(area, &mut buf);
        assert_eq!(buf.area, area);
    }
}
