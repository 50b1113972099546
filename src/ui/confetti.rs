//! Terminal confetti overlay

use rand::Rng;
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    Frame,
};
use std::time::{Duration, Instant};

const GLYPHS: [char; 5] = ['*', '+', '•', '✦', '◆'];
const COLORS: [Color; 6] = [
    Color::Red,
    Color::Yellow,
    Color::Green,
    Color::Cyan,
    Color::Magenta,
    Color::LightBlue,
];

#[derive(Debug, Clone, Copy, PartialEq)]
struct Particle {
    /// Position as a fraction of the area, so resizes keep the spread
    x: f32,
    y: f32,
    glyph: char,
    color: Color,
}

#[derive(Debug, Default)]
pub struct ConfettiOverlay {
    particles: Vec<Particle>,
    until: Option<Instant>,
}

impl ConfettiOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scatter `count` particles, visible for `duration` from `now`
    pub fn launch(&mut self, count: u32, duration: Duration, now: Instant) {
        let mut rng = rand::thread_rng();
        self.particles = (0..count)
            .map(|_| Particle {
                x: rng.gen_range(0.0..1.0),
                y: rng.gen_range(0.0..1.0),
                glyph: GLYPHS[rng.gen_range(0..GLYPHS.len())],
                color: COLORS[rng.gen_range(0..COLORS.len())],
            })
            .collect();
        self.until = Some(now + duration);
    }

    pub fn is_active(&self, now: Instant) -> bool {
        self.until.is_some_and(|until| now < until)
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, now: Instant) {
        if !self.is_active(now) || area.width == 0 || area.height == 0 {
            return;
        }
        let buf = frame.buffer_mut();
        for p in &self.particles {
            let x = area.x + (p.x * f32::from(area.width - 1)) as u16;
            let y = area.y + (p.y * f32::from(area.height - 1)) as u16;
            buf.set_string(x, y, p.glyph.to_string(), Style::default().fg(p.color));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlay_expires() {
        let now = Instant::now();
        let mut overlay = ConfettiOverlay::new();
        assert!(!overlay.is_active(now));

        overlay.launch(50, Duration::from_millis(1500), now);
        assert_eq!(overlay.particles.len(), 50);
        assert!(overlay.is_active(now + Duration::from_millis(1000)));
        assert!(!overlay.is_active(now + Duration::from_millis(1500)));
    }

    #[test]
    fn test_particles_stay_in_unit_square() {
        let mut overlay = ConfettiOverlay::new();
        overlay.launch(200, Duration::from_secs(1), Instant::now());
        assert!(overlay
            .particles
            .iter()
            .all(|p| (0.0..1.0).contains(&p.x) && (0.0..1.0).contains(&p.y)));
    }
}
