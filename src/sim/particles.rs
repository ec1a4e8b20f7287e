//! Visual particles (trails and explosions)
//!
//! Particles never affect gameplay. They live in an unordered bag that is
//! swept once per frame after movement and decay, so a particle whose life
//! ran out is gone before the frame is drawn.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Width of the random velocity range of explosion particles, per axis
const EXPLOSION_SPREAD: f32 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParticleKind {
    /// Slow leftward drift behind the bird
    Trail,
    /// Fast isotropic burst on crash
    Explosion,
}

impl ParticleKind {
    /// Life lost per frame
    pub fn decay(self) -> f32 {
        match self {
            ParticleKind::Trail => 0.03,
            ParticleKind::Explosion => 0.05,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub life: f32, // 0-1, decreases over time
    pub decay: f32,
    pub size: f32,
    pub kind: ParticleKind,
}

impl Particle {
    pub fn spawn(pos: Vec2, kind: ParticleKind, rng: &mut impl Rng) -> Self {
        let size = rng.random::<f32>() * 3.0 + 2.0;
        let vel = match kind {
            ParticleKind::Trail => Vec2::new(-2.0, rng.random::<f32>() - 0.5),
            ParticleKind::Explosion => Vec2::new(
                (rng.random::<f32>() - 0.5) * EXPLOSION_SPREAD,
                (rng.random::<f32>() - 0.5) * EXPLOSION_SPREAD,
            ),
        };

        Self {
            pos,
            vel,
            life: 1.0,
            decay: kind.decay(),
            size,
            kind,
        }
    }

    /// Move then decay
    pub fn update(&mut self) {
        self.pos += self.vel;
        self.life -= self.decay;
    }

    pub fn is_alive(&self) -> bool {
        self.life > 0.0
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Particles {
    items: Vec<Particle>,
}

impl Particles {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn burst(&mut self, pos: Vec2, kind: ParticleKind, count: usize, rng: &mut impl Rng) {
        self.items
            .extend((0..count).map(|_| Particle::spawn(pos, kind, &mut *rng)));
    }

    /// Advance every particle one frame and drop the expired ones
    pub fn update(&mut self) {
        for particle in &mut self.items {
            particle.update();
        }
        self.items.retain(Particle::is_alive);
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_trail_drifts_left() {
        let mut rng = Pcg32::seed_from_u64(1);
        for _ in 0..50 {
            let p = Particle::spawn(Vec2::ZERO, ParticleKind::Trail, &mut rng);
            assert_eq!(p.vel.x, -2.0);
            assert!(p.vel.y.abs() <= 0.5);
            assert!((2.0..5.0).contains(&p.size));
        }
    }

    #[test]
    fn test_explosion_scatter_bounds() {
        let mut rng = Pcg32::seed_from_u64(2);
        for _ in 0..50 {
            let p = Particle::spawn(Vec2::ZERO, ParticleKind::Explosion, &mut rng);
            assert!(p.vel.x.abs() <= 2.5 && p.vel.y.abs() <= 2.5);
        }
    }

    #[test]
    fn test_explosion_decays_faster_than_trail() {
        assert!(ParticleKind::Explosion.decay() > ParticleKind::Trail.decay());
    }

    #[test]
    fn test_update_moves_then_decays() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut p = Particle::spawn(Vec2::new(10.0, 10.0), ParticleKind::Trail, &mut rng);
        let vel = p.vel;
        p.update();
        assert_eq!(p.pos, Vec2::new(10.0, 10.0) + vel);
        assert!((p.life - (1.0 - ParticleKind::Trail.decay())).abs() < 1e-6);
    }

    #[test]
    fn test_sweep_removes_expired_same_frame() {
        let mut rng = Pcg32::seed_from_u64(4);
        let mut particles = Particles::new();
        particles.burst(Vec2::ZERO, ParticleKind::Explosion, 20, &mut rng);
        assert_eq!(particles.len(), 20);

        let mut frames = 0;
        while !particles.is_empty() {
            particles.update();
            frames += 1;
            assert!(particles.iter().all(|p| p.life > 0.0));
        }
        // 1.0 / 0.05 with float rounding
        assert!((20..=21).contains(&frames));
    }

    #[test]
    fn test_clear() {
        let mut rng = Pcg32::seed_from_u64(5);
        let mut particles = Particles::new();
        particles.burst(Vec2::ZERO, ParticleKind::Trail, 3, &mut rng);
        particles.clear();
        assert!(particles.is_empty());
    }
}
