//! Background decorations. Neither effect reads session data: the particle
//! field runs unconditionally and snowfall is gated by one `success` flag.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::runtime::TICK_RATE_MS;

const FIELD_SYMBOLS: [char; 4] = ['·', '∙', '•', '●'];
const SNOW_SYMBOLS: [char; 4] = ['❄', '❅', '❆', '*'];
const MAX_FLAKES: usize = 60;
const FLAKES_PER_UPDATE: usize = 2;

/// One drifting point, ambient or snow
#[derive(Debug, Clone)]
pub struct Particle {
    pub x: f64,
    pub y: f64,
    pub vel_x: f64,
    pub vel_y: f64,
    pub symbol: char,
    /// 0.0..=1.0, used to pick dim/normal/bold
    pub brightness: f64,
    pub age: f64,
    /// Horizontal sway phase, snow only
    pub phase: f64,
}

impl Particle {
    fn ambient(x: f64, y: f64, rng: &mut impl Rng) -> Self {
        Self {
            x,
            y,
            vel_x: rng.gen_range(-0.3..0.3),
            vel_y: rng.gen_range(0.8..2.5),
            symbol: *FIELD_SYMBOLS.choose(rng).unwrap_or(&'·'),
            brightness: rng.gen_range(0.3..1.0),
            age: 0.0,
            phase: 0.0,
        }
    }

    fn flake(x: f64, rng: &mut impl Rng) -> Self {
        Self {
            x,
            y: 0.0,
            vel_x: 0.0,
            vel_y: rng.gen_range(2.0..5.0),
            symbol: *SNOW_SYMBOLS.choose(rng).unwrap_or(&'*'),
            brightness: rng.gen_range(0.6..1.0),
            age: 0.0,
            phase: rng.gen_range(0.0..std::f64::consts::TAU),
        }
    }

    fn update(&mut self, dt: f64) {
        self.x += self.vel_x * dt;
        self.y += self.vel_y * dt;
        self.age += dt;
    }
}

/// Ambient field of white points falling towards the bottom and re-entering
/// at the top.
#[derive(Debug)]
pub struct ParticleField {
    pub particles: Vec<Particle>,
    pub count: usize,
    pub width: f64,
    pub height: f64,
}

impl ParticleField {
    pub fn new(count: usize) -> Self {
        Self {
            particles: Vec::with_capacity(count),
            count,
            width: 0.0,
            height: 0.0,
        }
    }

    /// Reseed across the whole area when the terminal size changes.
    pub fn resize(&mut self, width: u16, height: u16) {
        let (w, h) = (width as f64, height as f64);
        if w == self.width && h == self.height && !self.particles.is_empty() {
            return;
        }
        self.width = w;
        self.height = h;
        self.particles.clear();
        if width == 0 || height == 0 {
            return;
        }

        let mut rng = rand::thread_rng();
        for _ in 0..self.count {
            let x = rng.gen_range(0.0..w);
            let y = rng.gen_range(0.0..h);
            self.particles.push(Particle::ambient(x, y, &mut rng));
        }
    }

    pub fn update(&mut self, dt: f64) {
        if self.width <= 0.0 || self.height <= 0.0 {
            return;
        }
        let mut rng = rand::thread_rng();
        for particle in &mut self.particles {
            particle.update(dt);
            if particle.y >= self.height {
                *particle = Particle::ambient(rng.gen_range(0.0..self.width), 0.0, &mut rng);
            }
            particle.x = particle.x.rem_euclid(self.width);
        }
    }
}

/// Snowflakes that fall and sway while the session is won
#[derive(Debug, Default)]
pub struct Snowfall {
    pub flakes: Vec<Particle>,
    pub is_active: bool,
}

impl Snowfall {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_active(&mut self, active: bool) {
        if self.is_active && !active {
            self.flakes.clear();
        }
        self.is_active = active;
    }

    pub fn update(&mut self, dt: f64, width: u16, height: u16) {
        if !self.is_active || width == 0 || height == 0 {
            return;
        }
        let mut rng = rand::thread_rng();

        for _ in 0..FLAKES_PER_UPDATE {
            if self.flakes.len() >= MAX_FLAKES {
                break;
            }
            let x = rng.gen_range(0.0..width as f64);
            self.flakes.push(Particle::flake(x, &mut rng));
        }

        let bottom = height as f64;
        self.flakes.retain_mut(|flake| {
            flake.vel_x = (flake.age * 2.0 + flake.phase).sin() * 1.5;
            flake.update(dt);
            flake.y < bottom
        });
    }
}

/// Everything drawn behind the content box
#[derive(Debug)]
pub struct Decorations {
    pub field: Option<ParticleField>,
    pub snow: Snowfall,
}

impl Decorations {
    pub fn new(particles: bool, particle_count: usize) -> Self {
        Self {
            field: particles.then(|| ParticleField::new(particle_count)),
            snow: Snowfall::new(),
        }
    }

    /// Advance one UI tick.
    pub fn update(&mut self, success: bool, width: u16, height: u16) {
        let dt = TICK_RATE_MS as f64 / 1000.0;

        if let Some(field) = self.field.as_mut() {
            field.resize(width, height);
            field.update(dt);
        }
        self.snow.set_active(success);
        self.snow.update(dt, width, height);
    }
}
