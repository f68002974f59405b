use rand::Rng;

use crate::runtime::TICK_RATE_MS;

const TICK_SECS: f64 = TICK_RATE_MS as f64 / 1000.0;
const BALLOON_COUNT: usize = 18;

/// One balloon floating up the screen
#[derive(Debug, Clone)]
pub struct Balloon {
    pub x: f64,
    pub y: f64,
    pub rise_speed: f64,
    pub sway: f64,
    pub phase: f64,
    pub color_index: usize,
    pub age: f64,
    pub max_age: f64,
}

impl Balloon {
    fn new<R: Rng + ?Sized>(x: f64, y: f64, rng: &mut R) -> Self {
        Self {
            x,
            y,
            rise_speed: rng.gen_range(4.0..9.0),
            sway: rng.gen_range(0.5..1.5),
            phase: rng.gen_range(0.0..std::f64::consts::TAU),
            color_index: rng.gen_range(0..7),
            age: 0.0,
            max_age: rng.gen_range(2.5..4.0),
        }
    }

    /// Returns false once the balloon has expired
    fn update(&mut self, dt: f64) -> bool {
        self.age += dt;
        self.y -= self.rise_speed * dt;
        self.x += (self.age * 3.0 + self.phase).sin() * self.sway * dt * 4.0;
        self.age < self.max_age
    }

    /// 1.0 when fresh, falling to 0.0 at `max_age`
    pub fn freshness(&self) -> f64 {
        (1.0 - self.age / self.max_age).clamp(0.0, 1.0)
    }
}

/// Balloons released over the screen after a correct versus answer
#[derive(Debug)]
pub struct Celebration {
    pub balloons: Vec<Balloon>,
    pub elapsed: f64,
    pub duration: f64,
    pub is_active: bool,
}

impl Celebration {
    pub fn new() -> Self {
        Self {
            balloons: Vec::new(),
            elapsed: 0.0,
            duration: 3.0,
            is_active: false,
        }
    }

    /// Release a fresh batch from just below the bottom edge
    pub fn start<R: Rng + ?Sized>(&mut self, width: u16, height: u16, rng: &mut R) {
        let width = f64::from(width.max(1));
        let bottom = f64::from(height);

        self.balloons = (0..BALLOON_COUNT)
            .map(|_| {
                let x = rng.gen_range(0.0..width);
                let y = bottom + rng.gen_range(0.0..4.0);
                Balloon::new(x, y, rng)
            })
            .collect();
        self.elapsed = 0.0;
        self.is_active = true;
    }

    /// Advance one tick
    pub fn update(&mut self) {
        if !self.is_active {
            return;
        }

        self.elapsed += TICK_SECS;
        if self.elapsed >= self.duration {
            self.stop();
            return;
        }

        // keep a small margin so balloons drift fully out of view
        self.balloons
            .retain_mut(|balloon| balloon.update(TICK_SECS) && balloon.y > -2.0);
        if self.balloons.is_empty() {
            self.stop();
        }
    }

    pub fn stop(&mut self) {
        self.is_active = false;
        self.balloons.clear();
    }
}

impl Default for Celebration {
    fn default() -> Self {
        Self::new()
    }
}
