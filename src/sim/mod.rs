// sim/ - Wave and bubble simulation
//
// Entity management using Structure-of-Arrays. Each entity type in its own
// module. WaveWorld owns all of them and is only touched by the frame loop.

mod bubble;
mod intent;
mod particle;
mod pointer;
mod timer;

pub use bubble::BubblePool;
pub use intent::{Intent, IntentQueue};
pub use particle::{ParticleField, detail};
pub use pointer::{MAX_SPEED, Pointer};
pub use timer::Interval;

use fastrand::Rng;

use crate::config::WaveConfig;

/// Wave and bubble simulation world
pub struct WaveWorld {
    // Surface dimensions
    w: u32,
    h: u32,

    config: WaveConfig,

    // Entities
    field: ParticleField,
    bubbles: BubblePool,
    pointer: Pointer,

    // Periodic events
    twitch: Interval,
    spawner: Interval,

    rng: Rng,
}

impl WaveWorld {
    pub fn new(w: u32, h: u32, config: WaveConfig, seed: u64) -> Self {
        let mut rng = Rng::with_seed(seed);
        Self {
            w,
            h,
            field: ParticleField::new(w as f32, h as f32, &mut rng),
            bubbles: BubblePool::new(),
            pointer: Pointer::default(),
            twitch: Interval::new(config.twitch_interval_ms),
            spawner: Interval::new(config.bubble_interval_ms),
            config,
            rng,
        }
    }

    /// Rebuild the surface for new dimensions. Particle state is not
    /// carried over; bubbles are.
    pub fn resize(&mut self, w: u32, h: u32) {
        log::debug!("resize {}x{} -> {}x{}", self.w, self.h, w, h);
        self.w = w;
        self.h = h;
        self.field = ParticleField::new(w as f32, h as f32, &mut self.rng);
    }

    pub fn apply(&mut self, intent: Intent) {
        match intent {
            Intent::PointerMove { x, y } => self.pointer.move_to(x, y),
            Intent::Resize { width, height } => self.resize(width, height),
            Intent::Impulse { x, force } => { self.impulse(x, force); }
            Intent::SpawnBubble => self.spawn_bubble(),
        }
    }

    /// Advance one display frame: fire any due timers, then step physics.
    pub fn tick(&mut self, now_ms: f64) {
        if self.twitch.poll(now_ms) {
            self.twitch();
        }
        if self.spawner.poll(now_ms) {
            self.spawn_bubble();
        }
        self.step();
    }

    /// Particles first, so bubbles see this frame's surface.
    pub fn step(&mut self) {
        self.field.update(&mut self.pointer, &self.config);
        self.bubbles.update(&self.field, self.w as f32, &self.config);
    }

    /// Random ambient disturbance somewhere along the surface.
    pub fn twitch(&mut self) {
        let (x, force) = self.draw_twitch();
        self.impulse(x, force);
    }

    /// x in [0, W), force in [-twitch_force, twitch_force)
    fn draw_twitch(&mut self) -> (f32, f32) {
        let range = self.config.twitch_force;
        let x = self.rng.f32() * self.w as f32;
        let force = self.rng.f32() * range * 2.0 - range;
        (x, force)
    }

    pub fn impulse(&mut self, x: f32, force: f32) -> bool {
        let hit = self.field.impulse(x, force);
        if !hit {
            log::trace!("impulse at x={x} is off the surface, ignored");
        }
        hit
    }

    pub fn spawn_bubble(&mut self) {
        self.bubbles.spawn(self.w as f32, self.h as f32, self.config.max_bubbles, &mut self.rng);
    }

    // Accessors
    pub fn field(&self) -> &ParticleField { &self.field }
    pub fn bubbles(&self) -> &BubblePool { &self.bubbles }
    pub fn pointer(&self) -> &Pointer { &self.pointer }
    pub fn config(&self) -> &WaveConfig { &self.config }
    pub fn width(&self) -> u32 { self.w }
    pub fn height(&self) -> u32 { self.h }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn world(w: u32, h: u32) -> WaveWorld {
        WaveWorld::new(w, h, WaveConfig::default(), 42)
    }

    #[test]
    fn new_world_has_field_and_no_bubbles() {
        let world = world(600, 400);
        assert_eq!(world.field().len(), 11);
        assert_eq!(world.field().x[0], -200.0);
        assert_eq!(world.field().x[10], 800.0);
        assert!(world.bubbles().is_empty());
    }

    #[test]
    fn resize_twice_with_same_size_matches_rest_layout() {
        let mut world = world(600, 400);
        world.apply(Intent::Resize { width: 1000, height: 500 });
        let first_x = world.field().rest_x.clone();
        let first_y = world.field().rest_y.clone();
        let first_vy = world.field().vy.clone();

        world.apply(Intent::Resize { width: 1000, height: 500 });

        assert_eq!(world.field().len(), detail(1000.0) + 1);
        assert_eq!(world.field().rest_x, first_x);
        assert_eq!(world.field().rest_y, first_y);
        assert_ne!(world.field().vy, first_vy);
        assert_eq!((world.width(), world.height()), (1000, 500));
    }

    #[test]
    fn bubbles_survive_resize() {
        let mut world = world(600, 400);
        world.spawn_bubble();
        world.spawn_bubble();
        world.resize(800, 300);
        assert_eq!(world.bubbles().len(), 2);
    }

    #[test]
    fn pointer_intent_updates_clamped_speed() {
        let mut world = world(600, 400);
        world.apply(Intent::PointerMove { x: 10.0, y: 10.0 });
        world.apply(Intent::PointerMove { x: 500.0, y: 0.0 });

        let p = world.pointer();
        assert_eq!((p.x, p.y), (500.0, 0.0));
        assert_eq!((p.speed_x, p.speed_y), (MAX_SPEED, -10.0));
    }

    #[test]
    fn spawn_timer_adds_bubbles_on_schedule() {
        let mut world = world(600, 400);
        world.tick(0.0);
        assert_eq!(world.bubbles().len(), 0);
        world.tick(399.0);
        assert_eq!(world.bubbles().len(), 0);
        world.tick(400.0);
        assert_eq!(world.bubbles().len(), 1);
        world.tick(800.0);
        assert_eq!(world.bubbles().len(), 2);
    }

    #[test]
    fn population_is_bounded() {
        let mut world = world(600, 400);
        let max = world.config().max_bubbles;
        for _ in 0..max + 5 {
            world.spawn_bubble();
        }
        assert_eq!(world.bubbles().len(), max + 1);
    }

    #[test]
    fn twitch_draws_stay_in_range() {
        let mut world = world(600, 400);
        let range = world.config().twitch_force;
        for _ in 0..500 {
            let (x, force) = world.draw_twitch();
            assert!((0.0..600.0).contains(&x));
            assert!((-range..range).contains(&force));
        }
    }

    #[test]
    fn each_twitch_pushes_one_particle_within_range() {
        let mut world = world(600, 400);
        let range = world.config().twitch_force;
        for _ in 0..200 {
            world.field.fy.fill(0.0);
            world.twitch();

            let pushed: Vec<f32> = world.field().fy.iter().copied().filter(|&f| f != 0.0).collect();
            assert!(pushed.len() <= 1);
            assert!(pushed.iter().all(|f| (-range..range).contains(f)));
        }
    }

    // Spawning is pushed past the test window so only the twitch uses the rng
    fn quiet_world(seed: u64) -> WaveWorld {
        let config = WaveConfig { bubble_interval_ms: 60_000.0, ..WaveConfig::default() };
        WaveWorld::new(600, 400, config, seed)
    }

    #[test]
    fn twitch_timer_fires_after_one_second() {
        let lands = |seed: u64| {
            let mut world = quiet_world(seed);
            let (x, force) = world.draw_twitch();
            force != 0.0 && world.field.impulse(x, force)
        };
        let seed = (0..100).find(|&s| lands(s)).unwrap();

        let mut world = quiet_world(seed);
        world.tick(0.0);
        world.tick(500.0);
        world.tick(999.0);
        assert!(world.field().fy.iter().all(|&f| f == 0.0));

        world.tick(1000.0);
        let pushed = world.field().fy.iter().filter(|&&f| f != 0.0).count();
        assert_eq!(pushed, 1);
    }

    #[test]
    fn off_surface_impulse_is_ignored() {
        let mut world = world(600, 400);
        world.apply(Intent::Impulse { x: 10_000.0, force: 3.0 });
        assert!(world.field().fy.iter().all(|&f| f == 0.0));
    }

    #[test]
    fn long_run_stays_bounded() {
        let mut world = world(800, 600);
        let mut now = 0.0;
        for frame in 0..2000 {
            if frame % 7 == 0 {
                let x = (frame % 800) as f32;
                world.apply(Intent::PointerMove { x, y: 300.0 });
            }
            world.tick(now);
            now += 16.7;
        }

        assert_eq!(world.field().len(), detail(800.0) + 1);
        assert!(world.field().y.iter().all(|y| y.is_finite()));
        assert!(world.bubbles().len() <= world.config().max_bubbles + 1);
        assert!(world.bubbles().size.iter().all(|&s| (0.0..=30.0).contains(&s)));
    }
}
