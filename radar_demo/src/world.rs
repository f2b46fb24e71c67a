//! Toy simulation feeding the radar
//!
//! Ships drift around the player and launch missiles that expire after a
//! few seconds. Entities live in a slot map; each step republishes them as
//! a flat list of radar contacts.

use radar_engine::foundation::math::{Point2, Vec2};
use radar_engine::radar::{Contact, ContactSource, Relationship};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use slotmap::{new_key_type, SlotMap};

new_key_type! {
    /// Handle to a simulated entity
    pub struct EntityKey;
}

/// Entity archetypes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    /// The tracked player ship
    Player,
    /// Hostile or friendly ship
    Ship,
    /// Short-lived projectile
    Missile,
    /// Inert rock
    Asteroid,
}

impl EntityKind {
    fn id(self) -> &'static str {
        match self {
            Self::Player => "player",
            Self::Ship => "ship_frigate",
            Self::Missile => "missile",
            Self::Asteroid => "asteroid",
        }
    }
}

/// A simulated body
#[derive(Debug, Clone)]
struct Entity {
    kind: EntityKind,
    position: Point2,
    velocity: Vec2,
    radius: f32,
    relationship: Relationship,
    /// Remaining seconds for missiles
    ttl: Option<f32>,
}

/// Radar view of an entity
#[derive(Debug, Clone, Copy)]
pub struct RadarContact {
    position: Point2,
    radius: f32,
    relationship: Relationship,
    visible: bool,
    kind: &'static str,
}

impl Contact for RadarContact {
    fn position(&self) -> Point2 {
        self.position
    }

    fn radius(&self) -> f32 {
        self.radius
    }

    fn relationship(&self) -> Relationship {
        self.relationship
    }

    fn is_visible(&self) -> bool {
        self.visible
    }

    fn kind_id(&self) -> &str {
        self.kind
    }
}

/// Demo world
pub struct DemoWorld {
    entities: SlotMap<EntityKey, Entity>,
    player: Option<EntityKey>,
    contacts: Vec<RadarContact>,
    rng: StdRng,
    sensor_range: f32,
    launch_timer: f32,
}

impl DemoWorld {
    /// Populate a world with `ships` ships and `asteroids` asteroids around the origin
    pub fn new(seed: u64, ships: usize, asteroids: usize, sensor_range: f32) -> Self {
        let mut world = Self {
            entities: SlotMap::with_key(),
            player: None,
            contacts: Vec::new(),
            rng: StdRng::seed_from_u64(seed),
            sensor_range,
            launch_timer: 0.0,
        };

        world.spawn_player();
        for i in 0..ships {
            let relationship = match i % 4 {
                0 => Relationship::Friendly,
                1 => Relationship::Allied,
                _ => Relationship::Enemy,
            };
            world.spawn_random(EntityKind::Ship, relationship, 30.0, 80.0);
        }
        for _ in 0..asteroids {
            world.spawn_random(EntityKind::Asteroid, Relationship::Neutral, 60.0, 10.0);
        }
        world.publish();
        world
    }

    fn spawn_player(&mut self) {
        let key = self.entities.insert(Entity {
            kind: EntityKind::Player,
            position: Point2::origin(),
            velocity: Vec2::new(40.0, 15.0),
            radius: 25.0,
            relationship: Relationship::Friendly,
            ttl: None,
        });
        self.player = Some(key);
    }

    fn spawn_random(&mut self, kind: EntityKind, relationship: Relationship, radius: f32, speed: f32) {
        let position = Point2::new(self.rng.gen_range(-6000.0..6000.0), self.rng.gen_range(-6000.0..6000.0));
        let heading: f32 = self.rng.gen_range(0.0..std::f32::consts::TAU);
        self.entities.insert(Entity {
            kind,
            position,
            velocity: Vec2::new(heading.cos(), heading.sin()) * speed,
            radius,
            relationship,
            ttl: None,
        });
    }

    /// Remove the player, leaving the radar without a viewer
    pub fn despawn_player(&mut self) {
        if let Some(key) = self.player.take() {
            self.entities.remove(key);
            log::info!("Player destroyed");
        }
    }

    /// Put a new player ship at the origin
    pub fn respawn_player(&mut self) {
        if self.player.is_none() {
            self.spawn_player();
            log::info!("Player respawned");
        }
    }

    /// Number of live entities
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// Advance the simulation and republish contacts
    pub fn step(&mut self, delta_time: f32) {
        for entity in self.entities.values_mut() {
            entity.position += entity.velocity * delta_time;
            if let Some(ttl) = entity.ttl.as_mut() {
                *ttl -= delta_time;
            }
        }
        self.entities.retain(|_, entity| entity.ttl.map_or(true, |ttl| ttl > 0.0));

        self.launch_timer -= delta_time;
        if self.launch_timer <= 0.0 {
            self.launch_timer = 0.5;
            self.launch_missile();
        }

        self.publish();
    }

    fn launch_missile(&mut self) {
        let pick = self.rng.gen_range(0..8);
        let shooter = self
            .entities
            .values()
            .filter(|e| e.kind == EntityKind::Ship && e.relationship == Relationship::Enemy)
            .nth(pick)
            .map(|e| (e.position, e.relationship));

        if let Some((position, relationship)) = shooter {
            let heading: f32 = self.rng.gen_range(0.0..std::f32::consts::TAU);
            self.entities.insert(Entity {
                kind: EntityKind::Missile,
                position,
                velocity: Vec2::new(heading.cos(), heading.sin()) * 400.0,
                radius: 4.0,
                relationship,
                ttl: Some(4.0),
            });
        }
    }

    fn publish(&mut self) {
        let viewer = self.viewer_position();
        let player = self.player;
        let sensor_range_sq = self.sensor_range * self.sensor_range;

        self.contacts.clear();
        self.contacts.extend(
            self.entities
                .iter()
                .filter(|(key, _)| Some(*key) != player)
                .map(|(_, entity)| RadarContact {
                    position: entity.position,
                    radius: entity.radius,
                    relationship: entity.relationship,
                    // Own forces are always known, others only inside sensor range
                    visible: entity.relationship == Relationship::Friendly
                        || viewer.map_or(false, |v| (entity.position - v).norm_squared() <= sensor_range_sq),
                    kind: entity.kind.id(),
                }),
        );
    }
}

impl ContactSource for DemoWorld {
    type Contact = RadarContact;

    fn viewer_position(&self) -> Option<Point2> {
        self.player.and_then(|key| self.entities.get(key)).map(|player| player.position)
    }

    fn candidates(&self, _center: Point2, _radius: f32) -> &[RadarContact] {
        &self.contacts
    }
}
