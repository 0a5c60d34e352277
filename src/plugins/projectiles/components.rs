use bevy::prelude::*;

/// Session-unique bullet id. Monotonic, never reused.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BulletId(pub u64);

/// Id allocator; `spawn_from_requests` is its only caller.
#[derive(Resource, Default, Debug)]
pub struct BulletIds(u64);

impl BulletIds {
    pub fn next(&mut self) -> BulletId {
        let id = BulletId(self.0);
        self.0 += 1;
        id
    }
}

/// A live bullet. Position lives in `Transform`; everything needed to
/// retire it (spawn origin for range, age for lifetime) lives here.
#[derive(Component, Debug, Clone, Copy)]
pub struct Bullet {
    /// Unit direction of travel.
    pub direction: Vec3,
    pub speed: f32,
    /// Where it was fired from, for the max-range check.
    pub origin: Vec3,
    /// Seconds since spawn.
    pub age: f32,
}
