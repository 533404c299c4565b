//! Food catalog and falling items

use glam::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Kinds of munchies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FoodKind {
    Pizza,
    Burger,
    Donut,
    Taco,
    Cookie,
    Fries,
    IceCream,
    Brownie,
}

impl FoodKind {
    pub const ALL: [FoodKind; 8] = [
        FoodKind::Pizza,
        FoodKind::Burger,
        FoodKind::Donut,
        FoodKind::Taco,
        FoodKind::Cookie,
        FoodKind::Fries,
        FoodKind::IceCream,
        FoodKind::Brownie,
    ];

    /// Base points before combo
    pub fn points(&self) -> u32 {
        match self {
            FoodKind::Pizza => 10,
            FoodKind::Burger => 15,
            FoodKind::Donut => 20,
            FoodKind::Taco => 12,
            FoodKind::Cookie => 8,
            FoodKind::Fries => 10,
            FoodKind::IceCream => 25,
            FoodKind::Brownie => 30,
        }
    }

    /// Render tint (CSS hex)
    pub fn color(&self) -> &'static str {
        match self {
            FoodKind::Pizza => "#FF6347",
            FoodKind::Burger => "#8B4513",
            FoodKind::Donut => "#FFB6C1",
            FoodKind::Taco => "#DAA520",
            FoodKind::Cookie => "#D2691E",
            FoodKind::Fries => "#FFD700",
            FoodKind::IceCream => "#FFC0CB",
            FoodKind::Brownie => "#4A2C2A",
        }
    }

    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }
}

/// Where and how fast a fresh item starts
#[derive(Debug, Clone, Copy)]
pub struct SpawnBand {
    pub min_y: f32,
    pub max_y: f32,
    pub min_speed: f32,
    pub max_speed: f32,
}

/// Round-start batch: spread over a tall band so items trickle in
pub const INITIAL_BAND: SpawnBand = SpawnBand {
    min_y: 3.0,
    max_y: 8.0,
    min_speed: 1.0,
    max_speed: 3.0,
};

/// Replacements drop in from above the visible area, a bit faster
pub const REPLACEMENT_BAND: SpawnBand = SpawnBand {
    min_y: 5.0,
    max_y: 8.0,
    min_speed: 1.0,
    max_speed: 3.5,
};

/// A falling food item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodItem {
    pub id: u32,
    pub kind: FoodKind,
    pub color: String,
    pub points: u32,
    pub pos: Vec3,
    /// Fall speed (units/s)
    pub speed: f32,
    /// Eaten; inert until swept out
    pub collected: bool,
}

impl FoodItem {
    /// Spawn a random item inside `band`
    pub fn spawn<R: Rng + ?Sized>(id: u32, band: &SpawnBand, rng: &mut R) -> Self {
        let kind = FoodKind::random(rng);
        Self {
            id,
            kind,
            color: kind.color().to_string(),
            points: kind.points(),
            pos: Vec3::new(
                random_x(rng),
                rng.random_range(band.min_y..band.max_y),
                0.0,
            ),
            speed: rng.random_range(band.min_speed..band.max_speed),
            collected: false,
        }
    }

    /// Fall for `dt` seconds, wrapping back to the top past the floor
    pub fn fall<R: Rng + ?Sized>(&mut self, dt: f32, rng: &mut R) {
        if self.collected {
            return;
        }
        self.pos.y -= self.speed * dt;
        if self.pos.y < FOOD_FLOOR_Y {
            self.pos.y = FOOD_WRAP_Y;
            self.pos.x = random_x(rng);
        }
    }
}

fn random_x<R: Rng + ?Sized>(rng: &mut R) -> f32 {
    rng.random_range(-FOOD_SPAWN_HALF_WIDTH..FOOD_SPAWN_HALF_WIDTH)
}
