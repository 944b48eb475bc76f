use super::state::Position;

/// The kinds of food that can appear on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FoodKind {
    /// Plain food, the common case
    Berry,
    /// Worth more points and grows the snake faster
    Golden,
    /// Speeds the game up for a while
    Pepper,
    /// Slows the game down for a while
    Ice,
}

impl FoodKind {
    /// Kinds that can replace a berry when a special item is rolled
    pub const SPECIALS: [FoodKind; 3] = [FoodKind::Golden, FoodKind::Pepper, FoodKind::Ice];

    /// Points awarded when eaten
    pub fn score(&self) -> u32 {
        match self {
            FoodKind::Golden => 3,
            FoodKind::Berry | FoodKind::Pepper | FoodKind::Ice => 1,
        }
    }

    /// Segments added to the snake when eaten
    pub fn growth(&self) -> usize {
        match self {
            FoodKind::Golden => 2,
            FoodKind::Berry | FoodKind::Pepper | FoodKind::Ice => 1,
        }
    }

    /// Transient effect started when eaten, if any
    pub fn effect(&self) -> Option<Effect> {
        match self {
            FoodKind::Pepper => Some(Effect::Haste),
            FoodKind::Ice => Some(Effect::Slow),
            FoodKind::Berry | FoodKind::Golden => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            FoodKind::Berry => "Berry",
            FoodKind::Golden => "Golden",
            FoodKind::Pepper => "Pepper",
            FoodKind::Ice => "Ice",
        }
    }
}

/// A food item placed on the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Food {
    pub position: Position,
    pub kind: FoodKind,
}

impl Food {
    pub fn new(position: Position, kind: FoodKind) -> Self {
        Self { position, kind }
    }

    pub fn berry(position: Position) -> Self {
        Self::new(position, FoodKind::Berry)
    }
}

/// A temporary change to the game speed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    Haste,
    Slow,
}

impl Effect {
    /// Scale factor applied to the tick interval, as (numerator, denominator)
    pub fn interval_scale(&self) -> (u32, u32) {
        match self {
            Effect::Haste => (1, 2),
            Effect::Slow => (3, 2),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Effect::Haste => "Haste",
            Effect::Slow => "Slow",
        }
    }
}

/// An effect together with how many ticks it has left
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActiveEffect {
    pub effect: Effect,
    pub remaining_ticks: u32,
}

impl ActiveEffect {
    pub fn new(effect: Effect, ticks: u32) -> Self {
        Self {
            effect,
            remaining_ticks: ticks,
        }
    }

    /// Count down one tick. Returns true once the effect has run out.
    pub fn tick(&mut self) -> bool {
        self.remaining_ticks = self.remaining_ticks.saturating_sub(1);
        self.remaining_ticks == 0
    }
}
