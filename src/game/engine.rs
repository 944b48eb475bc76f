use std::time::Duration;

use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};
use tracing::{debug, info};

use super::{
    action::{Action, Direction},
    config::GameConfig,
    food::{ActiveEffect, Effect, Food, FoodKind},
    state::{CollisionType, GameState, GameStatus, Position, Snake},
};

/// Information about a step
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StepInfo {
    /// What the snake ate this step, if anything
    pub ate: Option<FoodKind>,
    /// Type of collision if one occurred
    pub collision_type: Option<CollisionType>,
    /// Effect that started this step
    pub effect_started: Option<Effect>,
    /// Effect that ran out this step
    pub effect_expired: Option<Effect>,
}

impl StepInfo {
    pub fn ate_food(&self) -> bool {
        self.ate.is_some()
    }
}

/// Result of a game step
#[derive(Debug, Clone, PartialEq)]
pub struct StepResult {
    /// Whether the game has finished, lost or won
    pub terminated: bool,
    /// Additional information about the step
    pub info: StepInfo,
}

/// The game engine that handles all game logic
pub struct GameEngine {
    config: GameConfig,
    rng: StdRng,
}

impl GameEngine {
    /// Create a new game engine with the given configuration
    pub fn new(config: GameConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Self { config, rng }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Reset the game to initial state
    pub fn reset(&mut self) -> GameState {
        let center_x = (self.config.grid_width / 2) as i32;
        let center_y = (self.config.grid_height / 2) as i32;

        let snake = Snake::new(
            Position::new(center_x, center_y),
            Direction::Right,
            self.config.initial_snake_length,
        );

        info!(
            width = self.config.grid_width,
            height = self.config.grid_height,
            "new game"
        );

        match self.spawn_food(&snake) {
            Some(food) => {
                GameState::new(snake, food, self.config.grid_width, self.config.grid_height)
            }
            None => {
                // Only reachable with an unvalidated config: the starting snake
                // already covers the grid. The food is never shown once the
                // game is over.
                let food = Food::berry(snake.head());
                let mut state =
                    GameState::new(snake, food, self.config.grid_width, self.config.grid_height);
                state.status = GameStatus::Won;
                state
            }
        }
    }

    /// Execute one tick of the game
    pub fn step(&mut self, state: &mut GameState, action: Action) -> StepResult {
        if !state.is_running() {
            return StepResult {
                terminated: true,
                info: StepInfo::default(),
            };
        }

        // Update direction based on action (prevent 180° turns)
        if let Action::Move(new_direction) = action {
            if !state.snake.direction.is_opposite(new_direction) {
                state.snake.direction = new_direction;
            }
        }

        let new_head = state.snake.head().moved_in_direction(state.snake.direction);

        if let Some(collision_type) = self.check_collision(state, new_head) {
            state.status = GameStatus::GameOver(collision_type);
            state.steps += 1;

            info!(
                score = state.score,
                length = state.snake.len(),
                steps = state.steps,
                ?collision_type,
                "game over"
            );

            return StepResult {
                terminated: true,
                info: StepInfo {
                    collision_type: Some(collision_type),
                    ..Default::default()
                },
            };
        }

        state.snake.advance();

        let mut info = StepInfo::default();

        // Count down before eating so a fresh effect keeps its full duration
        if let Some(active) = state.effect.as_mut() {
            if active.tick() {
                debug!(effect = active.effect.name(), "effect expired");
                info.effect_expired = Some(active.effect);
                state.effect = None;
            }
        }

        if new_head == state.food.position {
            self.eat(state, &mut info);
        }

        state.steps += 1;

        StepResult {
            terminated: !state.is_running(),
            info,
        }
    }

    /// Time until the next tick, given the score and any active effect
    pub fn tick_interval(&self, state: &GameState) -> Duration {
        let speedups = match self.config.speedup_every {
            0 => 0,
            every => u64::from(state.score / every),
        };

        let base = self
            .config
            .tick_ms
            .saturating_sub(speedups.saturating_mul(self.config.speedup_step_ms))
            .max(self.config.min_tick_ms);

        let ms = match state.effect {
            Some(active) => {
                let (num, den) = active.effect.interval_scale();
                base.saturating_mul(u64::from(num)) / u64::from(den)
            }
            None => base,
        };

        Duration::from_millis(ms.max(1))
    }

    fn eat(&mut self, state: &mut GameState, info: &mut StepInfo) {
        let kind = state.food.kind;

        state.score += kind.score();
        state.food_eaten += 1;
        state.snake.grow(kind.growth());
        info.ate = Some(kind);

        if let Some(effect) = kind.effect() {
            if self.config.effect_ticks > 0 {
                state.effect = Some(ActiveEffect::new(effect, self.config.effect_ticks));
                info.effect_started = Some(effect);
            }
        }

        debug!(food = kind.name(), score = state.score, "food eaten");

        let cells = self.config.grid_width * self.config.grid_height;
        let board_full = state.snake.len() + state.snake.pending_growth >= cells;

        match self.spawn_food(&state.snake) {
            Some(food) if !board_full => state.food = food,
            _ => {
                state.status = GameStatus::Won;
                info!(score = state.score, steps = state.steps, "board filled");
            }
        }
    }

    /// Check if the new head position causes a collision
    fn check_collision(&self, state: &GameState, pos: Position) -> Option<CollisionType> {
        if !state.is_in_bounds(pos) {
            return Some(CollisionType::Wall);
        }

        if state.snake.will_collide(pos) {
            return Some(CollisionType::SelfCollision);
        }

        None
    }

    /// Place food on a random free cell. None when the snake covers the grid.
    fn spawn_food(&mut self, snake: &Snake) -> Option<Food> {
        let free: Vec<Position> = (0..self.config.grid_height as i32)
            .flat_map(|y| (0..self.config.grid_width as i32).map(move |x| Position::new(x, y)))
            .filter(|&pos| !snake.contains(pos))
            .collect();

        let position = *free.choose(&mut self.rng)?;
        let kind = self.roll_food_kind();

        Some(Food::new(position, kind))
    }

    fn roll_food_kind(&mut self) -> FoodKind {
        if self.rng.gen_bool(self.config.special_food_chance) {
            *FoodKind::SPECIALS
                .choose(&mut self.rng)
                .unwrap_or(&FoodKind::Berry)
        } else {
            FoodKind::Berry
        }
    }
}
