use std::collections::VecDeque;

use super::action::Direction;
use super::food::{ActiveEffect, Food};

/// A position on the game grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move position by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Move position in a direction
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx, dy)
    }
}

/// The snake in the game
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Body segments, with head at the front
    pub body: VecDeque<Position>,
    /// Current direction of movement
    pub direction: Direction,
    /// Segments still to be added, one per move
    pub pending_growth: usize,
}

impl Snake {
    /// Create a new snake with given starting position and direction
    pub fn new(head: Position, direction: Direction, length: usize) -> Self {
        let (dx, dy) = direction.delta();
        let body = (0..length.max(1) as i32)
            .map(|i| head.moved_by(-dx * i, -dy * i))
            .collect();

        Self {
            body,
            direction,
            pending_growth: 0,
        }
    }

    /// Get the head position
    pub fn head(&self) -> Position {
        self.body[0]
    }

    /// Get the tail position (last segment)
    pub fn tail(&self) -> Position {
        self.body[self.body.len() - 1]
    }

    /// Body segments, excluding the head
    pub fn body_segments(&self) -> impl Iterator<Item = &Position> {
        self.body.iter().skip(1)
    }

    /// Queue `segments` extra cells of length
    pub fn grow(&mut self, segments: usize) {
        self.pending_growth += segments;
    }

    /// Whether moving the head onto `pos` this tick would hit the body.
    ///
    /// The tail leaves its cell on the same move unless the snake is growing,
    /// so chasing your own tail is allowed.
    pub fn will_collide(&self, pos: Position) -> bool {
        let skip_tail = self.pending_growth == 0;
        let checked = if skip_tail {
            self.body.len() - 1
        } else {
            self.body.len()
        };

        self.body.iter().take(checked).any(|&segment| segment == pos)
    }

    /// Move one cell in the current direction
    pub fn advance(&mut self) {
        let new_head = self.head().moved_in_direction(self.direction);
        self.body.push_front(new_head);

        if self.pending_growth > 0 {
            self.pending_growth -= 1;
        } else {
            self.body.pop_back();
        }
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Check if the snake is empty (should never happen in practice)
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn contains(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }
}

/// Type of collision that occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionType {
    /// Snake hit a wall
    Wall,
    /// Snake hit itself
    SelfCollision,
}

/// Where a game stands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    Running,
    GameOver(CollisionType),
    /// The snake filled every cell
    Won,
}

/// Complete game state
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub snake: Snake,
    pub food: Food,
    pub effect: Option<ActiveEffect>,
    pub grid_width: usize,
    pub grid_height: usize,
    pub score: u32,
    pub steps: u32,
    pub food_eaten: u32,
    pub status: GameStatus,
}

impl GameState {
    /// Create a new game state
    pub fn new(snake: Snake, food: Food, grid_width: usize, grid_height: usize) -> Self {
        Self {
            snake,
            food,
            effect: None,
            grid_width,
            grid_height,
            score: 0,
            steps: 0,
            food_eaten: 0,
            status: GameStatus::Running,
        }
    }

    /// Check if a position is within the grid bounds
    pub fn is_in_bounds(&self, pos: Position) -> bool {
        pos.x >= 0
            && pos.x < self.grid_width as i32
            && pos.y >= 0
            && pos.y < self.grid_height as i32
    }

    /// Check if a position is occupied by the snake
    pub fn is_occupied_by_snake(&self, pos: Position) -> bool {
        self.snake.contains(pos)
    }

    pub fn is_running(&self) -> bool {
        self.status == GameStatus::Running
    }
}
