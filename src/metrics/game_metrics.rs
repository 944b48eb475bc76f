use std::time::{Duration, Instant};

/// Per-session statistics shown in the header
pub struct GameMetrics {
    /// When the clock last started running, None while stopped
    running_since: Option<Instant>,
    /// Time banked before the last stop
    banked: Duration,
    pub elapsed_time: Duration,
    pub high_score: u32,
    pub games_played: u32,
}

impl GameMetrics {
    pub fn new() -> Self {
        Self {
            running_since: Some(Instant::now()),
            banked: Duration::ZERO,
            elapsed_time: Duration::ZERO,
            high_score: 0,
            games_played: 0,
        }
    }

    /// Refresh `elapsed_time` from the clock
    pub fn update(&mut self) {
        self.elapsed_time = self.banked + self.running_since.map_or(Duration::ZERO, |t| t.elapsed());
    }

    pub fn on_game_start(&mut self) {
        self.running_since = Some(Instant::now());
        self.banked = Duration::ZERO;
        self.elapsed_time = Duration::ZERO;
    }

    pub fn on_pause(&mut self) {
        self.stop_clock();
    }

    pub fn on_resume(&mut self) {
        if self.running_since.is_none() {
            self.running_since = Some(Instant::now());
        }
    }

    pub fn on_game_over(&mut self, final_score: u32) {
        self.stop_clock();
        self.games_played += 1;
        self.high_score = self.high_score.max(final_score);
    }

    pub fn format_time(&self) -> String {
        let total_secs = self.elapsed_time.as_secs();
        format!("{:02}:{:02}", total_secs / 60, total_secs % 60)
    }

    fn stop_clock(&mut self) {
        if let Some(since) = self.running_since.take() {
            self.banked += since.elapsed();
        }
        self.update();
    }
}

impl Default for GameMetrics {
    fn default() -> Self {
        Self::new()
    }
}
