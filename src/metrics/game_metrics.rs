use std::time::{Duration, Instant};

/// Statistics for the current session. Nothing is persisted.
pub struct GameMetrics {
    /// Start of the current running stretch, `None` while the clock is stopped
    running_since: Option<Instant>,
    /// Play time banked from earlier stretches of this game
    banked: Duration,
    pub elapsed_time: Duration,
    pub high_score: u32,
    pub games_played: u32,
    /// The last finished game beat the previous best
    pub new_best: bool,
}

impl GameMetrics {
    pub fn new() -> Self {
        Self {
            running_since: None,
            banked: Duration::ZERO,
            elapsed_time: Duration::ZERO,
            high_score: 0,
            games_played: 0,
            new_best: false,
        }
    }

    pub fn update(&mut self) {
        let current = self
            .running_since
            .map(|since| since.elapsed())
            .unwrap_or_default();
        self.elapsed_time = self.banked + current;
    }

    pub fn is_clock_running(&self) -> bool {
        self.running_since.is_some()
    }

    pub fn on_game_start(&mut self) {
        self.new_best = false;
        self.banked = Duration::ZERO;
        self.elapsed_time = Duration::ZERO;
        self.running_since = Some(Instant::now());
    }

    pub fn on_pause(&mut self) {
        self.stop_clock();
    }

    pub fn on_resume(&mut self) {
        if self.running_since.is_none() {
            self.running_since = Some(Instant::now());
        }
    }

    pub fn on_reset(&mut self) {
        self.new_best = false;
        self.running_since = None;
        self.banked = Duration::ZERO;
        self.elapsed_time = Duration::ZERO;
    }

    /// Record a finished game. Returns true when it set a new best;
    /// matching the best is not enough.
    pub fn on_game_over(&mut self, final_score: u32) -> bool {
        self.stop_clock();
        self.games_played += 1;
        self.new_best = final_score > self.high_score;
        if self.new_best {
            self.high_score = final_score;
        }
        self.new_best
    }

    pub fn format_time(&self) -> String {
        let total_secs = self.elapsed_time.as_secs();
        let minutes = total_secs / 60;
        let seconds = total_secs % 60;
        format!("{:02}:{:02}", minutes, seconds)
    }

    fn stop_clock(&mut self) {
        if let Some(since) = self.running_since.take() {
            self.banked += since.elapsed();
        }
        self.elapsed_time = self.banked;
    }
}

impl Default for GameMetrics {
    fn default() -> Self {
        Self::new()
    }
}
