//! Presentation-only state: the open tab, the message log, click particles.
//!
//! Nothing here is saved; a reload starts with an empty log.

use super::actions::{TAB_AUTO, TAB_CLICK, TAB_SETTINGS, TAB_STATS};

const MAX_LOG: usize = 50;
const MAX_PARTICLES: usize = 8;

/// How long a "+N" particle floats above the cookie.
pub const PARTICLE_LIFETIME_MS: u64 = 1_000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tab {
    ClickShop,
    AutoShop,
    Stats,
    Settings,
}

impl Tab {
    pub const ALL: [Tab; 4] = [Tab::ClickShop, Tab::AutoShop, Tab::Stats, Tab::Settings];

    pub fn label(&self) -> &'static str {
        match self {
            Tab::ClickShop => "Click",
            Tab::AutoShop => "Auto",
            Tab::Stats => "Stats",
            Tab::Settings => "Settings",
        }
    }

    pub fn action(&self) -> u16 {
        match self {
            Tab::ClickShop => TAB_CLICK,
            Tab::AutoShop => TAB_AUTO,
            Tab::Stats => TAB_STATS,
            Tab::Settings => TAB_SETTINGS,
        }
    }

    pub fn from_action(action_id: u16) -> Option<Tab> {
        Tab::ALL.into_iter().find(|t| t.action() == action_id)
    }

    pub fn next(&self) -> Tab {
        let idx = Tab::ALL.iter().position(|t| t == self).unwrap_or(0);
        Tab::ALL[(idx + 1) % Tab::ALL.len()]
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct LogEntry {
    pub text: String,
    pub is_important: bool,
}

/// Floating "+N" text from a click.
#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    pub text: String,
    /// Column offset from the centre of the cookie.
    pub col_offset: i16,
    pub born_ms: u64,
}

impl Particle {
    /// Fraction of the lifetime elapsed at `now_ms`, in `0.0..=1.0`.
    pub fn age(&self, now_ms: u64) -> f64 {
        let elapsed = now_ms.saturating_sub(self.born_ms).min(PARTICLE_LIFETIME_MS);
        elapsed as f64 / PARTICLE_LIFETIME_MS as f64
    }
}

pub struct UiState {
    pub tab: Tab,
    /// Reset was requested and awaits confirmation.
    pub confirm_reset: bool,
    pub log: Vec<LogEntry>,
    pub particles: Vec<Particle>,
    /// Time of the last click, for the press flash.
    pub last_click_ms: Option<u64>,
    rng_state: u32,
}

impl Default for UiState {
    fn default() -> Self {
        Self::new()
    }
}

impl UiState {
    pub fn new() -> Self {
        Self {
            tab: Tab::ClickShop,
            confirm_reset: false,
            log: vec![LogEntry {
                text: "Welcome! Click the cookie to start baking.".into(),
                is_important: false,
            }],
            particles: Vec::new(),
            last_click_ms: None,
            rng_state: 0x2545_F491,
        }
    }

    pub fn add_log(&mut self, text: impl Into<String>, is_important: bool) {
        self.log.push(LogEntry {
            text: text.into(),
            is_important,
        });
        if self.log.len() > MAX_LOG {
            self.log.remove(0);
        }
    }

    pub fn spawn_particle(&mut self, text: String, now_ms: u64) {
        // xorshift32
        self.rng_state ^= self.rng_state << 13;
        self.rng_state ^= self.rng_state >> 17;
        self.rng_state ^= self.rng_state << 5;
        let col_offset = (self.rng_state % 9) as i16 - 4;

        self.particles.push(Particle {
            text,
            col_offset,
            born_ms: now_ms,
        });
        if self.particles.len() > MAX_PARTICLES {
            self.particles.remove(0);
        }
    }

    pub fn expire_particles(&mut self, now_ms: u64) {
        self.particles
            .retain(|p| now_ms.saturating_sub(p.born_ms) < PARTICLE_LIFETIME_MS);
    }

    pub fn is_click_flashing(&self, now_ms: u64) -> bool {
        self.last_click_ms
            .is_some_and(|at| now_ms.saturating_sub(at) < 150)
    }
}
