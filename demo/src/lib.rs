//! Interactive terminal model for watching a grid search step by step.
//!
//! The maze is drawn two terminal columns per cell, with a side panel
//! showing the algorithm, engine state, statistics, pacing and key help.
//! While a search is running the model asks the app loop for a tick every
//! `delay` and advances the engine by one step per tick.

use std::time::Duration;

use gridsearch_engine::{
    Algorithm, Classification, ConfigError, Engine, EngineConfig, EngineState, Point,
};
use gridsearch_term::{AttrMask, Canvas, Color, Effect, Glyph, Key, Model, MouseAction, Msg, Style};

/// Shortest allowed step delay, in seconds.
pub const MIN_DELAY: f64 = 0.01;
/// Longest allowed step delay, in seconds.
pub const MAX_DELAY: f64 = 0.5;
/// Step delay used when none is given.
pub const DEFAULT_DELAY: f64 = 0.1;
/// Change applied by one `+` or `-` press.
pub const DELAY_STEP: f64 = 0.02;

/// Terminal columns per grid cell.
const CELL_WIDTH: i32 = 2;
const PANEL_WIDTH: i32 = 30;
const PANEL_ROWS: i32 = 24;

const COL_EMPTY: Color = Color::from_rgb(235, 235, 235);
const COL_WALL: Color = Color::from_rgb(20, 20, 20);
const COL_START: Color = Color::from_rgb(0, 200, 0);
const COL_END: Color = Color::from_rgb(220, 0, 0);
const COL_PATH: Color = Color::from_rgb(255, 230, 0);
const COL_VISITED: Color = Color::from_rgb(150, 150, 255);
const COL_FRONTIER: Color = Color::from_rgb(100, 100, 255);
const COL_TEXT: Color = Color::from_rgb(200, 200, 200);
const COL_ACCENT: Color = Color::from_rgb(120, 160, 255);
const COL_DIM: Color = Color::from_rgb(120, 120, 130);

const HELP: &[&str] = &[
    "1-4    BFS/DFS/Dijkstra/A*",
    "enter  start",
    "n      single step",
    "f      finish now",
    "p      pause / resume",
    "+ -    slower / faster",
    "c      clear search",
    "r      new maze",
    "click  toggle wall",
    "q      quit",
];

/// Clamp a delay in seconds to `[MIN_DELAY, MAX_DELAY]`. NaN falls back to
/// the default.
pub fn clamp_delay(secs: f64) -> Duration {
    let secs = if secs.is_nan() {
        DEFAULT_DELAY
    } else {
        secs.clamp(MIN_DELAY, MAX_DELAY)
    };
    Duration::from_secs_f64(secs)
}

fn cell_style(class: Classification) -> Style {
    let bg = match class {
        Classification::Empty => COL_EMPTY,
        Classification::Wall => COL_WALL,
        Classification::Start => COL_START,
        Classification::End => COL_END,
        Classification::Path => COL_PATH,
        Classification::Visited => COL_VISITED,
        Classification::Frontier => COL_FRONTIER,
    };
    Style::fg(COL_WALL).with_bg(bg).with_attrs(AttrMask::BOLD)
}

/// The visualizer state: the engine plus pacing.
#[derive(Debug)]
pub struct Visualizer {
    engine: Engine,
    delay: Duration,
    paused: bool,
    status: String,
}

impl Visualizer {
    /// Build the engine from `config`; `delay` is clamped.
    pub fn new(config: EngineConfig, delay: f64) -> Result<Self, ConfigError> {
        Ok(Self::with_engine(Engine::new(config)?, delay))
    }

    pub fn with_engine(engine: Engine, delay: f64) -> Self {
        Self {
            engine,
            delay: clamp_delay(delay),
            paused: false,
            status: String::from("press enter to start"),
        }
    }

    #[inline]
    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    #[inline]
    pub fn delay(&self) -> Duration {
        self.delay
    }

    #[inline]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    #[inline]
    pub fn status(&self) -> &str {
        &self.status
    }

    /// Canvas size needed for the configured grid: `(rows, cols)`.
    pub fn canvas_size(&self) -> (i32, i32) {
        let grid = self.engine.grid();
        (
            grid.rows().max(PANEL_ROWS),
            grid.cols() * CELL_WIDTH + 1 + PANEL_WIDTH,
        )
    }

    fn set_status(&mut self, s: impl Into<String>) {
        self.status = s.into();
    }

    fn select(&mut self, algorithm: Algorithm) {
        if self.engine.change_algorithm(algorithm) {
            log::debug!("selected {algorithm}");
            self.paused = false;
            self.set_status(format!("{algorithm} selected, new maze"));
        } else {
            log::debug!("cannot select {algorithm} while running");
            self.set_status("cannot switch while running (r resets)");
        }
    }

    fn start(&mut self) {
        if self.engine.is_finished() {
            self.engine.clear_search();
        }
        if self.engine.start() {
            self.paused = false;
            self.set_status(format!("{} running", self.engine.algorithm()));
        } else if self.engine.is_running() && self.paused {
            self.paused = false;
            self.set_status("resumed");
        }
    }

    fn single_step(&mut self) {
        if self.engine.state() == EngineState::Idle {
            self.engine.start();
        }
        self.paused = true;
        self.engine.step();
        self.report();
    }

    fn finish(&mut self) {
        self.engine.run();
        self.report();
    }

    fn adjust_delay(&mut self, by: f64) {
        self.delay = clamp_delay(self.delay.as_secs_f64() + by);
        self.set_status(format!("delay {:.2}s", self.delay.as_secs_f64()));
    }

    fn click(&mut self, pos: Point) {
        let grid = self.engine.grid();
        if pos.col >= grid.cols() * CELL_WIDTH || pos.row >= grid.rows() {
            return;
        }
        let (row, col) = (pos.row, pos.col / CELL_WIDTH);
        if self.engine.is_running() {
            log::debug!("click at ({row}, {col}) ignored while running");
            self.set_status("walls are locked while running");
        } else if self.engine.toggle_wall(row, col) {
            self.set_status(format!("toggled ({row}, {col})"));
        } else {
            log::debug!("click at ({row}, {col}) is not a wall cell");
        }
    }

    fn tick(&mut self) {
        if self.engine.is_running() && !self.paused {
            self.engine.step();
            self.report();
        }
    }

    /// Status text after a step.
    fn report(&mut self) {
        match self.engine.state() {
            EngineState::FinishedFound => {
                let len = self.engine.stats().path_len.unwrap_or_default();
                self.set_status(format!("path found, length {len}"));
            }
            EngineState::FinishedNoPath => self.set_status("no path"),
            EngineState::Running if self.paused => self.set_status("paused, n steps"),
            _ => {}
        }
    }

    fn state_label(&self) -> &'static str {
        if self.engine.is_running() && self.paused {
            "paused"
        } else {
            self.engine.state().label()
        }
    }

    fn draw_grid(&self, canvas: &mut Canvas) {
        let grid = self.engine.grid();
        for cell in grid.iter() {
            let ch = match cell.class {
                Classification::Start => 'S',
                Classification::End => 'E',
                _ => ' ',
            };
            let style = cell_style(cell.class);
            let x = cell.pos.col * CELL_WIDTH;
            canvas.set(Point::new(cell.pos.row, x), Glyph::new(ch, style));
            canvas.set(Point::new(cell.pos.row, x + 1), Glyph::new(' ', style));
        }
    }

    fn draw_panel(&self, canvas: &mut Canvas) {
        let x = self.engine.grid().cols() * CELL_WIDTH + 2;
        let text = Style::fg(COL_TEXT);
        let accent = Style::fg(COL_ACCENT).with_attrs(AttrMask::BOLD);
        let dim = Style::fg(COL_DIM);
        let stats = self.engine.stats();

        let mut row = 0;
        let mut line = |canvas: &mut Canvas, label: &str, value: String| {
            let end = canvas.print(Point::new(row, x), label, text);
            canvas.print(Point::new(row, end), &value, accent);
            row += 1;
        };
        line(canvas, "algorithm ", self.engine.algorithm().to_string());
        line(canvas, "state     ", self.state_label().to_string());
        line(canvas, "steps     ", stats.steps.to_string());
        line(
            canvas,
            "frontier  ",
            format!("{} (peak {})", self.engine.frontier_len(), stats.peak_frontier),
        );
        line(
            canvas,
            "path      ",
            stats.path_len.map_or_else(|| "-".to_string(), |n| n.to_string()),
        );
        line(canvas, "delay     ", format!("{:.2}s", self.delay.as_secs_f64()));
        line(
            canvas,
            "seed      ",
            self.engine
                .wall_seed()
                .map_or_else(|| "fixed".to_string(), |s| s.to_string()),
        );

        let mut y = row + 1;
        for help in HELP {
            canvas.print(Point::new(y, x), help, dim);
            y += 1;
        }
        canvas.print(Point::new(y + 1, x), &self.status, text);
    }
}

impl Model for Visualizer {
    fn update(&mut self, msg: Msg) -> Option<Effect> {
        match msg {
            Msg::Init => None,
            Msg::Quit => Some(Effect::End),
            Msg::Tick => {
                self.tick();
                None
            }
            Msg::KeyDown { key, .. } => {
                match key {
                    Key::Escape | Key::Char('q') => return Some(Effect::End),
                    Key::Char(c @ '1'..='4') => {
                        let i = c as usize - '1' as usize;
                        self.select(Algorithm::ALL[i]);
                    }
                    Key::Enter | Key::Space => self.start(),
                    Key::Char('n') => self.single_step(),
                    Key::Char('f') => self.finish(),
                    Key::Char('p') => {
                        if self.engine.is_running() {
                            self.paused = !self.paused;
                            self.set_status(if self.paused { "paused" } else { "resumed" });
                        }
                    }
                    Key::Char('+') | Key::Char('=') => self.adjust_delay(DELAY_STEP),
                    Key::Char('-') => self.adjust_delay(-DELAY_STEP),
                    Key::Char('c') => {
                        if self.engine.clear_search() {
                            self.paused = false;
                            self.set_status("search cleared");
                        }
                    }
                    Key::Char('r') => {
                        self.engine.reset();
                        self.paused = false;
                        self.set_status("new maze");
                    }
                    _ => {}
                }
                None
            }
            Msg::Mouse {
                action: MouseAction::Main,
                pos,
            } => {
                self.click(pos);
                None
            }
            _ => None,
        }
    }

    fn draw(&self, canvas: &mut Canvas) {
        canvas.fill(Glyph::default());
        self.draw_grid(canvas);
        self.draw_panel(canvas);
    }

    fn tick_interval(&self) -> Option<Duration> {
        (self.engine.is_running() && !self.paused).then_some(self.delay)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viz() -> Visualizer {
        let cfg = EngineConfig::default()
            .with_size(5, 6)
            .with_wall_probability(0.0)
            .with_seed(1);
        Visualizer::new(cfg, DEFAULT_DELAY).unwrap()
    }

    fn key(v: &mut Visualizer, c: char) -> Option<Effect> {
        v.update(Msg::key(Key::Char(c)))
    }

    #[test]
    fn delay_is_clamped() {
        assert_eq!(clamp_delay(0.0), Duration::from_secs_f64(MIN_DELAY));
        assert_eq!(clamp_delay(3.0), Duration::from_secs_f64(MAX_DELAY));
        assert_eq!(clamp_delay(f64::NAN), Duration::from_secs_f64(DEFAULT_DELAY));

        let mut v = viz();
        for _ in 0..50 {
            key(&mut v, '+');
        }
        assert_eq!(v.delay(), Duration::from_secs_f64(MAX_DELAY));
    }

    #[test]
    fn number_keys_select_algorithms() {
        let mut v = viz();
        key(&mut v, '4');
        assert_eq!(v.engine().algorithm(), Algorithm::Astar);
        key(&mut v, '2');
        assert_eq!(v.engine().algorithm(), Algorithm::Dfs);
    }

    #[test]
    fn ticks_drive_the_search() {
        let mut v = viz();
        assert_eq!(v.tick_interval(), None);
        v.update(Msg::key(Key::Enter));
        assert!(v.engine().is_running());
        assert_eq!(v.tick_interval(), Some(v.delay()));

        while v.engine().is_running() {
            v.update(Msg::Tick);
        }
        assert!(v.engine().found_path());
        assert_eq!(v.tick_interval(), None);
        assert_eq!(v.status(), "path found, length 9");
    }

    #[test]
    fn pause_and_single_step() {
        let mut v = viz();
        key(&mut v, 'n');
        assert!(v.engine().is_running());
        assert!(v.is_paused());
        assert_eq!(v.engine().stats().steps, 1);

        // Paused searches ignore ticks.
        v.update(Msg::Tick);
        assert_eq!(v.engine().stats().steps, 1);
        assert_eq!(v.tick_interval(), None);

        key(&mut v, 'p');
        assert!(!v.is_paused());
        v.update(Msg::Tick);
        assert_eq!(v.engine().stats().steps, 2);
    }

    #[test]
    fn walls_are_locked_while_running() {
        let mut v = viz();
        v.update(Msg::click(1, 2));
        assert_eq!(v.engine().classification(1, 1), Some(Classification::Wall));

        v.update(Msg::key(Key::Enter));
        v.update(Msg::click(1, 2));
        assert_eq!(v.engine().classification(1, 1), Some(Classification::Wall));
        assert_eq!(v.status(), "walls are locked while running");

        // Clicks on the panel are ignored.
        key(&mut v, 'f');
        v.update(Msg::click(0, 40));
        assert!(v.engine().is_finished());
    }

    #[test]
    fn clicking_an_endpoint_keeps_the_result() {
        let mut v = viz();
        key(&mut v, 'f');
        assert_eq!(v.engine().state(), EngineState::FinishedFound);
        let before = v.engine().grid().to_ascii();

        v.update(Msg::click(0, 0));
        assert_eq!(v.engine().state(), EngineState::FinishedFound);
        assert_eq!(v.engine().grid().to_ascii(), before);
    }

    #[test]
    fn enter_after_finish_reruns_on_same_maze() {
        let mut v = viz();
        v.update(Msg::click(0, 2));
        key(&mut v, 'f');
        assert!(v.engine().found_path());
        v.update(Msg::key(Key::Enter));
        assert!(v.engine().is_running());
        assert_eq!(v.engine().classification(0, 1), Some(Classification::Wall));
    }

    #[test]
    fn quit_keys_end_the_app() {
        let mut v = viz();
        assert_eq!(key(&mut v, 'q'), Some(Effect::End));
        assert_eq!(v.update(Msg::key(Key::Escape)), Some(Effect::End));
        assert_eq!(v.update(Msg::Quit), Some(Effect::End));
    }

    #[test]
    fn draw_shows_grid_and_panel() {
        let mut v = viz();
        key(&mut v, 'f');
        let (rows, cols) = v.canvas_size();
        assert_eq!((rows, cols), (24, 43));
        let mut canvas = Canvas::new(rows, cols);
        v.draw(&mut canvas);

        assert_eq!(canvas.at(Point::new(0, 0)).ch, 'S');
        assert_eq!(canvas.at(Point::new(4, 10)).ch, 'E');
        assert_eq!(canvas.at(Point::new(0, 0)).style.bg, COL_START);
        assert_eq!(canvas.at(Point::new(4, 10)).style.bg, COL_END);

        let panel: String = (14..cols).map(|c| canvas.at(Point::new(0, c)).ch).collect();
        assert!(panel.starts_with("algorithm BFS"), "{panel:?}");
    }
}
