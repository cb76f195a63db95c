use std::io::{self, Write};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use crossterm::event::{self, DisableMouseCapture, EnableMouseCapture, Event};
use crossterm::execute;
use crossterm::terminal;
use serde_json::json;

use crate::element::{ElementId, ElementTree, EventFlow};
use crate::error::Result;
use crate::graphics::Graphics;
use crate::logging::{LogLevel, Logger, event_with_fields, json_kv};
use crate::metrics::RuntimeMetrics;

mod input;

pub use input::InputEvent;

const LOG_TARGET: &str = "element_tree::runtime";

/// Configuration knobs for the host loop.
#[derive(Clone)]
pub struct RuntimeConfig {
    /// Optional structured logger, shared with the tree.
    pub logger: Option<Logger>,
    /// Metrics accumulator used for periodic snapshots.
    pub metrics: Option<Arc<Mutex<RuntimeMetrics>>>,
    /// Interval between metrics snapshot emissions. Zero disables snapshots.
    pub metrics_interval: Duration,
    /// Target field used when emitting metrics snapshots.
    pub metrics_target: String,
    /// Log every dispatched input event at debug level.
    pub log_input: bool,
    /// How long [`Host::run`] waits for terminal input between frames.
    pub frame_interval: Duration,
    /// Unconsumed key press that stops [`Host::run`] and scripted runs.
    pub exit_key: Option<char>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            logger: None,
            metrics: None,
            metrics_interval: Duration::from_secs(5),
            metrics_target: "element_tree::runtime.metrics".to_string(),
            log_input: false,
            frame_interval: Duration::from_millis(33),
            exit_key: Some('\u{1b}'),
        }
    }
}

impl RuntimeConfig {
    /// Enable metrics collection if it has not already been configured.
    pub fn enable_metrics(&mut self) {
        if self.metrics.is_none() {
            self.metrics = Some(Arc::new(Mutex::new(RuntimeMetrics::new())));
        }
    }

    pub fn disable_metrics(&mut self) {
        self.metrics = None;
    }

    pub fn metrics_handle(&self) -> Option<Arc<Mutex<RuntimeMetrics>>> {
        self.metrics.as_ref().map(Arc::clone)
    }
}

/// Drives one element tree: layout, update and draw per frame, input in
/// between.
pub struct Host {
    tree: ElementTree,
    root: ElementId,
    config: RuntimeConfig,
    exit_requested: bool,
    start_instant: Instant,
    last_metrics_emit: Option<Instant>,
}

impl Host {
    pub fn new(tree: ElementTree, root: ElementId) -> Result<Self> {
        Self::with_config(tree, root, RuntimeConfig::default())
    }

    /// The tree logs through the configured logger from here on.
    pub fn with_config(mut tree: ElementTree, root: ElementId, config: RuntimeConfig) -> Result<Self> {
        tree.get(root)?;
        tree.set_logger(config.logger.clone());
        Ok(Self {
            tree,
            root,
            config,
            exit_requested: false,
            start_instant: Instant::now(),
            last_metrics_emit: None,
        })
    }

    pub fn tree(&self) -> &ElementTree {
        &self.tree
    }

    pub fn tree_mut(&mut self) -> &mut ElementTree {
        &mut self.tree
    }

    pub fn root(&self) -> ElementId {
        self.root
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    pub fn request_exit(&mut self) {
        self.exit_requested = true;
    }

    pub fn exit_requested(&self) -> bool {
        self.exit_requested
    }

    /// Lay out against the display, update, then draw between
    /// `begin_frame` and `end_frame`. A draw error still closes the frame
    /// before it is returned.
    pub fn frame(&mut self, graphics: &mut dyn Graphics) -> Result<()> {
        let display = graphics.display_rect();
        self.tree.layout(self.root, display)?;
        self.tree.update(self.root)?;

        graphics.begin_frame();
        let drawn = self.tree.draw(self.root, graphics);
        graphics.end_frame();
        if let Err(err) = drawn {
            self.log_runtime_event(
                LogLevel::Error,
                "frame_aborted",
                [json_kv("error", json!(err.to_string()))],
            );
            return Err(err);
        }

        if let Some(metrics) = self.config.metrics.as_ref() {
            let nodes = self.tree.subtree(self.root)?.len();
            if let Ok(mut guard) = metrics.lock() {
                guard.record_frame(nodes);
            }
        }
        self.maybe_emit_metrics();
        Ok(())
    }

    /// Route one input event through the tree.
    pub fn dispatch(&mut self, input: InputEvent) -> Result<EventFlow> {
        let flow = match input {
            InputEvent::Cursor {
                x,
                y,
                pressed,
                moving,
            } => self.tree.cursor_event(self.root, x, y, pressed, moving)?,
            InputEvent::Keyboard { ch, pressed } => {
                let flow = self.tree.keyboard_event(self.root, ch, pressed)?;
                if pressed && !flow.is_consumed() && self.config.exit_key == Some(ch) {
                    self.exit_requested = true;
                    self.log_runtime_event(LogLevel::Info, "exit_requested", std::iter::empty());
                }
                flow
            }
        };

        if let Some(metrics) = self.config.metrics.as_ref() {
            if let Ok(mut guard) = metrics.lock() {
                guard.record_input(flow.is_consumed());
            }
        }
        if self.config.log_input {
            self.log_runtime_event(
                LogLevel::Debug,
                "input_dispatched",
                [
                    json_kv("event", json!(input.kind())),
                    json_kv("consumed", json!(flow.is_consumed())),
                ],
            );
        }
        Ok(flow)
    }

    /// Draw a first frame, then a frame after every event, stopping early
    /// when an exit is requested.
    pub fn run_scripted<I>(&mut self, graphics: &mut dyn Graphics, events: I) -> Result<()>
    where
        I: IntoIterator<Item = InputEvent>,
    {
        self.bootstrap();
        self.frame(graphics)?;
        for input in events {
            self.dispatch(input)?;
            if self.exit_requested {
                break;
            }
            self.frame(graphics)?;
        }
        self.finalize();
        Ok(())
    }

    /// Poll the terminal for input between frames until an exit is
    /// requested. Mouse cells are scaled by `cell_size`.
    ///
    /// Raw mode and mouse capture are enabled for the duration of the loop
    /// and restored on the way out, including on error.
    pub fn run(&mut self, graphics: &mut dyn Graphics, cell_size: (f32, f32)) -> Result<()> {
        let mut stdout = io::stdout();
        enter_terminal(&mut stdout)?;
        let result = self.run_loop(graphics, cell_size, |timeout| {
            if event::poll(timeout)? {
                Ok(Some(event::read()?))
            } else {
                Ok(None)
            }
        });
        exit_terminal(&mut stdout);
        result
    }

    /// Frame loop fed by `next_event`, which waits up to the frame interval
    /// for one terminal event.
    pub(crate) fn run_loop<F>(
        &mut self,
        graphics: &mut dyn Graphics,
        cell_size: (f32, f32),
        mut next_event: F,
    ) -> Result<()>
    where
        F: FnMut(Duration) -> Result<Option<Event>>,
    {
        self.bootstrap();
        while !self.exit_requested {
            self.frame(graphics)?;
            if let Some(terminal_event) = next_event(self.config.frame_interval)? {
                if let Some(input) = InputEvent::from_crossterm(&terminal_event, cell_size) {
                    self.dispatch(input)?;
                }
            }
        }
        self.finalize();
        Ok(())
    }

    fn bootstrap(&mut self) {
        self.exit_requested = false;
        let now = Instant::now();
        self.start_instant = now;
        self.last_metrics_emit = Some(now);
        self.log_runtime_event(
            LogLevel::Info,
            "host_started",
            [json_kv("elements", json!(self.tree.len()))],
        );
    }

    fn finalize(&mut self) {
        self.log_runtime_event(
            LogLevel::Info,
            "host_stopped",
            [json_kv(
                "uptime_ms",
                json!(self.start_instant.elapsed().as_millis() as u64),
            )],
        );
    }

    fn maybe_emit_metrics(&mut self) {
        if self.config.metrics.is_none() || self.config.metrics_interval.is_zero() {
            return;
        }

        let now = Instant::now();
        match self.last_metrics_emit {
            Some(last) if now.duration_since(last) < self.config.metrics_interval => return,
            _ => self.last_metrics_emit = Some(now),
        }

        if let (Some(logger), Some(metrics)) =
            (self.config.logger.as_ref(), self.config.metrics.as_ref())
        {
            if let Ok(guard) = metrics.lock() {
                let uptime = now.duration_since(self.start_instant);
                let snapshot = guard.snapshot(uptime).to_log_event(&self.config.metrics_target);
                let _ = logger.log_event(snapshot);
            }
        }
    }

    fn log_runtime_event<I>(&self, level: LogLevel, message: &str, fields: I)
    where
        I: IntoIterator<Item = (String, serde_json::Value)>,
    {
        if let Some(logger) = self.config.logger.as_ref() {
            let event = event_with_fields(level, LOG_TARGET, message, fields);
            let _ = logger.log_event(event);
        }
    }
}

fn enter_terminal(stdout: &mut impl Write) -> Result<()> {
    terminal::enable_raw_mode()?;
    if let Err(err) = execute!(stdout, EnableMouseCapture) {
        terminal::disable_raw_mode().ok();
        return Err(err.into());
    }
    Ok(())
}

fn exit_terminal(stdout: &mut impl Write) {
    execute!(stdout, DisableMouseCapture).ok();
    terminal::disable_raw_mode().ok();
}
