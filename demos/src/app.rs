//! The application loop: poll, update, draw, diff, flush.

use std::error::Error;
use std::ops::ControlFlow;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::Duration;

use gridstar_core::{CellId, Grid, Step};
use gridstar_term::{Canvas, Context, Driver, Key, Msg, compute_frame};

use crate::config::Args;
use crate::model::{Effect, Status, Visualizer, canvas_size, render};

const POLL_TIMEOUT: Duration = Duration::from_millis(50);

/// Runs a [`Visualizer`] against a [`Driver`].
pub struct App<D: Driver> {
    model: Visualizer,
    driver: D,
    delay: Duration,
    animate: bool,
    prev: Canvas,
    curr: Canvas,
}

impl<D: Driver> App<D> {
    pub fn new(args: &Args, driver: D) -> Self {
        let (w, h) = canvas_size(args.rows as usize);
        Self {
            model: Visualizer::new(args),
            driver,
            delay: args.delay(),
            animate: !args.no_animate,
            // empty so the first frame writes every glyph
            prev: Canvas::new(0, 0),
            curr: Canvas::new(w, h),
        }
    }

    pub fn model(&self) -> &Visualizer {
        &self.model
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }

    /// Run until the user quits. The driver is closed on every exit path.
    pub fn run(&mut self) -> Result<(), Box<dyn Error>> {
        self.driver.init()?;
        let ctx = Context::new();
        let (tx, rx) = mpsc::channel();

        let res = self.event_loop(&ctx, &tx, &rx);
        ctx.cancel();
        self.driver.close();
        res
    }

    fn event_loop(
        &mut self,
        ctx: &Context,
        tx: &Sender<Msg>,
        rx: &Receiver<Msg>,
    ) -> Result<(), Box<dyn Error>> {
        self.redraw()?;

        while !ctx.is_done() {
            self.driver.poll_msgs(ctx, tx, POLL_TIMEOUT)?;

            let mut dirty = false;
            while let Ok(msg) = rx.try_recv() {
                dirty = true;
                if let Msg::Screen { .. } = msg {
                    self.prev = Canvas::new(0, 0);
                }
                match self.model.update(msg) {
                    Some(Effect::End) => {
                        ctx.cancel();
                        return Ok(());
                    }
                    Some(Effect::Search { start, end }) => {
                        self.search(start, end, ctx, tx, rx)?;
                        if ctx.is_done() {
                            return Ok(());
                        }
                    }
                    None => {}
                }
            }

            if dirty {
                self.redraw()?;
            }
        }
        Ok(())
    }

    fn redraw(&mut self) -> Result<(), Box<dyn Error>> {
        self.model.draw(&mut self.curr);
        present(&mut self.driver, &mut self.prev, &self.curr)
    }

    /// Run one search, redrawing after each step when animating. During the
    /// animation `Esc` cancels the search and a quit request cancels both
    /// the search and the application.
    fn search(
        &mut self,
        start: CellId,
        end: CellId,
        ctx: &Context,
        tx: &Sender<Msg>,
        rx: &Receiver<Msg>,
    ) -> Result<(), Box<dyn Error>> {
        let cancel = Context::new();
        let mut failure: Option<Box<dyn Error>> = None;
        let Self {
            model,
            driver,
            delay,
            animate,
            prev,
            curr,
        } = self;

        let mut observer = |grid: &Grid, _step: Step| -> ControlFlow<()> {
            if !*animate {
                return ControlFlow::Continue(());
            }
            render(curr, grid, Status::Searching);
            let polled = present(driver, prev, curr)
                .and_then(|()| driver.poll_msgs(ctx, tx, Duration::ZERO));
            if let Err(e) = polled {
                failure = Some(e);
                cancel.cancel();
                return ControlFlow::Break(());
            }

            while let Ok(msg) = rx.try_recv() {
                match msg {
                    Msg::KeyDown { key: Key::Escape } => cancel.cancel(),
                    Msg::Screen { .. } => *prev = Canvas::new(0, 0),
                    Msg::KeyDown { key: Key::Char('q') } | Msg::Quit => {
                        cancel.cancel();
                        ctx.cancel();
                    }
                    _ => {}
                }
            }
            if cancel.is_done() {
                return ControlFlow::Break(());
            }
            if !delay.is_zero() {
                thread::sleep(*delay);
            }
            ControlFlow::Continue(())
        };

        model.search(start, end, &mut observer, || cancel.is_done())?;
        match failure {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

/// Diff `curr` against `prev`, flush the changes and remember `curr`.
fn present<D: Driver>(
    driver: &mut D,
    prev: &mut Canvas,
    curr: &Canvas,
) -> Result<(), Box<dyn Error>> {
    let frame = compute_frame(prev, curr);
    if !frame.cells.is_empty() {
        driver.flush(frame)?;
    }
    prev.clone_from(curr);
    Ok(())
}
