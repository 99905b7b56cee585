//! Plotting observer for visualizing orbits.
//!
//! See [`OrbitPlot`] for usage.

use eframe::egui;
use egui_plot::{Legend, Line, Plot, PlotPoints, Points};
use nbody_core::{Observer, StateVector};

use crate::traits::HasState;

/// Configuration for rendering an [`OrbitPlot`] result.
///
/// Construct with [`ShowConfig::new`] and chain builder methods as needed.
///
/// # Example
///
/// ```ignore
/// plot.show(ShowConfig::new().title("Binary").legend())?;
/// ```
pub struct ShowConfig {
    title: Option<String>,
    legend: bool,
    equal_aspect: bool,
}

impl ShowConfig {
    /// Creates a new `ShowConfig` with defaults: no title, no legend, equal axes.
    #[must_use]
    pub fn new() -> Self {
        Self {
            title: None,
            legend: false,
            equal_aspect: true,
        }
    }

    /// Sets the window title.
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Enables a legend labeling each body.
    #[must_use]
    pub fn legend(mut self) -> Self {
        self.legend = true;
        self
    }

    /// Lets the axes stretch independently instead of keeping circles round.
    #[must_use]
    pub fn free_aspect(mut self) -> Self {
        self.equal_aspect = false;
        self
    }
}

impl Default for ShowConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// An observer that collects every body's path and displays it via egui.
///
/// Unlike [`Trails`](crate::Trails), the full path is kept. Recording a state
/// with a different body count starts over.
///
/// # Example
///
/// ```ignore
/// let mut plot = OrbitPlot::new();
/// sim.run(500, &mut plot);
/// plot.show(ShowConfig::new().title("Three bodies").legend())?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct OrbitPlot {
    paths: Vec<Vec<[f64; 2]>>,
}

impl OrbitPlot {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends the positions in `state` to each body's path.
    pub fn record(&mut self, state: &StateVector) {
        if self.paths.len() != state.body_count() {
            self.paths = vec![Vec::new(); state.body_count()];
        }
        for (path, position) in self.paths.iter_mut().zip(state.positions()) {
            path.push(position);
        }
    }

    /// Returns the recorded path of body `i`.
    #[must_use]
    pub fn path(&self, i: usize) -> &[[f64; 2]] {
        &self.paths[i]
    }

    /// Opens a blocking egui window displaying all collected paths.
    ///
    /// Blocks until the window is closed by the user.
    ///
    /// # Errors
    ///
    /// Returns an error if the native window cannot be created.
    pub fn show(self, config: ShowConfig) -> Result<(), eframe::Error> {
        let options = eframe::NativeOptions::default();
        let title = config.title.unwrap_or_default();

        eframe::run_native(
            &title,
            options,
            Box::new(move |_cc| {
                Ok(Box::new(OrbitApp {
                    paths: self.paths,
                    legend: config.legend,
                    equal_aspect: config.equal_aspect,
                }))
            }),
        )
    }
}

impl<E: HasState, A> Observer<E, A> for OrbitPlot {
    fn observe(&mut self, event: &E) -> Option<A> {
        self.record(event.state());
        None
    }
}

/// Allows `&mut OrbitPlot` to be passed to loops that take an observer by
/// value, so [`OrbitPlot::show`] can be called after the run completes.
impl<E: HasState, A> Observer<E, A> for &mut OrbitPlot {
    fn observe(&mut self, event: &E) -> Option<A> {
        (**self).observe(event)
    }
}

/// The egui [`eframe::App`] that renders collected paths.
struct OrbitApp {
    paths: Vec<Vec<[f64; 2]>>,
    legend: bool,
    equal_aspect: bool,
}

impl eframe::App for OrbitApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            let mut plot = Plot::new("orbit_plot");
            if self.legend {
                plot = plot.legend(Legend::default());
            }
            if self.equal_aspect {
                plot = plot.data_aspect(1.0);
            }
            plot.show(ui, |plot_ui| {
                for (i, path) in self.paths.iter().enumerate() {
                    let name = format!("Body {i}");
                    let line: PlotPoints = path.iter().copied().collect();
                    plot_ui.line(Line::new(line).name(&name));

                    if let Some(&last) = path.last() {
                        plot_ui.points(Points::new(vec![last]).radius(4.0).name(&name));
                    }
                }
            });
        });
    }
}
