//! RONDEL demo - a single screen with a stepping control bound to the
//! circular progress widget, plus buttons that exercise the animated
//! transitions. Glue code only; the widget itself lives in the library.

use clap::Parser;
use eframe::egui;
use log::{debug, info};

use rondel::CircularProgress;

// Build version with target info
const VERSION_INFO: &str = const_format::concatcp!(
    env!("CARGO_PKG_VERSION"),
    "\n",
    "Target: ",
    std::env::consts::ARCH,
    "-",
    std::env::consts::OS
);

/// Circular progress widget demo
#[derive(Parser, Debug)]
#[command(author, version = VERSION_INFO, about, long_about = None)]
struct Args {
    /// Initial progress in percent (0-100)
    #[arg(short = 'p', long = "progress", value_name = "PERCENT", default_value = "0")]
    progress: f32,

    /// Animated transition duration in seconds
    #[arg(short = 'd', long = "duration", value_name = "SECS", default_value = "2.0")]
    duration: f64,

    /// Increase logging verbosity (default: warn, -v: info, -vv: debug, -vvv+: trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    verbosity: u8,
}

struct DemoApp {
    ring: CircularProgress,
    /// Stepping control value in percent, mirroring the widget's progress
    stepper: f32,
    duration: f64,
}

impl DemoApp {
    fn new(args: &Args) -> Self {
        let stepper = args.progress.clamp(0.0, 100.0);
        let mut ring = CircularProgress::new();
        ring.set_progress(stepper / 100.0);
        ring.set_label_text(format!("{stepper:.0}%"));
        Self {
            ring,
            stepper,
            duration: args.duration,
        }
    }

    /// Push the stepper value (percent) into the widget immediately.
    fn apply_step(&mut self) {
        self.ring.set_progress(self.stepper / 100.0);
        self.ring.set_label_text(format!("{:.0}%", self.stepper));
        debug!("stepper -> {:.0}%", self.stepper);
    }
}

impl eframe::App for DemoApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(12.0);
                self.ring.render(ui);
                ui.add_space(12.0);

                // Stepping control bound to the progress value
                ui.horizontal(|ui| {
                    if ui.button("-10").clicked() {
                        self.stepper = (self.stepper - 10.0).max(0.0);
                        self.apply_step();
                    }
                    if ui
                        .add(egui::Slider::new(&mut self.stepper, 0.0..=100.0).suffix("%"))
                        .changed()
                    {
                        self.apply_step();
                    }
                    if ui.button("+10").clicked() {
                        self.stepper = (self.stepper + 10.0).min(100.0);
                        self.apply_step();
                    }
                });

                ui.add_space(8.0);
                ui.horizontal(|ui| {
                    if ui.button("Animate to step").clicked() {
                        let target = self.stepper / 100.0;
                        self.ring.animate_to_then(target, self.duration, move || {
                            info!("animated transition to {:.0}% completed", target * 100.0);
                        });
                    }
                    if ui.button("Run to full").clicked() {
                        self.ring.run_animation_then(self.duration, || {
                            info!("progress completed");
                        });
                    }
                });

                // Keep the stepper and label in sync while animating
                if self.ring.is_animating() {
                    self.stepper = self.ring.progress() * 100.0;
                    self.ring.set_label_text(format!("{:.0}%", self.stepper));
                }
            });
        });
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Determine log level based on verbosity flags
    // 0 (default) = warn, 1 (-v) = info, 2 (-vv) = debug, 3+ (-vvv) = trace
    let default_level = match args.verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .filter_module("egui", log::LevelFilter::Info) // Suppress egui DEBUG spam
        .format_timestamp_millis()
        .init();

    info!("Rondel demo starting...");
    debug!("Command-line args: {:?}", args);

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(format!("Rondel v{}", env!("CARGO_PKG_VERSION")))
            .with_inner_size(egui::vec2(320.0, 380.0))
            .with_resizable(true),
        ..Default::default()
    };

    eframe::run_native(
        "rondel-demo",
        native_options,
        Box::new(move |_cc| Ok(Box::new(DemoApp::new(&args)))),
    )?;

    info!("Application exiting");
    Ok(())
}
