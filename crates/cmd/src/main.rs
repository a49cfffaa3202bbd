// Copyright 2025 Crrow
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//      http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::rc::Rc;

use clap::{Args, Parser, Subcommand};
use omplayer_common_telemetry::{LoggingOptions, init_global_logging, set_panic_hook};
use omplayer_controls::{MediaElement, MediaHandle, MediaKind, VolumeControl, VolumeControlConfig};
use omplayer_dom::Document;
use snafu::{ResultExt, Whatever};
use tracing::info;

mod build_info;
mod script;

use script::Step;

#[derive(Debug, Parser)]
#[clap(
name = "omplayer",
about= "omplayer-cmd",
author = build_info::AUTHOR,
version = build_info::FULL_VERSION)]
struct Cli {
    /// Log filter, e.g. `debug` or `omplayer_controls=trace`
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    commands: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Render(RenderArgs),
    Simulate(SimulateArgs),
}

/// Media and control setup shared by all subcommands.
#[derive(Debug, Clone, Args)]
struct MediaArgs {
    /// Initial media volume in [0, 1]
    #[arg(long, default_value_t = 1.0)]
    volume: f64,

    /// Start muted
    #[arg(long)]
    muted: bool,

    /// Media element kind: audio or video
    #[arg(long, default_value = "audio")]
    kind: MediaKind,

    /// Clear the muted flag when the slider moves
    #[arg(long)]
    unmute_on_input: bool,
}

impl MediaArgs {
    fn open(&self, document: &Document) -> Result<VolumeControl, Whatever> {
        let media = Rc::new(MediaElement::new(document, self.kind));
        media.set_volume(self.volume);
        media.set_muted(self.muted);

        let config = VolumeControlConfig::builder()
            .unmute_on_input(self.unmute_on_input)
            .build();
        let control = VolumeControl::new(document, media, config)
            .whatever_context("Failed to create volume control")?;
        control
            .build(document.body())
            .whatever_context("Failed to mount volume control")?;
        Ok(control)
    }
}

#[derive(Debug, Clone, Args)]
#[command(flatten_help = true)]
#[command(long_about = r"

Print the HTML of a freshly built volume control.
Examples:

omplayer render --volume 0.4

")]
struct RenderArgs {
    #[command(flatten)]
    media: MediaArgs,
}

impl RenderArgs {
    fn run(&self) -> Result<(), Whatever> {
        let document = Document::new();
        let _control = self.media.open(&document)?;
        println!("{}", document.body().outer_html());
        Ok(())
    }
}

#[derive(Debug, Clone, Args)]
#[command(flatten_help = true)]
#[command(long_about = r"

Replay interactions against a registered volume control.
Steps: input=V, change=V (slider), click (mute button),
volume=V (volume changed by the player), sync.
Examples:

omplayer simulate --volume 0.8 input=0.3 click click

")]
struct SimulateArgs {
    #[command(flatten)]
    media: MediaArgs,

    /// Interactions to replay, in order
    #[arg(required = true)]
    steps: Vec<Step>,
}

impl SimulateArgs {
    fn run(&self) -> Result<(), Whatever> {
        let document = Document::new();
        let mut control = self.media.open(&document)?;
        control.register();
        info!(steps = self.steps.len(), "replaying steps");

        for step in &self.steps {
            step.apply(&control);
            println!("{}", script::describe(step, &control));
        }

        control.unregister();
        println!("{}", document.body().outer_html());
        Ok(())
    }
}

fn main() -> Result<(), Whatever> {
    let cli = Cli::parse();

    let opts = LoggingOptions::builder()
        .level(cli.log_level.clone())
        .build();
    let _guards = init_global_logging("omplayer", &opts);
    set_panic_hook();

    match cli.commands {
        Commands::Render(ra) => ra.run(),
        Commands::Simulate(sa) => sa.run(),
    }
}
