use clap::Parser;
use sweeper_core::{Coord, GameConfig, MineFrequency, Odds};
use wasm_bindgen::prelude::*;

mod canvas;
mod game;
mod utils;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Cells per side of the square board
    #[arg(long, default_value_t = GameConfig::DEFAULT_SIZE)]
    size: Coord,

    /// Average number of cells per mine
    #[arg(short, long, default_value_t = 5.0)]
    frequency: f64,

    /// Use the rounding-based mine odds of the first release
    #[arg(long)]
    legacy_odds: bool,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,

    /// Canvas side length in pixels
    #[arg(short, long, default_value_t = 400)]
    width: u32,
}

impl Args {
    /// Parses `#--size=12&--seed=7` style location hashes.
    fn from_hash(hash: &str) -> Result<Self, clap::Error> {
        let args = hash.split(['#', '&']).filter(|arg| !arg.is_empty());
        Self::try_parse_from(std::iter::once("sweeper").chain(args))
    }

    fn game_config(&self) -> GameConfig {
        let odds = if self.legacy_odds {
            Odds::Legacy
        } else {
            Odds::Exact
        };
        GameConfig::new(self.size, MineFrequency::with_odds(self.frequency, odds))
    }
}

#[wasm_bindgen(start)]
pub fn run_app() {
    use gloo::utils::{document, window};

    #[cfg(feature = "console_error_panic_hook")]
    {
        console_error_panic_hook::set_once();
    }

    let location_hash = window()
        .location()
        .hash()
        .unwrap_or_else(|_| "".to_string());

    let (args, parse_error) = match Args::from_hash(&location_hash) {
        Ok(args) => (args, None),
        Err(err) => (Args::parse_from(["sweeper"]), Some(err)),
    };
    if let Some(log_level) = args.verbose.log_level() {
        console_log::init_with_level(log_level).expect("Error initializing logger");
    }
    if let Some(err) = parse_error {
        log::warn!("ignoring launch arguments: {err}");
    }

    let seed = args.seed.unwrap_or_else(utils::js_random_seed);
    log::debug!("seed: {seed}");

    let root = document()
        .get_element_by_id("game")
        .expect("Could not find id=\"game\" element");

    let props = game::GameProps {
        config: args.game_config(),
        seed,
        width: args.width,
    };

    log::debug!("App started");
    yew::Renderer::<game::GameView>::with_root_and_props(root, props).render();
}
