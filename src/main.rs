use miette::Result;
use slot_jam::{assets::Assets, Game, GameConfig};

fn main() -> Result<()> {
    // Enable environment logger, `RUST_LOG=debug` shows the asset and GPU setup
    env_logger::init();

    let assets = Assets::load_embedded()
        .inspect_err(|err| log::error!("Error loading embedded sprite sheets: {err}"))?;

    slot_jam::window::run(Game::new(assets), GameConfig::default())
}
