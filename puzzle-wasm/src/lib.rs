use std::rc::Rc;

use log::{LevelFilter, debug, error, info, warn};
use puzzle_core::{PuzzleConfig, PuzzleController};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, HtmlElement, Window};

mod constants;
mod input;
mod models;
mod render;
mod state;
mod utils;

use crate::models::{Reply, to_js};
use crate::state::{Game, STATE, State};
use crate::utils::{StartParams, asset_url, fetch_text_with_fallbacks, init_logging, shuffle_rng};

/// The puzzle as seen from JS. Pages that draw their own UI drive it
/// through this class; every method mirrors a controller operation.
#[wasm_bindgen]
pub struct JigsawPuzzle {
    game: Game,
}

#[wasm_bindgen]
impl JigsawPuzzle {
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: Option<String>) -> Result<JigsawPuzzle, JsValue> {
        let config = match config_json {
            Some(text) => {
                PuzzleConfig::from_json(&text).map_err(|e| JsValue::from_str(&e.to_string()))?
            }
            None => PuzzleConfig::default(),
        };
        init_logging(config.log_filter());
        Ok(JigsawPuzzle {
            game: Game::new(config),
        })
    }

    /// Rebuilds the puzzle with `tile_count` shuffled tiles, or the
    /// configured count (16 by default) when it is omitted. A seed makes the
    /// shuffle repeatable.
    pub fn initialize(&self, tile_count: Option<usize>, seed: Option<u32>) -> Result<(), JsValue> {
        let mut rng = shuffle_rng(seed.map(u64::from));
        self.game
            .run(|c| {
                let count = tile_count.unwrap_or(c.config().tile_count);
                c.initialize(count, &mut rng)
            })
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    #[wasm_bindgen(js_name = attemptTransfer)]
    pub fn attempt_transfer(&self, source: &str, dest: &str) -> Result<JsValue, JsValue> {
        let result = self.game.run(|c| c.attempt_transfer(source, dest));
        to_js(&Reply::from(&result))
    }

    pub fn rotate(&self, tile: &str) -> Result<JsValue, JsValue> {
        let result = self.game.run(|c| c.rotate(tile));
        to_js(&Reply::from(&result))
    }

    #[wasm_bindgen(js_name = isSolved)]
    pub fn is_solved(&self) -> bool {
        self.game.read(PuzzleController::is_solved)
    }

    #[wasm_bindgen(js_name = getState)]
    pub fn get_state(&self) -> Result<JsValue, JsValue> {
        to_js(&self.game.read(PuzzleController::snapshot))
    }

    /// `callback` runs once, when the last tile locks.
    #[wasm_bindgen(js_name = onSolved)]
    pub fn on_solved(&self, callback: js_sys::Function) {
        self.game.on_solved(move || {
            if let Err(err) = callback.call0(&JsValue::NULL) {
                warn!("onSolved callback threw: {err:?}");
            }
        });
    }
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    init_logging(LevelFilter::Info);
    let window = web_sys::window().ok_or("no window")?;
    let document = window.document().ok_or("no document")?;
    let params = StartParams::parse(&window.location().search().unwrap_or_default());

    // If URL param config is set, fetch it first; otherwise boot with defaults
    if let Some(url) = params.config_url.clone() {
        wasm_bindgen_futures::spawn_local(async move {
            let config = load_config(&window, &url).await;
            if let Err(err) = boot(window, document, config, &params) {
                error!("failed to start puzzle: {err:?}");
            }
        });
        return Ok(());
    }
    boot(window, document, PuzzleConfig::default(), &params)
}

async fn load_config(window: &Window, url: &str) -> PuzzleConfig {
    let resolved = asset_url(url);
    let text = fetch_text_with_fallbacks(window, &[resolved.as_str(), url]).await;
    match text.map(|t| PuzzleConfig::from_json(&t)) {
        Some(Ok(config)) => config,
        Some(Err(err)) => {
            warn!("ignoring config {url}: {err}");
            PuzzleConfig::default()
        }
        None => {
            warn!("could not fetch config {url}");
            PuzzleConfig::default()
        }
    }
}

fn boot(
    window: Window,
    document: Document,
    mut config: PuzzleConfig,
    params: &StartParams,
) -> Result<(), JsValue> {
    log::set_max_level(config.log_filter());
    if let Some(n) = params.tile_count {
        config.tile_count = n;
    }

    // Pages without the puzzle containers only use the JigsawPuzzle class.
    let (Some(board), Some(tray)) = (
        document.get_element_by_id(&config.board_container),
        document.get_element_by_id(&config.tray_container),
    ) else {
        debug!("no puzzle containers on this page");
        return Ok(());
    };
    let board: HtmlElement = board.dyn_into()?;
    let tray: HtmlElement = tray.dyn_into()?;

    let game = Game::new(config.clone());
    let tile_count = config.tile_count;
    game.run(|c| c.initialize(tile_count, &mut shuffle_rng(params.seed)))
        .map_err(|e| JsValue::from_str(&e.to_string()))?;

    let message = config.solved_message.clone();
    game.on_solved(move || {
        if let Err(err) = window.alert_with_message(&message) {
            warn!("could not show solved dialog: {err:?}");
        }
    });

    let state = Rc::new(State {
        document,
        config,
        game,
        board,
        tray,
    });
    let slots = render::build_slots(&state)?;
    input::attach_slot_handlers(&state, &slots)?;
    STATE.with(|st| st.replace(Some(state.clone())));
    info!(
        "board ready: {} tiles, images from {}",
        tile_count,
        state.config.image_pattern
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initialize_without_a_count_uses_the_configured_one() {
        let puzzle = JigsawPuzzle::new(None).unwrap();
        puzzle.initialize(None, Some(7)).unwrap();
        assert_eq!(puzzle.game.read(PuzzleController::tile_count), 16);
        assert_eq!(puzzle.game.read(PuzzleController::placed_count), 0);

        let small = JigsawPuzzle::new(Some(r#"{"tile_count": 4}"#.to_string())).unwrap();
        small.initialize(None, Some(7)).unwrap();
        assert_eq!(small.game.read(PuzzleController::tile_count), 4);
        small.initialize(Some(9), Some(7)).unwrap();
        assert_eq!(small.game.read(PuzzleController::tile_count), 9);
    }
}
