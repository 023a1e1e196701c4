use puzzle_core::{PuzzleController, PuzzleSnapshot, Slot, Zone};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::HtmlElement;

use crate::constants::{BOARD_SLOT_CLASS, HIDDEN_CLASS, TRAY_SLOT_CLASS};
use crate::state::State;
use crate::utils::asset_url;

/// Creates one element per slot, replacing whatever the containers held.
/// Element ids are the slot ids.
pub fn build_slots(state: &State) -> Result<Vec<HtmlElement>, JsValue> {
    let snapshot = state.game.read(PuzzleController::snapshot);
    let side = state.game.read(PuzzleController::grid_side);
    state.board.set_inner_html("");
    state.tray.set_inner_html("");
    state
        .board
        .style()
        .set_property("grid-template-columns", &format!("repeat({side}, 1fr)"))?;

    let mut elements = Vec::with_capacity(snapshot.slots.len());
    for slot in &snapshot.slots {
        let (container, class) = match slot.zone() {
            Zone::Board => (&state.board, BOARD_SLOT_CLASS),
            Zone::Tray => (&state.tray, TRAY_SLOT_CLASS),
        };
        let el: HtmlElement = state.document.create_element("div")?.dyn_into()?;
        el.set_id(&slot.id().to_string());
        el.set_class_name(class);
        container.append_child(&el)?;
        elements.push(el);
    }
    render(state)?;
    Ok(elements)
}

/// Redraws every slot from a fresh snapshot.
pub fn render(state: &State) -> Result<(), JsValue> {
    let snapshot = state.game.read(PuzzleController::snapshot);
    for slot in &snapshot.slots {
        if let Some(el) = state.document.get_element_by_id(&slot.id().to_string()) {
            paint_slot(&el.dyn_into()?, &snapshot, slot)?;
        }
    }
    Ok(())
}

fn paint_slot(el: &HtmlElement, snapshot: &PuzzleSnapshot, slot: &Slot) -> Result<(), JsValue> {
    let style = el.style();
    let tile = slot.occupant().and_then(|id| snapshot.tile(id));
    match tile {
        Some(tile) => {
            style.set_property(
                "background-image",
                &format!("url('{}')", asset_url(tile.image_ref())),
            )?;
            style.set_property(
                "transform",
                &format!("rotate({}deg)", tile.rotation().degrees()),
            )?;
        }
        None => {
            style.remove_property("background-image")?;
            style.remove_property("transform")?;
        }
    }
    el.set_draggable(tile.is_some_and(|t| !t.locked()));
    let hidden = slot.zone() == Zone::Tray && tile.is_none();
    el.class_list().toggle_with_force(HIDDEN_CLASS, hidden)?;
    Ok(())
}
