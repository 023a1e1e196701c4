use std::rc::Rc;

use log::{debug, error};
use puzzle_core::{Slot, SlotId};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{DragEvent, Event, HtmlElement, MouseEvent};

use crate::constants::{DRAG_FORMAT, DRAGGING_CLASS};
use crate::render::render;
use crate::state::State;

/// Wires drag-and-drop and double-click handling onto every slot element.
/// Refused moves are ignored; the controller logs why.
pub fn attach_slot_handlers(state: &Rc<State>, slots: &[HtmlElement]) -> Result<(), JsValue> {
    let dragstart = Closure::<dyn FnMut(DragEvent)>::wrap(Box::new(move |e: DragEvent| {
        let Some(el) = event_slot(&e) else {
            return;
        };
        if let Some(dt) = e.data_transfer()
            && let Err(err) = dt.set_data(DRAG_FORMAT, &el.id())
        {
            debug!("could not record drag source {}: {err:?}", el.id());
        }
        let _ = el.class_list().add_1(DRAGGING_CLASS);
    }));

    let dragend = Closure::<dyn FnMut(DragEvent)>::wrap(Box::new(move |e: DragEvent| {
        if let Some(el) = event_slot(&e) {
            let _ = el.class_list().remove_1(DRAGGING_CLASS);
        }
    }));

    let dragover = Closure::<dyn FnMut(DragEvent)>::wrap(Box::new(move |e: DragEvent| {
        e.prevent_default();
    }));

    let st = state.clone();
    let drop = Closure::<dyn FnMut(DragEvent)>::wrap(Box::new(move |e: DragEvent| {
        e.prevent_default();
        let Some(target) = event_slot(&e) else {
            return;
        };
        let source = e
            .data_transfer()
            .and_then(|dt| dt.get_data(DRAG_FORMAT).ok())
            .unwrap_or_default();
        let (Ok(from), Ok(to)) = (source.parse::<SlotId>(), target.id().parse::<SlotId>()) else {
            debug!("drop ignored: {source:?} -> {:?} are not slots", target.id());
            return;
        };
        if st.game.apply(|c| c.transfer(from, to)).is_ok() {
            refresh(&st);
        }
    }));

    let st = state.clone();
    let dblclick = Closure::<dyn FnMut(MouseEvent)>::wrap(Box::new(move |e: MouseEvent| {
        let Some(el) = event_slot(&e) else {
            return;
        };
        let occupant = el
            .id()
            .parse::<SlotId>()
            .ok()
            .and_then(|id| st.game.read(|c| c.slot(id).and_then(Slot::occupant)));
        let Some(tile) = occupant else {
            return;
        };
        if st.game.apply(|c| c.rotate_tile(tile)).is_ok() {
            refresh(&st);
        }
    }));

    for el in slots {
        el.add_event_listener_with_callback("dragstart", dragstart.as_ref().unchecked_ref())?;
        el.add_event_listener_with_callback("dragend", dragend.as_ref().unchecked_ref())?;
        el.add_event_listener_with_callback("dragover", dragover.as_ref().unchecked_ref())?;
        el.add_event_listener_with_callback("drop", drop.as_ref().unchecked_ref())?;
        el.add_event_listener_with_callback("dblclick", dblclick.as_ref().unchecked_ref())?;
    }
    dragstart.forget();
    dragend.forget();
    dragover.forget();
    drop.forget();
    dblclick.forget();
    Ok(())
}

// Draw first so the last tile is visible behind the solved dialog.
fn refresh(state: &State) {
    if let Err(err) = render(state) {
        error!("render failed: {err:?}");
    }
    state.game.flush_solved();
}

fn event_slot(event: &Event) -> Option<HtmlElement> {
    event.current_target()?.dyn_into().ok()
}
