/// DOM names shared by the renderer and the input handlers.
pub const BOARD_SLOT_CLASS: &str = "pieza-rompecabezas";
pub const TRAY_SLOT_CLASS: &str = "contenedor-pieza";
/// Added to tray slots whose tile has left.
pub const HIDDEN_CLASS: &str = "oculto";
pub const DRAGGING_CLASS: &str = "siendo-arrastrado";
/// Drag payload carrying the source slot id.
pub const DRAG_FORMAT: &str = "text/id";
