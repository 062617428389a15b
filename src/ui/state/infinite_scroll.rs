pub const LOAD_MORE_THRESHOLD_PX: f64 = 120.0;

pub fn is_near_bottom(scroll_top: f64, scroll_height: f64, client_height: f64) -> bool {
    scroll_height - (scroll_top + client_height) <= LOAD_MORE_THRESHOLD_PX
}
