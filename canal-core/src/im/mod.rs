mod overlay;
mod volume;

pub use volume::Plane;
pub use volume::Volume;

pub use overlay::OverlayStyle;
pub use overlay::compose;
pub use overlay::greys_r;
pub use overlay::reds;
pub use overlay::render_overlay;
pub use overlay::save_overlay;
