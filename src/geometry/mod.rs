pub mod ring;
pub mod winding;

pub use ring::{Point, Ring};
pub use winding::{contains, is_left, winding_number};
