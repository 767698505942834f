//! Frame-space compositing: black-and-white override and the overlay
//! family (flash, light leak, instant frame, date stamp).

pub mod mono;
pub mod overlay;
pub mod stamp;
