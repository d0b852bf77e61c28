//! Typed detection results.
//!
//! A model emits a loosely keyed structure; this module turns it into
//! [`Detection`] records at the parse boundary so that nothing downstream
//! has to cope with missing fields or wrong arity.
//!
//! # Example
//!
//! ```
//! use boxlabel::detection::{io_json, BBox, Detection};
//!
//! let detections = io_json::from_json_str(
//!     r#"{"labels":[{"cat":0.95,"y1":0.1,"x1":0.2,"y2":0.5,"x2":0.6}]}"#,
//! )?;
//! assert_eq!(
//!     detections,
//!     vec![Detection::new("cat", 0.95, BBox::from_yxyx(0.1, 0.2, 0.5, 0.6))]
//! );
//! # Ok::<(), boxlabel::BoxlabelError>(())
//! ```

mod bbox;
pub mod io_json;
mod model;
mod space;

pub use bbox::{BBox, PixelRect};
pub use model::Detection;
pub use space::{Normalized, Pixel};
