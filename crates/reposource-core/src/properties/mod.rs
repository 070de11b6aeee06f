//! Property bags: the construction input of repository definitions.

mod bag;
mod value;

pub use bag::PropertyBag;
pub use value::PropertyValue;
