pub mod id;
pub mod localized;
pub mod model;
pub mod seed;
pub mod validate;
