pub mod bind_style;
pub mod value;
