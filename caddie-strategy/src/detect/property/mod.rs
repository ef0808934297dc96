pub mod analyse_result;
pub mod distance;
pub mod feature;
pub mod overlay;
