pub mod anim;
pub mod ease;
pub mod easer;
pub mod scene;
