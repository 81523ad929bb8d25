pub mod catalog;
pub mod config;
pub mod consts;
pub mod decode;
pub mod error;
pub mod geometry;
pub mod interaction;
pub mod normalize;
pub mod pane;
pub mod pipeline;
pub mod preview;
pub mod render;
pub mod source;
pub mod throttle;
pub mod token;
pub mod view;
pub mod viewer;
