pub mod measure;
pub mod presenter;
pub mod sequencer;
pub mod view;
