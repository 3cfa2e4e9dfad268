pub mod cancel;
pub mod timeline;
