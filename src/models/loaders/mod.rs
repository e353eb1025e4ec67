pub mod slug_loader;

pub use slug_loader::load_slugs;
