mod format;

pub use format::format_compact;
