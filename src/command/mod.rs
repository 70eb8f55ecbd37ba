mod auto_mode;
mod ldr;
mod send_text;
mod text_on_error;

pub use auto_mode::auto_mode;
pub use ldr::ldr;
pub use send_text::send_text;
pub use text_on_error::text_on_error;
