mod hostname;
mod load_dotenv;
mod logging;
mod message;
mod shutdown;

pub use hostname::{get_hostname, lookup_hostname, HostnameLookupError};
pub use load_dotenv::load_dotenv;
pub use logging::{init_logging, init_logging_with_default};
pub use message::{expand_newlines, fill_tag};
pub use shutdown::{Shutdown, ShutdownTrigger};
