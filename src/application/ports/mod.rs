pub mod mail;
pub mod time;
pub mod util;
