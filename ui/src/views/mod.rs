mod detect;
mod home;

pub use detect::Detect;
pub use home::Home;
