pub mod announcer;

pub use announcer::Announcer;
