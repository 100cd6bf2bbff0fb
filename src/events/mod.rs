//! # Events Module
//!
//! Event-driven progress reporting for the analysis passes.
//!
//! ## Design
//! The core library emits events through channels, allowing any front end
//! (CLI, GUI) to subscribe and display progress without the analyzer knowing
//! who is listening.
//!
//! ## Example
//! ```rust,ignore
//! let (sender, receiver) = EventChannel::new();
//!
//! std::thread::spawn(move || {
//!     for event in receiver.iter() {
//!         match event {
//!             Event::Pass(PassEvent::Progress(p)) => {
//!                 println!("{} {}/{}", p.pass, p.completed, p.total)
//!             }
//!             _ => {}
//!         }
//!     }
//! });
//!
//! analyzer.run_with_events(&sender)?;
//! ```

mod channel;
mod types;

pub use channel::{null_sender, EventChannel, EventReceiver, EventSender};
pub use types::*;
